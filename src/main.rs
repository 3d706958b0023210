mod app;
mod cli;
mod config;
mod http;
mod model;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if !cli.is_interactive() {
        init_tracing();
    }
    app::run(cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RICKDEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
