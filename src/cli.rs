use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "rickdex",
    version,
    about = "Browse Rick and Morty characters and episodes from the terminal"
)]
pub struct Cli {
    /// GraphQL endpoint to query.
    #[arg(long, global = true, env = "RICKDEX_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Tui))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List characters, optionally filtered by name.
    Characters(ListArgs),
    /// List episodes, optionally filtered by name.
    Episodes(ListArgs),
    /// Show a single character.
    Character { id: String },
    /// Show a single episode.
    Episode { id: String },
    Tui,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[arg(long, short)]
    pub search: Option<String>,
}
