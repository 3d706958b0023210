use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

const DEFAULT_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub attempts: usize,
    pub retry_delay: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            attempts: DEFAULT_ATTEMPTS,
            retry_delay: Duration::from_millis(400),
        }
    }
}

impl CatalogConfig {
    /// Builds the config from the CLI endpoint (already merged with
    /// `RICKDEX_ENDPOINT` by clap) and `RICKDEX_HTTP_ATTEMPTS`.
    pub fn resolve(endpoint: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = endpoint.map(str::trim).filter(|value| !value.is_empty()) {
            config.endpoint = endpoint.to_string();
        }
        if let Some(attempts) = env::var("RICKDEX_HTTP_ATTEMPTS")
            .ok()
            .and_then(|raw| parse_attempts(&raw))
        {
            config.attempts = attempts;
        }
        config
    }
}

pub(crate) fn parse_attempts(raw: &str) -> Option<usize> {
    let parsed = raw.trim().parse::<usize>().ok()?;
    (parsed > 0).then_some(parsed)
}
