mod api;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::http::{RetryPolicy, post_json_with_retries};
use crate::model::{Character, Episode, Page};

use super::query::QueryVariables;

pub(crate) use self::api::{
    parse_character_document, parse_character_page, parse_episode_document, parse_episode_page,
};

const CHARACTERS_QUERY: &str = "query GetCharacters($page: Int, $filter: FilterCharacter) { characters(page: $page, filter: $filter) { info { count pages next prev } results { id name image status species type gender origin { name } location { name } } } }";

const CHARACTER_QUERY: &str = "query GetCharacter($id: ID!) { character(id: $id) { id name status species type gender image created origin { name type dimension } location { name type dimension } episode { id name air_date episode } } }";

const EPISODES_QUERY: &str = "query GetEpisodes($page: Int, $filter: FilterEpisode) { episodes(page: $page, filter: $filter) { info { count pages next prev } results { id name air_date episode created characters { id name image status } } } }";

const EPISODE_QUERY: &str = "query GetEpisode($id: ID!) { episode(id: $id) { id name air_date episode created characters { id name image status species origin { name } } } }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Character,
    Episode,
}

impl EntityKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Episode => "Episode",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("{0}")]
    Transport(String),

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("{} {id} not found", .kind.label())]
    NotFound { kind: EntityKind, id: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Blocking client for the four catalog queries.
#[derive(Debug, Clone)]
pub(crate) struct CatalogClient {
    config: CatalogConfig,
}

impl CatalogClient {
    pub(crate) fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub(crate) fn characters(
        &self,
        variables: &QueryVariables,
    ) -> Result<Page<Character>, CatalogError> {
        let raw = self.execute(CHARACTERS_QUERY, variables.to_json())?;
        let page = parse_character_page(&raw, variables.name_filter.is_some())?;
        info!(
            page = variables.page,
            results = page.results.len(),
            "fetched characters"
        );
        Ok(page)
    }

    pub(crate) fn character(&self, id: &str) -> Result<Character, CatalogError> {
        let raw = self.execute(CHARACTER_QUERY, json!({ "id": id }))?;
        parse_character_document(&raw, id)
    }

    pub(crate) fn episodes(
        &self,
        variables: &QueryVariables,
    ) -> Result<Page<Episode>, CatalogError> {
        let raw = self.execute(EPISODES_QUERY, variables.to_json())?;
        let page = parse_episode_page(&raw, variables.name_filter.is_some())?;
        info!(
            page = variables.page,
            results = page.results.len(),
            "fetched episodes"
        );
        Ok(page)
    }

    pub(crate) fn episode(&self, id: &str) -> Result<Episode, CatalogError> {
        let raw = self.execute(EPISODE_QUERY, json!({ "id": id }))?;
        parse_episode_document(&raw, id)
    }

    fn execute(&self, query: &str, variables: Value) -> Result<String, CatalogError> {
        let body = json!({ "query": query, "variables": variables }).to_string();
        debug!(endpoint = %self.config.endpoint, %variables, "executing query");
        let policy = RetryPolicy {
            connect_timeout: self.config.connect_timeout,
            read_timeout: self.config.read_timeout,
            attempts: self.config.attempts,
            retry_delay: self.config.retry_delay,
        };
        post_json_with_retries(&self.config.endpoint, &body, policy).map_err(CatalogError::Transport)
    }
}
