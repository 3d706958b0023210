mod actions;
mod render;
mod session;

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;

use crate::model::{Character, Episode, Page};

use super::catalog::CatalogClient;
use super::query::{ListQueryState, QueryVariables};

pub(crate) use self::actions::{Flow, card_window, handle_key};
use self::actions::{drain_fetch_results, spawn_fetch, status_info};
use self::render::draw_tui;
#[cfg(test)]
pub(crate) use self::render::header_page_text;
use self::session::TuiSession;

/// Most cards shown at once in the character card strip.
pub(crate) const MAX_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Characters,
    Episodes,
}

impl Tab {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Characters => "CHARACTERS",
            Self::Episodes => "EPISODES",
        }
    }

    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::Characters => Self::Episodes,
            Self::Episodes => Self::Characters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayoutMode {
    Table,
    Cards,
}

impl LayoutMode {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }

    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub(crate) fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ListView<T> {
    pub(crate) query: ListQueryState,
    pub(crate) page: LoadState<Page<T>>,
    pub(crate) table_state: TableState,
    pub(super) pending: Option<u64>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            query: ListQueryState::new(),
            page: LoadState::Idle,
            table_state: TableState::default(),
            pending: None,
        }
    }
}

impl<T> ListView<T> {
    pub(crate) fn len(&self) -> usize {
        self.page.ready().map_or(0, |page| page.results.len())
    }

    pub(crate) fn selected_item(&self) -> Option<&T> {
        let page = self.page.ready()?;
        page.results.get(self.table_state.selected()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DetailTarget {
    Character(String),
    Episode(String),
}

#[derive(Debug, Clone)]
pub(crate) enum DetailData {
    Character(Character),
    Episode(Episode),
}

impl DetailData {
    pub(crate) fn link_count(&self) -> usize {
        match self {
            Self::Character(character) => character.episodes.len(),
            Self::Episode(episode) => episode.characters.len(),
        }
    }

    pub(crate) fn link_target(&self, idx: usize) -> Option<DetailTarget> {
        match self {
            Self::Character(character) => character
                .episodes
                .get(idx)
                .map(|episode| DetailTarget::Episode(episode.id.clone())),
            Self::Episode(episode) => episode
                .characters
                .get(idx)
                .map(|character| DetailTarget::Character(character.id.clone())),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DetailView {
    pub(crate) target: DetailTarget,
    pub(crate) data: LoadState<DetailData>,
    pub(crate) table_state: TableState,
    pub(super) pending: Option<u64>,
}

#[derive(Debug, Clone)]
pub(crate) enum FetchRequest {
    Characters(QueryVariables),
    Episodes(QueryVariables),
    Detail(DetailTarget),
}

#[derive(Debug)]
pub(crate) enum FetchOutcome {
    Characters(Result<Page<Character>, String>),
    Episodes(Result<Page<Episode>, String>),
    Detail(Result<DetailData, String>),
}

#[derive(Debug)]
pub(crate) struct FetchResult {
    pub(crate) generation: u64,
    pub(crate) outcome: FetchOutcome,
}

/// Everything the TUI shows. Key handling mutates it and queues fetches;
/// the event loop runs the queued fetches and feeds results back in.
#[derive(Debug)]
pub(crate) struct TuiState {
    pub(crate) endpoint: String,
    pub(crate) tab: Tab,
    pub(crate) layout: LayoutMode,
    pub(crate) search_mode: bool,
    pub(crate) characters: ListView<Character>,
    pub(crate) episodes: ListView<Episode>,
    pub(crate) stack: Vec<DetailView>,
    pub(crate) status: String,
    next_generation: u64,
    outbox: Vec<(u64, FetchRequest)>,
}

impl TuiState {
    pub(crate) fn new(endpoint: &str) -> Self {
        let mut state = Self {
            endpoint: endpoint.to_string(),
            tab: Tab::Characters,
            layout: LayoutMode::Table,
            search_mode: false,
            characters: ListView::default(),
            episodes: ListView::default(),
            stack: Vec::new(),
            status: status_info("Loading characters..."),
            next_generation: 0,
            outbox: Vec::new(),
        };
        state.refresh_list(Tab::Characters);
        state
    }

    fn issue(&mut self, request: FetchRequest) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.outbox.push((generation, request));
        generation
    }

    pub(crate) fn take_requests(&mut self) -> Vec<(u64, FetchRequest)> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn current_query(&self) -> &ListQueryState {
        match self.tab {
            Tab::Characters => &self.characters.query,
            Tab::Episodes => &self.episodes.query,
        }
    }

    pub(crate) fn current_query_mut(&mut self) -> &mut ListQueryState {
        match self.tab {
            Tab::Characters => &mut self.characters.query,
            Tab::Episodes => &mut self.episodes.query,
        }
    }

    /// Requests the tab's page for its current query. Any fetch already in
    /// flight for that tab is superseded.
    pub(crate) fn refresh_list(&mut self, tab: Tab) {
        match tab {
            Tab::Characters => {
                let variables = self.characters.query.to_query_variables();
                let generation = self.issue(FetchRequest::Characters(variables));
                self.characters.pending = Some(generation);
                self.characters.page = LoadState::Loading;
            }
            Tab::Episodes => {
                let variables = self.episodes.query.to_query_variables();
                let generation = self.issue(FetchRequest::Episodes(variables));
                self.episodes.pending = Some(generation);
                self.episodes.page = LoadState::Loading;
            }
        }
    }

    pub(crate) fn open_detail(&mut self, target: DetailTarget) {
        let generation = self.issue(FetchRequest::Detail(target.clone()));
        self.stack.push(DetailView {
            target,
            data: LoadState::Loading,
            table_state: TableState::default(),
            pending: Some(generation),
        });
    }

    pub(crate) fn apply(&mut self, result: FetchResult) -> bool {
        let FetchResult {
            generation,
            outcome,
        } = result;
        match outcome {
            FetchOutcome::Characters(outcome) => {
                if self.characters.pending != Some(generation) {
                    return false;
                }
                self.status = list_status("characters", &outcome);
                apply_page(&mut self.characters, outcome);
            }
            FetchOutcome::Episodes(outcome) => {
                if self.episodes.pending != Some(generation) {
                    return false;
                }
                self.status = list_status("episodes", &outcome);
                apply_page(&mut self.episodes, outcome);
            }
            FetchOutcome::Detail(outcome) => {
                let Some(view) = self
                    .stack
                    .iter_mut()
                    .find(|view| view.pending == Some(generation))
                else {
                    return false;
                };
                view.pending = None;
                match outcome {
                    Ok(data) => {
                        view.table_state
                            .select((data.link_count() > 0).then_some(0));
                        view.data = LoadState::Ready(data);
                        self.status = status_info("Ready.");
                    }
                    Err(err) => {
                        self.status = actions::status_error(&err);
                        view.data = LoadState::Failed(err);
                    }
                }
            }
        }
        true
    }
}

fn list_status<T>(noun: &str, outcome: &Result<Page<T>, String>) -> String {
    match outcome {
        Ok(page) if page.results.is_empty() => status_info(&format!("No {noun} found.")),
        Ok(page) => status_info(&format!(
            "Loaded {} {noun} ({} total).",
            page.results.len(),
            page.info.count
        )),
        Err(err) => actions::status_error(&format!("Loading {noun} failed: {err}")),
    }
}

fn apply_page<T>(view: &mut ListView<T>, outcome: Result<Page<T>, String>) {
    view.pending = None;
    match outcome {
        Ok(page) => {
            view.table_state
                .select((!page.results.is_empty()).then_some(0));
            view.page = LoadState::Ready(page);
        }
        Err(err) => {
            view.table_state.select(None);
            view.page = LoadState::Failed(err);
        }
    }
}

pub(crate) fn run_tui(client: CatalogClient) -> Result<()> {
    let mut session = TuiSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchResult>();
    let mut state = TuiState::new(client.endpoint());

    loop {
        for (generation, request) in state.take_requests() {
            spawn_fetch(&client, generation, request, &fetch_tx);
        }
        drain_fetch_results(&fetch_rx, &mut state);
        terminal.draw(|frame| draw_tui(frame, &mut state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if handle_key(&mut state, key) == Flow::Quit {
            break;
        }
    }

    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}
