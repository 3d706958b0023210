use std::ops::Range;
use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::super::catalog::CatalogClient;
use super::{DetailData, DetailTarget, FetchOutcome, FetchRequest, FetchResult, Tab, TuiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(crate) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}

pub(crate) fn handle_key(state: &mut TuiState, key: KeyEvent) -> Flow {
    if state.search_mode {
        handle_search_key(state, key);
        return Flow::Continue;
    }
    if !state.stack.is_empty() {
        handle_detail_key(state, key.code);
        return Flow::Continue;
    }
    handle_list_key(state, key.code)
}

fn handle_search_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.search_mode = false;
            state.status = status_info("Search closed.");
            return;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.current_query_mut().clear_search();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.current_query_mut().push_search_char(ch);
        }
        KeyCode::Backspace => state.current_query_mut().pop_search_char(),
        _ => return,
    }
    let tab = state.tab;
    state.refresh_list(tab);
}

fn handle_list_key(state: &mut TuiState, code: KeyCode) -> Flow {
    match code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Tab => {
            state.tab = state.tab.toggle();
            let needs_fetch = match state.tab {
                Tab::Characters => state.characters.page.is_idle(),
                Tab::Episodes => state.episodes.page.is_idle(),
            };
            if needs_fetch {
                state.refresh_list(state.tab);
            }
            state.status = status_info(&format!("Showing {}.", state.tab.label().to_lowercase()));
        }
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.status = status_info("Type to filter by name. Enter/Esc to finish, Ctrl-u clears.");
        }
        KeyCode::Char('r') => {
            state.refresh_list(state.tab);
            state.status = status_info("Reloading...");
        }
        KeyCode::Char('g') => {
            if state.tab == Tab::Characters {
                state.layout = state.layout.toggle();
            } else {
                state.status = status_info("Card layout is only available for characters.");
            }
        }
        KeyCode::Right | KeyCode::Char('n') => step_page(state, true),
        KeyCode::Left | KeyCode::Char('p') => step_page(state, false),
        KeyCode::Up => move_list_selection(state, false),
        KeyCode::Down => move_list_selection(state, true),
        KeyCode::Enter => {
            let target = match state.tab {
                Tab::Characters => state
                    .characters
                    .selected_item()
                    .map(|character| DetailTarget::Character(character.id.clone())),
                Tab::Episodes => state
                    .episodes
                    .selected_item()
                    .map(|episode| DetailTarget::Episode(episode.id.clone())),
            };
            match target {
                Some(target) => state.open_detail(target),
                None => state.status = status_info("Nothing selected."),
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn step_page(state: &mut TuiState, forward: bool) {
    let info = match state.tab {
        Tab::Characters => state.characters.page.ready().map(|page| page.info),
        Tab::Episodes => state.episodes.page.ready().map(|page| page.info),
    };
    let Some(info) = info else {
        state.status = status_info("No page loaded yet.");
        return;
    };

    let query = state.current_query_mut();
    let moved = if forward {
        query.next_page(&info)
    } else {
        query.prev_page(&info)
    };
    if moved {
        state.refresh_list(state.tab);
    } else if forward {
        state.status = status_info("Already on the last page.");
    } else {
        state.status = status_info("Already on the first page.");
    }
}

fn move_list_selection(state: &mut TuiState, down: bool) {
    match state.tab {
        Tab::Characters => {
            let len = state.characters.len();
            move_selection(&mut state.characters.table_state, len, down);
        }
        Tab::Episodes => {
            let len = state.episodes.len();
            move_selection(&mut state.episodes.table_state, len, down);
        }
    }
}

fn move_selection(table_state: &mut ratatui::widgets::TableState, len: usize, down: bool) {
    let Some(selected) = table_state.selected() else {
        return;
    };
    if len == 0 {
        return;
    }
    let next = if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    };
    table_state.select(Some(next));
}

fn handle_detail_key(state: &mut TuiState, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
            state.stack.pop();
            state.status = status_info("Back.");
        }
        KeyCode::Up | KeyCode::Down => {
            let Some(view) = state.stack.last_mut() else {
                return;
            };
            let len = view.data.ready().map_or(0, DetailData::link_count);
            move_selection(&mut view.table_state, len, code == KeyCode::Down);
        }
        KeyCode::Enter => {
            let target = state.stack.last().and_then(|view| {
                let data = view.data.ready()?;
                data.link_target(view.table_state.selected()?)
            });
            if let Some(target) = target {
                state.open_detail(target);
            }
        }
        _ => {}
    }
}

/// Index range of the cards to draw: at most `max` wide, centred on
/// `selected` and clamped to `0..len`.
pub(crate) fn card_window(len: usize, selected: Option<usize>, max: usize) -> Range<usize> {
    if len <= max {
        return 0..len;
    }
    let selected = selected.unwrap_or(0).min(len - 1);
    let start = selected.saturating_sub(max / 2).min(len - max);
    start..start + max
}

pub(super) fn spawn_fetch(
    client: &CatalogClient,
    generation: u64,
    request: FetchRequest,
    tx: &mpsc::Sender<FetchResult>,
) {
    let client = client.clone();
    let tx = tx.clone();
    std::thread::spawn(move || {
        let outcome = match request {
            FetchRequest::Characters(variables) => FetchOutcome::Characters(
                client.characters(&variables).map_err(|err| err.to_string()),
            ),
            FetchRequest::Episodes(variables) => FetchOutcome::Episodes(
                client.episodes(&variables).map_err(|err| err.to_string()),
            ),
            FetchRequest::Detail(DetailTarget::Character(id)) => FetchOutcome::Detail(
                client
                    .character(&id)
                    .map(DetailData::Character)
                    .map_err(|err| err.to_string()),
            ),
            FetchRequest::Detail(DetailTarget::Episode(id)) => FetchOutcome::Detail(
                client
                    .episode(&id)
                    .map(DetailData::Episode)
                    .map_err(|err| err.to_string()),
            ),
        };
        let _ = tx.send(FetchResult {
            generation,
            outcome,
        });
    });
}

pub(super) fn drain_fetch_results(rx: &mpsc::Receiver<FetchResult>, state: &mut TuiState) {
    while let Ok(result) = rx.try_recv() {
        let generation = result.generation;
        if !state.apply(result) {
            debug!(generation, "dropping superseded fetch result");
        }
    }
}
