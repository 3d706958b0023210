use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::model::{Character, Episode};

use super::super::episode::{
    featured_names, format_created_display, or_dash, parse_episode_code, truncate,
};
use super::super::page_footer;
use super::super::status::status_to_presentation;
use super::{
    DetailData, DetailTarget, DetailView, LayoutMode, ListView, LoadState, MAX_CARDS, Tab,
    TuiState, card_window,
};

const ACCENT: Color = Color::Rgb(110, 200, 150);
const MUTED: Color = Color::Rgb(185, 195, 210);
const TEXT: Color = Color::Rgb(230, 230, 230);

pub(super) fn draw_tui(frame: &mut Frame, state: &mut TuiState) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(header_line(state), chunks[0]);

    if state.stack.is_empty() {
        match state.tab {
            Tab::Characters if state.layout == LayoutMode::Cards => {
                draw_character_cards(frame, chunks[1], &state.characters)
            }
            Tab::Characters => draw_character_list(frame, chunks[1], &mut state.characters),
            Tab::Episodes => draw_episode_list(frame, chunks[1], &mut state.episodes),
        }
    } else if let Some(view) = state.stack.last_mut() {
        draw_detail(frame, chunks[1], view);
    }

    frame.render_widget(search_bar(state), chunks[2]);

    let controls = Paragraph::new(controls_line(state))
        .alignment(Alignment::Center)
        .block(panel_block("Controls"));
    frame.render_widget(controls, chunks[3]);

    let status_widget = Paragraph::new(state.status.clone())
        .style(status_style(&state.status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[4]);
}

fn header_line(state: &TuiState) -> Paragraph<'static> {
    let mut spans = vec![
        Span::styled(
            "RICKDEX",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
    ];
    for tab in [Tab::Characters, Tab::Episodes] {
        let style = if tab == state.tab {
            pill_active()
        } else {
            pill_inactive()
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::styled(" ", Style::default()));
    }
    spans.push(Span::styled(
        format!("  {}", header_page_text(state)),
        Style::default().fg(MUTED),
    ));
    spans.push(Span::styled(
        format!("   {}", truncate(&state.endpoint, 40)),
        Style::default().fg(Color::Rgb(125, 135, 150)),
    ));

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(panel_block("Catalog"))
}

/// Page position for the active tab. Only the characters tab has a
/// switchable layout, so only it names one.
pub(crate) fn header_page_text(state: &TuiState) -> String {
    match state.tab {
        Tab::Characters => format!(
            "{}   layout {}",
            list_page_text(&state.characters),
            state.layout.label()
        ),
        Tab::Episodes => list_page_text(&state.episodes),
    }
}

fn list_page_text<T>(view: &ListView<T>) -> String {
    match &view.page {
        LoadState::Ready(page) => page_footer(view.query.page(), &page.info),
        LoadState::Loading => format!("Page {} (loading)", view.query.page()),
        LoadState::Idle | LoadState::Failed(_) => format!("Page {}", view.query.page()),
    }
}

fn search_bar(state: &TuiState) -> Paragraph<'static> {
    let term = state.current_query().search_term().to_string();
    let line = if state.search_mode {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{term}_"), Style::default().fg(TEXT)),
        ])
    } else if term.is_empty() {
        Line::from(Span::styled(
            "Press / to search by name",
            Style::default().fg(MUTED),
        ))
    } else {
        Line::from(vec![
            Span::styled("filter: ", Style::default().fg(MUTED)),
            Span::styled(term, Style::default().fg(TEXT)),
        ])
    };
    Paragraph::new(line).block(panel_block("Search"))
}

/// Shared placeholder for views that have nothing to tabulate yet.
fn placeholder<T>(state: &LoadState<T>, noun: &str) -> Option<String> {
    match state {
        LoadState::Idle | LoadState::Loading => Some("Loading...".to_string()),
        LoadState::Failed(err) => Some(format!("Could not load {noun}.\n\n{err}")),
        LoadState::Ready(_) => None,
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, title: &'static str, text: String) {
    let widget = Paragraph::new(text)
        .style(Style::default().fg(TEXT))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel_block(title));
    frame.render_widget(widget, area);
}

fn split_body(area: Rect) -> (Rect, Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);
    (body[0], body[1])
}

fn draw_character_list(frame: &mut Frame, area: Rect, view: &mut ListView<Character>) {
    if let Some(text) = placeholder(&view.page, "characters") {
        draw_placeholder(frame, area, "Characters", text);
        return;
    }
    let (list_area, side_area) = split_body(area);

    let rows: Vec<Row> = view
        .page
        .ready()
        .map(|page| page.results.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|character| {
            let status = status_to_presentation(character.status.as_deref());
            Row::new(vec![
                Cell::from(character.name.clone()),
                Cell::from(Span::styled(status.badge(), Style::default().fg(status.color))),
                Cell::from(or_dash(Some(character.species.as_str())).to_string()),
                Cell::from(character.origin.name.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(38),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Percentage(40),
        ],
    )
    .header(table_header(vec!["Name", "Status", "Species", "Origin"]))
    .block(panel_block("Characters"))
    .row_highlight_style(row_highlight())
    .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, list_area, &mut view.table_state);

    let side = match view.selected_item() {
        Some(character) => character_summary(character),
        None => vec![Line::from("No characters on this page.")],
    };
    let selection = Paragraph::new(side)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: true })
        .block(panel_block("Selected"));
    frame.render_widget(selection, side_area);
}

fn character_summary(character: &Character) -> Vec<Line<'static>> {
    let status = status_to_presentation(character.status.as_deref());
    vec![
        Line::from(Span::styled(
            character.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(status.badge(), Style::default().fg(status.color))),
        Line::from(""),
        labelled("Species", or_dash(Some(character.species.as_str()))),
        labelled("Gender", or_dash(Some(character.gender.as_str()))),
        labelled("Origin", &character.origin.name),
        labelled("Location", &character.location.name),
    ]
}

fn draw_character_cards(frame: &mut Frame, area: Rect, view: &ListView<Character>) {
    if let Some(text) = placeholder(&view.page, "characters") {
        draw_placeholder(frame, area, "Characters", text);
        return;
    }
    let Some(page) = view.page.ready() else {
        return;
    };
    if page.results.is_empty() {
        draw_placeholder(frame, area, "Characters", "No characters on this page.".to_string());
        return;
    }

    let selected = view.table_state.selected();
    let window = card_window(page.results.len(), selected, MAX_CARDS);
    let constraints = vec![Constraint::Ratio(1, window.len() as u32); window.len()];
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(panel_block("Characters").inner(area));
    frame.render_widget(panel_block("Characters"), area);

    for (slot, idx) in slots.iter().zip(window) {
        let Some(character) = page.results.get(idx) else {
            continue;
        };
        let is_selected = selected == Some(idx);
        let border = if is_selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(90, 100, 115))
        };
        let card = Paragraph::new(character_summary(character))
            .style(Style::default().fg(TEXT))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .title(format!("#{}", character.id)),
            );
        frame.render_widget(card, *slot);
    }
}

fn draw_episode_list(frame: &mut Frame, area: Rect, view: &mut ListView<Episode>) {
    if let Some(text) = placeholder(&view.page, "episodes") {
        draw_placeholder(frame, area, "Episodes", text);
        return;
    }
    let (list_area, side_area) = split_body(area);

    let rows: Vec<Row> = view
        .page
        .ready()
        .map(|page| page.results.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|episode| {
            let code = parse_episode_code(&episode.code);
            Row::new(vec![
                Cell::from(code.to_string()),
                Cell::from(episode.name.clone()),
                Cell::from(episode.air_date.clone()),
                Cell::from(episode.characters.len().to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Percentage(50),
            Constraint::Length(20),
            Constraint::Length(6),
        ],
    )
    .header(table_header(vec!["Code", "Name", "Air Date", "Cast"]))
    .block(panel_block("Episodes"))
    .row_highlight_style(row_highlight())
    .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, list_area, &mut view.table_state);

    let side = match view.selected_item() {
        Some(episode) => episode_summary(episode),
        None => vec![Line::from("No episodes on this page.")],
    };
    let selection = Paragraph::new(side)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: true })
        .block(panel_block("Selected"));
    frame.render_widget(selection, side_area);
}

fn episode_summary(episode: &Episode) -> Vec<Line<'static>> {
    let names = episode
        .characters
        .iter()
        .map(|character| character.name.as_str())
        .collect::<Vec<_>>();
    vec![
        Line::from(Span::styled(
            episode.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            parse_episode_code(&episode.code).label(),
            Style::default().fg(ACCENT),
        )),
        Line::from(""),
        labelled("Air date", or_dash(Some(episode.air_date.as_str()))),
        labelled("Cast", &episode.characters.len().to_string()),
        Line::from(""),
        Line::from(featured_names(&names, 6)),
    ]
}

fn draw_detail(frame: &mut Frame, area: Rect, view: &mut DetailView) {
    let title = match &view.target {
        DetailTarget::Character(_) => "Character",
        DetailTarget::Episode(_) => "Episode",
    };
    if let Some(text) = placeholder(&view.data, title.to_lowercase().as_str()) {
        draw_placeholder(frame, area, title, text);
        return;
    }
    let Some(data) = view.data.ready() else {
        return;
    };
    let (info_area, links_area) = split_detail_body(area);

    match data {
        DetailData::Character(character) => {
            let mut lines = character_summary(character);
            lines.push(labelled("Type", or_dash(Some(character.kind.as_str()))));
            lines.push(labelled(
                "Dimension",
                or_dash(character.origin.dimension.as_deref()),
            ));
            if let Some(created) = character.created.as_deref() {
                lines.push(labelled("Created", &format_created_display(created)));
            }
            lines.push(labelled("Image", or_dash(character.image.as_deref())));
            draw_info(frame, info_area, title, lines);

            let rows: Vec<Row> = character
                .episodes
                .iter()
                .map(|episode| {
                    Row::new(vec![
                        Cell::from(parse_episode_code(&episode.code).to_string()),
                        Cell::from(episode.name.clone()),
                        Cell::from(episode.air_date.clone()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(8),
                    Constraint::Percentage(55),
                    Constraint::Length(18),
                ],
            )
            .header(table_header(vec!["Code", "Episode", "Air Date"]))
            .block(panel_block("Appearances"))
            .row_highlight_style(row_highlight())
            .highlight_symbol("▸ ");
            frame.render_stateful_widget(table, links_area, &mut view.table_state);
        }
        DetailData::Episode(episode) => {
            let mut lines = episode_summary(episode);
            if let Some(created) = episode.created.as_deref() {
                lines.push(Line::from(""));
                lines.push(labelled("Created", &format_created_display(created)));
            }
            draw_info(frame, info_area, title, lines);

            let rows: Vec<Row> = episode
                .characters
                .iter()
                .map(|character| {
                    let status = status_to_presentation(character.status.as_deref());
                    Row::new(vec![
                        Cell::from(character.name.clone()),
                        Cell::from(Span::styled(
                            status.badge(),
                            Style::default().fg(status.color),
                        )),
                        Cell::from(or_dash(character.species.as_deref()).to_string()),
                        Cell::from(or_dash(character.origin.as_deref()).to_string()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(35),
                    Constraint::Length(11),
                    Constraint::Length(12),
                    Constraint::Percentage(35),
                ],
            )
            .header(table_header(vec!["Name", "Status", "Species", "Origin"]))
            .block(panel_block("Characters Featured"))
            .row_highlight_style(row_highlight())
            .highlight_symbol("▸ ");
            frame.render_stateful_widget(table, links_area, &mut view.table_state);
        }
    }
}

fn split_detail_body(area: Rect) -> (Rect, Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    (body[0], body[1])
}

fn draw_info(frame: &mut Frame, area: Rect, title: &'static str, lines: Vec<Line<'static>>) {
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: true })
        .block(panel_block(title));
    frame.render_widget(widget, area);
}

fn labelled(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(MUTED)),
        Span::raw(value.to_string()),
    ])
}

fn table_header(titles: Vec<&'static str>) -> Row<'static> {
    Row::new(titles).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}

fn row_highlight() -> Style {
    Style::default()
        .bg(ACCENT)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn pill_active() -> Style {
    Style::default()
        .bg(ACCENT)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

fn pill_inactive() -> Style {
    Style::default()
        .bg(Color::Rgb(72, 82, 96))
        .fg(Color::Rgb(230, 235, 242))
}

fn controls_line(state: &TuiState) -> Line<'static> {
    let hint = if state.search_mode {
        "type to filter  Backspace delete  Ctrl-u clear  Enter/Esc done"
    } else if !state.stack.is_empty() {
        "↑/↓ move  Enter open  Esc back"
    } else {
        "↑/↓ move  ←/→ page  Enter open  Tab switch  / search  g layout  r reload  q quit"
    };
    Line::from(Span::styled(hint, Style::default().fg(MUTED)))
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(Color::Rgb(230, 235, 242))
    }
}
