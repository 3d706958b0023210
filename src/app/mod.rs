mod catalog;
mod episode;
mod query;
mod status;
mod tui;


use anyhow::{Context, Result};
use tracing::warn;

use crate::cli::{Cli, Command, ListArgs};
use crate::config::CatalogConfig;
use crate::model::PageInfo;

use self::catalog::{CatalogClient, CatalogError};
use self::episode::{
    EpisodeCode, featured_names, format_created_display, or_dash, parse_episode_code, truncate,
};
use self::query::ListQueryState;
use self::status::status_to_presentation;

pub fn run(cli: Cli) -> Result<()> {
    let client = CatalogClient::new(CatalogConfig::resolve(cli.endpoint.as_deref()));

    match cli.command {
        Some(Command::Characters(args)) => run_characters(&client, &args)?,
        Some(Command::Episodes(args)) => run_episodes(&client, &args)?,
        Some(Command::Character { id }) => run_character(&client, &id)?,
        Some(Command::Episode { id }) => run_episode(&client, &id)?,
        Some(Command::Tui) | None => tui::run_tui(client)?,
    }

    Ok(())
}

fn list_state(args: &ListArgs) -> ListQueryState {
    ListQueryState::with(args.page, args.search.as_deref())
}

fn run_characters(client: &CatalogClient, args: &ListArgs) -> Result<()> {
    let state = list_state(args);
    let page = client
        .characters(&state.to_query_variables())
        .context("failed to fetch characters")?;
    if page.results.is_empty() {
        println!("{}", empty_list_message("characters", &state));
        return Ok(());
    }

    println!(
        "{:<6} {:<32} {:<11} {:<16} {:<28}",
        "ID", "NAME", "STATUS", "SPECIES", "ORIGIN"
    );
    for character in &page.results {
        println!(
            "{:<6} {:<32} {:<11} {:<16} {:<28}",
            truncate(&character.id, 6),
            truncate(&character.name, 32),
            status_to_presentation(character.status.as_deref()).badge(),
            truncate(or_dash(Some(character.species.as_str())), 16),
            truncate(&character.origin.name, 28)
        );
    }
    println!("\n{}", page_footer(state.page(), &page.info));
    Ok(())
}

fn run_episodes(client: &CatalogClient, args: &ListArgs) -> Result<()> {
    let state = list_state(args);
    let page = client
        .episodes(&state.to_query_variables())
        .context("failed to fetch episodes")?;
    if page.results.is_empty() {
        println!("{}", empty_list_message("episodes", &state));
        return Ok(());
    }

    println!(
        "{:<5} {:<8} {:<22} {:<36} {:<20} {:>5}",
        "ID", "CODE", "SEASON", "NAME", "AIR DATE", "CAST"
    );
    for episode in &page.results {
        println!(
            "{:<5} {:<8} {:<22} {:<36} {:<20} {:>5}",
            truncate(&episode.id, 5),
            truncate(&episode.code, 8),
            parse_episode_code(&episode.code).label(),
            truncate(&episode.name, 36),
            truncate(&episode.air_date, 20),
            episode.characters.len()
        );
    }
    println!("\n{}", page_footer(state.page(), &page.info));
    Ok(())
}

fn run_character(client: &CatalogClient, id: &str) -> Result<()> {
    let character = match client.character(id) {
        Ok(character) => character,
        Err(err @ CatalogError::NotFound { .. }) => {
            println!("{err}.");
            return Ok(());
        }
        Err(err) => return Err(err).with_context(|| format!("failed to fetch character {id}")),
    };

    let status = status_to_presentation(character.status.as_deref());
    println!("{} (#{})", character.name, character.id);
    println!("  Status:   {}", status.badge());
    println!("  Species:  {}", or_dash(Some(character.species.as_str())));
    println!("  Type:     {}", or_dash(Some(character.kind.as_str())));
    println!("  Gender:   {}", or_dash(Some(character.gender.as_str())));
    println!(
        "  Origin:   {}",
        place_line(&character.origin.name, character.origin.dimension.as_deref())
    );
    println!(
        "  Location: {}",
        place_line(&character.location.name, character.location.dimension.as_deref())
    );
    if let Some(created) = character.created.as_deref() {
        println!("  Created:  {}", format_created_display(created));
    }
    println!("  Image:    {}", or_dash(character.image.as_deref()));

    println!("\nEpisodes ({})", character.episodes.len());
    for appearance in &character.episodes {
        let code = parse_episode_code(&appearance.code);
        println!(
            "  {:<5} {} {:<36} {}",
            truncate(&appearance.id, 5),
            code,
            truncate(&appearance.name, 36),
            appearance.air_date
        );
    }
    Ok(())
}

fn run_episode(client: &CatalogClient, id: &str) -> Result<()> {
    let episode = match client.episode(id) {
        Ok(episode) => episode,
        Err(err @ CatalogError::NotFound { .. }) => {
            println!("{err}.");
            return Ok(());
        }
        Err(err) => return Err(err).with_context(|| format!("failed to fetch episode {id}")),
    };

    let code = parse_episode_code(&episode.code);
    if EpisodeCode::try_parse(&episode.code).is_none() {
        warn!(code = %episode.code, "episode code did not match S<n>E<n>, showing fallback");
    }
    println!("{} (#{})", episode.name, episode.id);
    println!("  {}", code.label());
    println!("  Code:     {}", or_dash(Some(episode.code.as_str())));
    println!("  Air date: {}", or_dash(Some(episode.air_date.as_str())));
    if let Some(created) = episode.created.as_deref() {
        println!("  Created:  {}", format_created_display(created));
    }

    println!("\nCharacters featured: {}", episode.characters.len());
    for character in &episode.characters {
        let status = status_to_presentation(character.status.as_deref());
        println!(
            "  {:<6} {:<32} {:<11} {}",
            truncate(&character.id, 6),
            truncate(&character.name, 32),
            status.badge(),
            or_dash(character.species.as_deref())
        );
    }
    let names = episode
        .characters
        .iter()
        .map(|character| character.name.as_str())
        .collect::<Vec<_>>();
    println!("\nFeatured: {}", featured_names(&names, 6));
    Ok(())
}

fn place_line(name: &str, dimension: Option<&str>) -> String {
    match dimension.map(str::trim).filter(|value| !value.is_empty()) {
        Some(dimension) => format!("{name} ({dimension})"),
        None => name.to_string(),
    }
}

pub(crate) fn page_footer(page: u32, info: &PageInfo) -> String {
    format!(
        "Page {page} of {} ({} results)",
        info.pages.max(1),
        info.count
    )
}

pub(crate) fn empty_list_message(noun: &str, state: &ListQueryState) -> String {
    match state.active_filter() {
        Some(term) => format!("No {noun} match \"{term}\"."),
        None => format!("No {noun} on page {}.", state.page()),
    }
}
