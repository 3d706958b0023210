use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

static EPISODE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S([0-9]+)E([0-9]+)").expect("episode code pattern is valid"));

/// Season/episode pair extracted from codes such as `S01E07`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct EpisodeCode {
    pub(crate) season: u32,
    pub(crate) episode: u32,
}

impl EpisodeCode {
    /// Returned by [`parse_episode_code`] when the input has no `S<n>E<n>` run.
    pub(crate) const FALLBACK: Self = Self {
        season: 1,
        episode: 1,
    };

    /// Matches the first `S<digits>E<digits>` anywhere in `code`. Case-sensitive,
    /// ASCII digits only.
    pub(crate) fn try_parse(code: &str) -> Option<Self> {
        let captures = EPISODE_CODE_RE.captures(code)?;
        let season = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let episode = captures.get(2)?.as_str().parse::<u32>().ok()?;
        Some(Self { season, episode })
    }

    pub(crate) fn label(self) -> String {
        format!("Season {} · Episode {}", self.season, self.episode)
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// Best-effort parse for display. Unrecognized codes (specials, empty
/// strings, lowercase codes) render as season 1 episode 1 instead of
/// failing the view.
pub(crate) fn parse_episode_code(code: &str) -> EpisodeCode {
    EpisodeCode::try_parse(code).unwrap_or(EpisodeCode::FALLBACK)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    let mut out = s.to_string();
    if out.chars().count() > max {
        out = out.chars().take(max.saturating_sub(3)).collect::<String>() + "...";
    }
    out
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => "-",
    }
}

pub(crate) fn format_created_display(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M %:z")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

/// Names of the first `limit` featured characters plus a `+N more` tail.
pub(crate) fn featured_names(names: &[&str], limit: usize) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    let shown = names.iter().take(limit).copied().collect::<Vec<_>>().join(", ");
    let hidden = names.len().saturating_sub(limit);
    if hidden == 0 {
        shown
    } else {
        format!("{shown} +{hidden} more")
    }
}
