use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifeStatus {
    Alive,
    Dead,
    Unknown,
}

impl LifeStatus {
    pub(crate) fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("Alive") => Self::Alive,
            Some("Dead") => Self::Dead,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StatusPresentation {
    pub(crate) color: Color,
    pub(crate) glyph: &'static str,
    pub(crate) label: &'static str,
}

impl StatusPresentation {
    pub(crate) fn badge(self) -> String {
        format!("{} {}", self.glyph, self.label)
    }
}

pub(crate) fn status_to_presentation(raw: Option<&str>) -> StatusPresentation {
    match LifeStatus::from_raw(raw) {
        LifeStatus::Alive => StatusPresentation {
            color: Color::Rgb(80, 200, 120),
            glyph: "●",
            label: "Alive",
        },
        LifeStatus::Dead => StatusPresentation {
            color: Color::Rgb(235, 90, 90),
            glyph: "✖",
            label: "Dead",
        },
        LifeStatus::Unknown => StatusPresentation {
            color: Color::Rgb(140, 150, 165),
            glyph: "?",
            label: "Unknown",
        },
    }
}
