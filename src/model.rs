#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub kind: Option<String>,
    pub dimension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    pub id: String,
    pub name: String,
    pub air_date: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRef {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub species: Option<String>,
    pub origin: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    pub species: String,
    pub kind: String,
    pub gender: String,
    pub image: Option<String>,
    pub created: Option<String>,
    pub origin: Place,
    pub location: Place,
    pub episodes: Vec<EpisodeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub name: String,
    pub air_date: String,
    pub code: String,
    pub created: Option<String>,
    pub characters: Vec<CharacterRef>,
}

/// Pagination metadata reported by the API alongside every list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            info: PageInfo::default(),
            results: Vec::new(),
        }
    }
}
