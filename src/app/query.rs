use serde_json::{Map, Value, json};

use crate::model::PageInfo;

/// Page and search term for one list view. Each view owns its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListQueryState {
    page: u32,
    search_term: String,
}

impl Default for ListQueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search_term: String::new(),
        }
    }
}

impl ListQueryState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(page: u32, search_term: Option<&str>) -> Self {
        let mut state = Self::new();
        if let Some(term) = search_term {
            state.set_search_term(term);
        }
        state.set_page(page);
        state
    }

    pub(crate) fn page(&self) -> u32 {
        self.page
    }

    pub(crate) fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the filter text. A new filter invalidates the current
    /// position, so the page always goes back to 1.
    pub(crate) fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.page = 1;
    }

    pub(crate) fn push_search_char(&mut self, ch: char) {
        let mut term = self.search_term.clone();
        term.push(ch);
        self.set_search_term(&term);
    }

    pub(crate) fn pop_search_char(&mut self) {
        let mut term = self.search_term.clone();
        term.pop();
        self.set_search_term(&term);
    }

    pub(crate) fn clear_search(&mut self) {
        self.set_search_term("");
    }

    /// No bounds checks; callers gate navigation on [`PageInfo`].
    pub(crate) fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub(crate) fn next_page(&mut self, info: &PageInfo) -> bool {
        if !info.has_next() {
            return false;
        }
        self.set_page(info.next.unwrap_or(self.page + 1));
        true
    }

    pub(crate) fn prev_page(&mut self, info: &PageInfo) -> bool {
        if !info.has_prev() {
            return false;
        }
        self.set_page(info.prev.unwrap_or(self.page.saturating_sub(1).max(1)));
        true
    }

    pub(crate) fn active_filter(&self) -> Option<&str> {
        let trimmed = self.search_term.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub(crate) fn to_query_variables(&self) -> QueryVariables {
        QueryVariables {
            page: self.page,
            name_filter: self.active_filter().map(str::to_string),
        }
    }
}

/// `{page, filter}` variables for the list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueryVariables {
    pub(crate) page: u32,
    pub(crate) name_filter: Option<String>,
}

impl QueryVariables {
    pub(crate) fn filter(&self) -> Value {
        let mut filter = Map::new();
        if let Some(name) = &self.name_filter {
            filter.insert("name".to_string(), Value::String(name.clone()));
        }
        Value::Object(filter)
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "page": self.page,
            "filter": self.filter(),
        })
    }
}
