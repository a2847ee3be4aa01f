//! Search and pagination view state.
//!
//! [`SearchState`] is the single mutable record behind the controller.
//! Mutators report whether anything changed so the caller can decide
//! whether a list fetch is due.

use serde::Serialize;

use super::dish::ResultPage;
use super::pagination::Pagination;

/// Mutable view state owned by the search controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    /// Current 1-indexed page.
    pub page: u32,
    /// Raw text of the name search input.
    pub name_search: String,
    /// Raw text of the ingredient search input.
    pub ingredient_search: String,
    /// Latest name suggestions.
    pub suggestions: Vec<String>,
    /// Whether the suggestion list is shown.
    pub show_suggestions: bool,
    /// Whether a list fetch is in flight.
    pub loading: bool,
    /// Latest successfully loaded page.
    pub results: ResultPage,
    /// Message of the latest failed list fetch, cleared on success.
    pub last_error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            page: 1,
            name_search: String::new(),
            ingredient_search: String::new(),
            suggestions: Vec::new(),
            show_suggestions: false,
            loading: true,
            results: ResultPage::default(),
            last_error: None,
        }
    }
}

impl SearchState {
    /// Replaces the name search text. Returns `true` if it changed.
    pub fn set_name_search(&mut self, text: &str) -> bool {
        replace_if_changed(&mut self.name_search, text)
    }

    /// Replaces the ingredient search text. Returns `true` if it changed.
    pub fn set_ingredient_search(&mut self, text: &str) -> bool {
        replace_if_changed(&mut self.ingredient_search, text)
    }

    /// Moves to the previous page. Returns `false` at page 1.
    pub fn previous_page(&mut self, pagination: &Pagination) -> bool {
        match pagination.previous(self.page) {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    /// Moves to the next page. Returns `false` at the last page.
    pub fn next_page(&mut self, pagination: &Pagination) -> bool {
        match pagination.next(self.page, self.results.total_count) {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    /// Installs a freshly loaded page and clamps the current page to the
    /// new page count. Returns `true` if clamping moved the page.
    pub fn apply_results(&mut self, results: ResultPage, pagination: &Pagination) -> bool {
        self.results = results;
        self.last_error = None;
        let clamped = pagination.clamp(self.page, self.results.total_count);
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Replaces the suggestions; the list is shown only when non-empty.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.show_suggestions = !suggestions.is_empty();
        self.suggestions = suggestions;
    }

    /// Empties and hides the suggestion list.
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    /// Builds a read-only snapshot with the derived pagination fields.
    #[must_use]
    pub fn snapshot(&self, pagination: &Pagination) -> ViewSnapshot {
        let total_count = self.results.total_count;
        ViewSnapshot {
            total_pages: pagination.total_pages(total_count),
            has_previous: pagination.has_previous(self.page),
            has_next: pagination.has_next(self.page, total_count),
            state: self.clone(),
        }
    }
}

fn replace_if_changed(slot: &mut String, text: &str) -> bool {
    if slot == text {
        return false;
    }
    slot.clear();
    slot.push_str(text);
    true
}

/// Owned copy of the view state plus derived pagination fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    /// The state at snapshot time.
    #[serde(flatten)]
    pub state: SearchState,
    /// `ceil(total_count / limit)`.
    pub total_pages: u32,
    /// Whether "Previous" is enabled.
    pub has_previous: bool,
    /// Whether "Next" is enabled.
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total_count: u64) -> SearchState {
        SearchState {
            results: ResultPage {
                dishes: Vec::new(),
                total_count,
            },
            loading: false,
            ..SearchState::default()
        }
    }

    #[test]
    fn starts_on_first_page_and_loading() {
        let state = SearchState::default();
        assert_eq!(state.page, 1);
        assert!(state.loading);
        assert!(state.name_search.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn unchanged_text_reports_no_change() {
        let mut state = SearchState::default();
        assert!(state.set_name_search("soup"));
        assert!(!state.set_name_search("soup"));
        assert!(state.set_ingredient_search("rice"));
        assert!(!state.set_ingredient_search("rice"));
    }

    #[test]
    fn previous_at_first_page_is_noop() {
        let p = Pagination::new(10);
        let mut state = loaded(95);
        assert!(!state.previous_page(&p));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn next_at_last_page_is_noop() {
        let p = Pagination::new(10);
        let mut state = loaded(95);
        state.page = 10;
        assert!(!state.next_page(&p));
        assert_eq!(state.page, 10);
        assert!(state.previous_page(&p));
        assert_eq!(state.page, 9);
    }

    #[test]
    fn smaller_result_clamps_page() {
        let p = Pagination::new(10);
        let mut state = loaded(95);
        state.page = 8;
        let moved = state.apply_results(
            ResultPage {
                dishes: Vec::new(),
                total_count: 25,
            },
            &p,
        );
        assert!(moved);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn empty_suggestions_stay_hidden() {
        let mut state = SearchState::default();
        state.set_suggestions(Vec::new());
        assert!(!state.show_suggestions);
        state.set_suggestions(vec!["biryani".to_string()]);
        assert!(state.show_suggestions);
        state.clear_suggestions();
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn snapshot_derives_page_flags() {
        let p = Pagination::new(10);
        let mut state = loaded(95);
        state.page = 10;
        let snap = state.snapshot(&p);
        assert_eq!(snap.total_pages, 10);
        assert!(snap.has_previous);
        assert!(!snap.has_next);
    }
}
