//! Events describing view state transitions.
//!
//! The controller publishes a [`ViewEvent`] through the
//! [`super::EventBus`] whenever something a renderer cares about changes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a list fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchTrigger {
    /// First load after construction.
    Mount,
    /// The page number changed.
    PageChanged,
    /// The name search text changed.
    NameChanged,
    /// The ingredient search text changed.
    IngredientsChanged,
    /// The page was pulled back into range after a smaller result.
    PageClamped,
    /// Explicit reload of the current state.
    Refresh,
}

/// View-level event emitted by the search controller.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// A list fetch was issued and `loading` is now set.
    ListRequested {
        /// Sequence ticket of the request.
        ticket: u64,
        /// Page the request was issued for.
        page: u32,
        /// What caused the request.
        trigger: FetchTrigger,
        /// Issue timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The latest list fetch succeeded and its page is now displayed.
    ListLoaded {
        /// Sequence ticket of the request.
        ticket: u64,
        /// Current page after any clamping.
        page: u32,
        /// Derived page count.
        total_pages: u32,
        /// Total matching dishes.
        total_count: u64,
        /// Number of dishes on this page.
        returned: usize,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The latest list fetch failed; previous dishes stay displayed.
    ListFailed {
        /// Sequence ticket of the request.
        ticket: u64,
        /// Error message.
        message: String,
        /// Failure timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Suggestions or their visibility changed.
    SuggestionsChanged {
        /// Current suggestions.
        suggestions: Vec<String>,
        /// Whether the suggestion list is shown.
        visible: bool,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ViewEvent {
    /// Returns the list-fetch ticket this event belongs to, if any.
    #[must_use]
    pub const fn ticket(&self) -> Option<u64> {
        match self {
            Self::ListRequested { ticket, .. }
            | Self::ListLoaded { ticket, .. }
            | Self::ListFailed { ticket, .. } => Some(*ticket),
            Self::SuggestionsChanged { .. } => None,
        }
    }
}
