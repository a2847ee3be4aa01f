//! Service layer: view-state orchestration.
//!
//! [`SearchController`] drives the [`crate::domain::SearchState`] from user
//! input and network results, using a [`Debouncer`] for suggestion lookups
//! and a [`RequestSequencer`] to keep list responses in issue order.

pub mod debounce;
pub mod search_controller;
pub mod sequencer;

pub use debounce::Debouncer;
pub use search_controller::{ControllerSettings, SearchController};
pub use sequencer::RequestSequencer;
