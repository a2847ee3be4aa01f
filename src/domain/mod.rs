//! Domain layer: catalog entities, view state, and the event system.
//!
//! Nothing in here performs I/O. The controller in [`crate::service`]
//! drives these types from network results and user input.

pub mod dish;
pub mod event_bus;
pub mod pagination;
pub mod search_state;
pub mod view_event;

pub use dish::{Dish, DishId, ResultPage};
pub use event_bus::EventBus;
pub use pagination::Pagination;
pub use search_state::{SearchState, ViewSnapshot};
pub use view_event::{FetchTrigger, ViewEvent};
