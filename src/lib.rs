//! # dish-explorer
//!
//! Client library for a paginated, searchable dish catalog served over
//! REST.
//!
//! The crate turns two free-text search inputs (dish name, ingredients)
//! and a page number into catalog requests, unwraps the response envelope,
//! keeps the view state consistent under overlapping requests, and
//! debounces name suggestions. Rendering is left to the caller, which
//! reads [`service::SearchController::snapshot`] or subscribes to the
//! [`domain::EventBus`].
//!
//! ## Architecture
//!
//! ```text
//! Terminal driver (main.rs, cli)
//!     │
//!     ├── SearchController (service/)
//!     │     ├── Debouncer ──────── suggestion lookups
//!     │     └── RequestSequencer ─ list fetch ordering
//!     │
//!     ├── SearchState, Pagination, EventBus (domain/)
//!     │
//!     └── DishSource → DishClient (api/)
//!           └── GET {base}/dish?skip=..&name=..&ingredients=..
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
