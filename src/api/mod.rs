//! Catalog API layer: query construction, envelope decoding, HTTP client.
//!
//! The controller talks to the network only through [`DishSource`].

pub mod client;
pub mod envelope;
pub mod query;
pub mod source;

pub use client::DishClient;
pub use envelope::{Envelope, unwrap_envelope};
pub use query::{DishQuery, collapse_whitespace, normalize_ingredients};
pub use source::DishSource;
