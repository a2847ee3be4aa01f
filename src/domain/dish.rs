//! Dish entity and the result page that carries it.
//!
//! Both types are read-only views of remote data. They are deserialized
//! straight from the catalog's JSON payload and never mutated locally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a dish by the catalog service.
///
/// Opaque to this crate; the catalog uses document ids, so it is kept as
/// a string rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishId(String);

impl DishId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Catalog identifier (`_id` on the wire).
    #[serde(rename = "_id", alias = "id")]
    pub id: DishId,
    /// Display name.
    pub name: String,
    /// Diet label, e.g. `"vegetarian"`.
    #[serde(default)]
    pub diet: String,
    /// Preparation time in minutes. The catalog uses `-1` for unknown.
    #[serde(default = "unknown_prep_time")]
    pub prep_time: i32,
    /// Ingredients in catalog order.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

fn unknown_prep_time() -> i32 {
    -1
}

impl Dish {
    /// Returns the preparation time, or `None` when the catalog does not
    /// know it.
    #[must_use]
    pub fn prep_minutes(&self) -> Option<u32> {
        u32::try_from(self.prep_time).ok()
    }

    /// Ingredients joined for display.
    #[must_use]
    pub fn ingredient_line(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// A single page of list results.
///
/// Replaces the previous page wholesale on every successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Dishes in server order.
    pub dishes: Vec<Dish>,
    /// Total matching dishes across all pages.
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
