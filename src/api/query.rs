//! List query construction.
//!
//! Turns the raw search inputs and a skip offset into the query string of
//! `GET /dish`. The parameter rules are mutually overriding rather than
//! incremental: any non-empty search term resets the offset to 0, so an
//! active search always reads the first page of results.

use std::fmt;

/// Trims and collapses internal whitespace runs to single spaces.
///
/// Idempotent: collapsing an already collapsed string returns it unchanged.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes free-text ingredient input into a comma-joined term list.
///
/// `"  tomato   onion "` becomes `"tomato,onion"`. Blank input yields an
/// empty string.
#[must_use]
pub fn normalize_ingredients(input: &str) -> String {
    collapse_whitespace(input).replace(' ', ",")
}

/// Query parameters for one `GET /dish` request.
///
/// Built only through [`DishQuery::build`]. Rendered with [`fmt::Display`]
/// as `?skip=..&name=..&ingredients=..`, or as the empty string when no
/// parameter applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishQuery {
    skip: Option<u32>,
    name: Option<String>,
    ingredients: Option<String>,
}

impl DishQuery {
    /// Applies the parameter precedence rules.
    ///
    /// Each rule replaces whatever the previous one produced:
    ///
    /// 1. non-zero `skip` → `?skip={skip}`
    /// 2. ingredients present → `?skip=0&ingredients=..`
    /// 3. name present → `?skip=0&name=..`
    /// 4. both present → `?skip=0&name=..&ingredients=..`
    ///
    /// `name` is used as given (not trimmed, not percent-encoded);
    /// `ingredients` goes through [`normalize_ingredients`] first.
    #[must_use]
    pub fn build(skip: u32, name: &str, ingredients: &str) -> Self {
        let ingredients = normalize_ingredients(ingredients);
        let has_name = !name.is_empty();
        let has_ingredients = !ingredients.is_empty();

        let mut query = Self::default();
        if skip != 0 {
            query = Self {
                skip: Some(skip),
                ..Self::default()
            };
        }
        if has_ingredients {
            query = Self {
                skip: Some(0),
                ingredients: Some(ingredients.clone()),
                ..Self::default()
            };
        }
        if has_name {
            query = Self {
                skip: Some(0),
                name: Some(name.to_string()),
                ..Self::default()
            };
        }
        if has_name && has_ingredients {
            query = Self {
                skip: Some(0),
                name: Some(name.to_string()),
                ingredients: Some(ingredients),
            };
        }
        query
    }

    /// The offset the server will apply. `0` when `skip` is omitted.
    #[must_use]
    pub fn effective_skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }

    /// The name parameter, if sent.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The normalized ingredient parameter, if sent.
    #[must_use]
    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    /// Whether any search term is part of the query.
    #[must_use]
    pub fn is_search(&self) -> bool {
        self.name.is_some() || self.ingredients.is_some()
    }

    /// Request path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/dish{self}")
    }
}

impl fmt::Display for DishQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = '?';
        if let Some(skip) = self.skip {
            write!(f, "{sep}skip={skip}")?;
            sep = '&';
        }
        if let Some(name) = &self.name {
            write!(f, "{sep}name={name}")?;
            sep = '&';
        }
        if let Some(ingredients) = &self.ingredients {
            write!(f, "{sep}ingredients={ingredients}")?;
        }
        Ok(())
    }
}
