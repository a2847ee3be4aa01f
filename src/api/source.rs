//! The seam between the controller and the network.

use std::future::Future;

use crate::domain::ResultPage;
use crate::error::ExplorerError;

/// Anything that can answer list and suggestion lookups.
///
/// [`crate::api::DishClient`] is the HTTP implementation; tests plug in
/// in-memory sources.
pub trait DishSource: Send + Sync + 'static {
    /// Fetches one page of dishes for the given offset and search terms.
    ///
    /// # Errors
    ///
    /// Returns an [`ExplorerError`] on transport failure, non-2xx status,
    /// or a malformed envelope.
    fn fetch_list(
        &self,
        skip: u32,
        name: &str,
        ingredients: &str,
    ) -> impl Future<Output = Result<ResultPage, ExplorerError>> + Send;

    /// Fetches name suggestions for a non-empty query.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DishSource::fetch_list`].
    fn fetch_suggestions(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, ExplorerError>> + Send;
}
