//! HTTP implementation of [`DishSource`].

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::envelope::unwrap_envelope;
use super::query::DishQuery;
use super::source::DishSource;
use crate::config::ExplorerConfig;
use crate::domain::ResultPage;
use crate::error::ExplorerError;

/// Catalog client backed by a [`reqwest::Client`].
///
/// Base URL and the static `Authorization` header come from the injected
/// [`ExplorerConfig`]. No caching, no retries.
#[derive(Debug, Clone)]
pub struct DishClient {
    http: reqwest::Client,
    base_url: String,
    suggestion_path: String,
}

impl DishClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidConfig`] if the auth token is not a
    /// valid header value, or [`ExplorerError::Transport`] if the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&config.auth_token).map_err(|e| {
            ExplorerError::InvalidConfig(format!("API_AUTH_TOKEN is not a header value: {e}"))
        })?;
        headers.insert(AUTHORIZATION, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            suggestion_path: config.suggestion_path.clone(),
        })
    }

    /// Full URL of a list request.
    #[must_use]
    pub fn list_url(&self, query: &DishQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }

    /// Full URL of a suggestion request. `query` is inserted raw.
    #[must_use]
    pub fn suggestion_url(&self, query: &str) -> String {
        format!("{}{}?name={query}", self.base_url, self.suggestion_path)
    }

    async fn get_payload<T: DeserializeOwned>(&self, url: &str) -> Result<T, ExplorerError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        unwrap_envelope(&body)
    }
}

impl DishSource for DishClient {
    async fn fetch_list(
        &self,
        skip: u32,
        name: &str,
        ingredients: &str,
    ) -> Result<ResultPage, ExplorerError> {
        let query = DishQuery::build(skip, name, ingredients);
        let url = self.list_url(&query);
        tracing::debug!(
            %url,
            requested_skip = skip,
            effective_skip = query.effective_skip(),
            search = query.is_search(),
            "fetching dishes"
        );
        let page: ResultPage = self.get_payload(&url).await?;
        tracing::debug!(
            returned = page.dishes.len(),
            total_count = page.total_count,
            "dishes fetched"
        );
        Ok(page)
    }

    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>, ExplorerError> {
        let url = self.suggestion_url(query);
        tracing::debug!(%url, "fetching suggestions");
        self.get_payload(&url).await
    }
}
