//! Response envelope of the catalog service.
//!
//! Every response body wraps its payload under `data`:
//!
//! ```json
//! { "success": true, "data": { "dishes": [], "totalCount": 0 } }
//! ```
//!
//! Sibling fields are ignored. No further shape checks happen here; a body
//! without `data`, or with a `data` of the wrong shape, fails to decode.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ExplorerError;

/// Outer wrapper around a response payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The unwrapped payload.
    pub data: T,
}

/// Decodes `body` as an [`Envelope`] and returns its payload.
///
/// # Errors
///
/// Returns [`ExplorerError::MalformedEnvelope`] if the body is not JSON or
/// does not match `Envelope<T>`.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ExplorerError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}
