use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod http;

pub use http::HttpSource;

/// A backend that answers list queries.
///
/// The controller only ever issues GET-style list queries and treats the
/// backend as opaque: whatever JSON comes back is handed to the envelope
/// mapper. Implementations other than [`HttpSource`] exist for tests.
#[async_trait]
pub trait Source: Send + Sync {
    /// Issue one list query against `path` with the given query parameters
    /// and return the raw response envelope.
    async fn fetch(&self, path: &str, query: &[(&'static str, String)]) -> Result<Value>;

    /// Cheap reachability probe. Advisory only; the controller never calls
    /// it, but frontends may use it to report backend health up front.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
