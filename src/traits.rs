use async_trait::async_trait;

use crate::Status;

/// Remote source of deal listings.
///
/// Returns the raw response body of a successful lookup. Transport failures
/// and non-success responses are reported as errors and are considered
/// transient by callers.
#[async_trait]
pub trait DealSource {
    fn id() -> String
    where
        Self: Sized;

    async fn search(&self, title: &str) -> Result<String, Status>;
}

/// Opaque durable string storage addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Status>;
    fn set(&self, key: &str, value: &str) -> Result<(), Status>;
}
