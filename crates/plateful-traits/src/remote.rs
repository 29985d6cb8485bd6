//! Remote backend abstractions.
//!
//! The profile store talks to its backend through these seams; the concrete
//! clients live in `plateful-remote`, and tests supply in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Remote document database.
///
/// Documents are JSON-like values addressed by slash-separated
/// collection/document paths (e.g. `users/{user_id}`).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. Resolves `Ok(None)` when no document exists at `path`.
    async fn get_document(&self, path: &str) -> Result<Option<Value>>;

    /// Overwrite the document at `path` wholesale (no merge).
    async fn set_document(&self, path: &str, document: Value) -> Result<()>;
}

/// Remote binary object store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the object at `path`, bounded to `max_size` bytes.
    async fn get(&self, path: &str, max_size: usize) -> Result<Vec<u8>>;

    /// Store an object at `path`, replacing any existing contents.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Delete the object at `path`.
    async fn delete(&self, path: &str) -> Result<()>;
}
