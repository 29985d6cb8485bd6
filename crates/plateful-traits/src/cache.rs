//! Local image cache seam.

use anyhow::Result;

/// Process-local byte cache keyed by string.
///
/// Consulted before the remote blob store; a miss triggers a remote fetch
/// that populates the cache. Entries live until explicitly invalidated.
pub trait ImageCache: Send + Sync {
    /// Get the cached bytes for `key`, if present.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store bytes under `key`, replacing any existing entry.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove the entry for `key`, if present.
    fn invalidate(&self, key: &str) -> Result<()>;
}
