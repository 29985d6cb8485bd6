//! Profile image cache storage.
//!
//! Read-through cache for remote profile images. Keys follow the
//! `profileImage_{user_id}` convention; values are the raw encoded bytes
//! exactly as fetched from the blob store.

use anyhow::Result;
use plateful_traits::ImageCache;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const IMAGE_CACHE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("image_cache");

/// Byte-level image cache backed by a single redb table.
#[derive(Debug, Clone)]
pub struct ImageCacheStorage {
    db: Arc<Database>,
}

impl ImageCacheStorage {
    /// Create the cache on an existing database handle.
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(IMAGE_CACHE_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Open (or create) a cache database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);
        Self::new(db)
    }

    /// Get the cached bytes for `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(IMAGE_CACHE_TABLE)?;

        if let Some(value) = table.get(key)? {
            Ok(Some(value.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    /// Store bytes under `key`, replacing any existing entry.
    pub fn put_raw(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(IMAGE_CACHE_TABLE)?;
            table.insert(key, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove the entry for `key`, returning whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(IMAGE_CACHE_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Check if an entry exists for `key`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(IMAGE_CACHE_TABLE)?;
        Ok(table.get(key)?.is_some())
    }
}

impl ImageCache for ImageCacheStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_raw(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.put_raw(key, bytes)
    }

    fn invalidate(&self, key: &str) -> Result<()> {
        if self.remove(key)? {
            tracing::debug!(key, "evicted cached image");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_cache() -> (tempfile::TempDir, ImageCacheStorage) {
        let dir = tempdir().unwrap();
        let cache = ImageCacheStorage::open(dir.path().join("cache.redb")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_put_and_get_bytes() {
        let (_dir, cache) = open_cache();

        cache.put_raw("profileImage_u1", &[1, 2, 3]).unwrap();
        let bytes = cache.get_raw("profileImage_u1").unwrap();

        assert_eq!(bytes, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, cache) = open_cache();

        assert_eq!(cache.get_raw("profileImage_nobody").unwrap(), None);
        assert!(!cache.exists("profileImage_nobody").unwrap());
    }

    #[test]
    fn test_overwrite_entry() {
        let (_dir, cache) = open_cache();

        cache.put_raw("profileImage_u1", &[1, 2, 3]).unwrap();
        cache.put_raw("profileImage_u1", &[4, 5]).unwrap();

        assert_eq!(cache.get_raw("profileImage_u1").unwrap(), Some(vec![4, 5]));
    }

    #[test]
    fn test_invalidate_entry() {
        let (_dir, cache) = open_cache();

        cache.put_raw("profileImage_u1", &[1, 2, 3]).unwrap();
        assert!(cache.remove("profileImage_u1").unwrap());

        assert_eq!(cache.get_raw("profileImage_u1").unwrap(), None);
        assert!(!cache.remove("profileImage_u1").unwrap());
    }

    #[test]
    fn test_entries_are_per_key() {
        let (_dir, cache) = open_cache();

        cache.put_raw("profileImage_u1", b"first").unwrap();
        cache.put_raw("profileImage_u2", b"second").unwrap();
        cache.remove("profileImage_u1").unwrap();

        assert_eq!(cache.get_raw("profileImage_u1").unwrap(), None);
        assert_eq!(
            cache.get_raw("profileImage_u2").unwrap(),
            Some(b"second".to_vec())
        );
    }

    #[test]
    fn test_trait_object_access() {
        let (_dir, cache) = open_cache();
        let cache: std::sync::Arc<dyn ImageCache> = std::sync::Arc::new(cache);

        cache.put("profileImage_u1", &[9, 9]).unwrap();
        assert_eq!(cache.get("profileImage_u1").unwrap(), Some(vec![9, 9]));

        cache.invalidate("profileImage_u1").unwrap();
        assert_eq!(cache.get("profileImage_u1").unwrap(), None);
    }
}
