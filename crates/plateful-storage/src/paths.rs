//! Path utilities for Plateful directory resolution.

use anyhow::Result;
use std::path::PathBuf;

const PLATEFUL_DIR: &str = ".plateful";
const CACHE_DB_FILE: &str = "image_cache.redb";

/// Environment variable to override the Plateful data directory.
const PLATEFUL_DIR_ENV: &str = "PLATEFUL_DIR";

/// Resolve the Plateful data directory.
/// Priority: PLATEFUL_DIR env var > ~/.plateful/
pub fn resolve_plateful_dir() -> Result<PathBuf> {
    match std::env::var(PLATEFUL_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::home_dir()
            .map(|home| home.join(PLATEFUL_DIR))
            .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory")),
    }
}

/// Ensure the data directory exists and return its path.
pub fn ensure_plateful_dir() -> Result<PathBuf> {
    let dir = resolve_plateful_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default image cache database path: ~/.plateful/image_cache.redb
pub fn cache_db_path() -> Result<PathBuf> {
    Ok(ensure_plateful_dir()?.join(CACHE_DB_FILE))
}
