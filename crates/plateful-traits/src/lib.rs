//! Plateful Traits - Shared trait definitions and core abstractions.
//!
//! This crate provides the interfaces the profile module consumes:
//! - IdentityProvider: current authenticated user lookup
//! - DocumentStore, BlobStore: remote backend seams
//! - ImageCache: process-local byte cache
//! - ProfileError and the crate-wide Result alias

pub mod cache;
pub mod error;
pub mod identity;
pub mod remote;

pub use cache::ImageCache;
pub use error::{ProfileError, Result};
pub use identity::IdentityProvider;
pub use remote::{BlobStore, DocumentStore};
