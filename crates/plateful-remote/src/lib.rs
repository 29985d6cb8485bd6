//! Plateful Remote - HTTP clients for the profile backend.
//!
//! Thin reqwest-based implementations of the `DocumentStore` and `BlobStore`
//! seams from `plateful-traits`. All wire detail stays in this crate; the
//! profile store only ever sees the traits.

pub mod blobs;
pub mod documents;
mod http;

pub use blobs::RestBlobStore;
pub use documents::RestDocumentStore;
