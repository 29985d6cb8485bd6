//! Plateful Core - profile state holder and synchronization logic.
//!
//! The profile module of a restaurant-discovery app: display name, profile
//! photo, and dietary preference tags, read from and written to a remote
//! document database and blob store, with a local read-through image cache.
//!
//! The embedding application drives everything: it calls one of
//! [`ProfileStore`]'s async operations and consumes the published
//! [`ProfileState`] (by polling or via the [`ProfileEvent`] bus). Thread
//! marshalling back to a UI context is the caller's concern.

pub mod auth;
pub mod events;
pub mod models;
pub mod store;

pub use auth::AuthSession;
pub use events::ProfileEvent;
pub use models::{Profile, ProfileState};
pub use store::ProfileStore;
