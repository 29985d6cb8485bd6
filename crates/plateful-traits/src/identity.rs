//! Identity provider seam.

use async_trait::async_trait;

/// Source of the current authenticated user identity.
///
/// Every remote profile operation requires a resolved user id; absence
/// short-circuits the operation before any remote call is issued.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current authenticated user id, if any.
    async fn current_user_id(&self) -> Option<String>;
}
