//! In-process auth session.

use async_trait::async_trait;
use parking_lot::RwLock;
use plateful_traits::IdentityProvider;

/// Holds the signed-in user id for the current process.
///
/// Stands in for the app's authentication layer; the profile store only
/// sees it through [`IdentityProvider`].
#[derive(Debug, Default)]
pub struct AuthSession {
    current: RwLock<Option<String>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already signed in as `user_id`.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(Some(user_id.into())),
        }
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        *self.current.write() = Some(user_id.into());
    }

    pub fn sign_out(&self) {
        *self.current.write() = None;
    }
}

#[async_trait]
impl IdentityProvider for AuthSession {
    async fn current_user_id(&self) -> Option<String> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let session = AuthSession::new();
        assert_eq!(session.current_user_id().await, None);

        session.sign_in("u1");
        assert_eq!(session.current_user_id().await, Some("u1".to_string()));

        session.sign_out();
        assert_eq!(session.current_user_id().await, None);
    }
}
