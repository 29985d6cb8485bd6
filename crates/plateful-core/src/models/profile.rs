//! Profile data model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-user profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// External identity; immutable for the session.
    pub user_id: String,
    pub name: String,
    /// Raw encoded image bytes, when an image has been fetched.
    pub image: Option<Vec<u8>>,
    /// Ordered dietary/restaurant preference tags.
    pub preferences: Vec<String>,
}

/// Published profile state.
///
/// Updated by the store, polled or subscribed to by the embedding UI layer.
/// Not persisted locally; only the image cache outlives the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileState {
    pub name: String,
    pub image: Option<Vec<u8>>,
    pub preferences: Vec<String>,
    /// Last fetched preference document snapshot.
    pub preference_doc: Option<Value>,
}
