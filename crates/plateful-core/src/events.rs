//! Profile change events.

use serde::{Deserialize, Serialize};

pub(crate) const BUFFER_CAPACITY: usize = 256;

/// Event types for published profile state changes.
///
/// Delivered over a bounded broadcast channel; lagging subscribers drop
/// events rather than block the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum ProfileEvent {
    NameChanged { user_id: String },
    ImageChanged { user_id: String },
    PreferencesChanged { user_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = ProfileEvent::PreferencesChanged {
            user_id: "u1".to_string(),
        };

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["kind"], "PreferencesChanged");
        assert_eq!(value["data"]["user_id"], "u1");
    }
}
