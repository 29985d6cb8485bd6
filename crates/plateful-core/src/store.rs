//! Profile store: remote reads/writes plus the published state they feed.

use std::sync::Arc;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use parking_lot::RwLock;
use plateful_storage::ImageCacheStorage;
use plateful_traits::{
    BlobStore, DocumentStore, IdentityProvider, ImageCache, ProfileError, Result,
};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::events::{BUFFER_CAPACITY, ProfileEvent};
use crate::models::{Profile, ProfileState};

/// Maximum remote image payload size (1 MiB).
const MAX_IMAGE_BYTES: usize = 1024 * 1024;
/// JPEG quality used for uploads.
const JPEG_QUALITY: u8 = 80;

fn blob_path(user_id: &str) -> String {
    format!("profile_images/{user_id}.jpg")
}

fn cache_key(user_id: &str) -> String {
    format!("profileImage_{user_id}")
}

fn user_doc_path(user_id: &str) -> String {
    format!("users/{user_id}")
}

fn preferences_doc_path(user_id: &str) -> String {
    format!("users/{user_id}/preferences/user_preferences")
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY);
    image
        .write_with_encoder(encoder)
        .map_err(|e| ProfileError::Encoding(e.to_string()))?;
    Ok(data)
}

/// Parse a JSON value as an ordered list of strings.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

/// State holder for one user session's profile.
///
/// Every operation resolves the current user from the injected identity
/// provider; a missing identity fails the operation before any remote call
/// is issued. Operations resolve exactly once; nothing is retried.
/// Completion may land on any runtime thread - UI marshalling belongs to
/// the caller.
pub struct ProfileStore {
    identity: Arc<dyn IdentityProvider>,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    cache: Arc<dyn ImageCache>,
    state: RwLock<ProfileState>,
    events: broadcast::Sender<ProfileEvent>,
}

impl ProfileStore {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        cache: Arc<dyn ImageCache>,
    ) -> Self {
        let (events, _) = broadcast::channel(BUFFER_CAPACITY);
        Self {
            identity,
            documents,
            blobs,
            cache,
            state: RwLock::new(ProfileState::default()),
            events,
        }
    }

    /// Create a store backed by the default on-disk image cache
    /// (`~/.plateful/image_cache.redb`; `PLATEFUL_DIR` override honored).
    pub fn with_default_cache(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> anyhow::Result<Self> {
        let cache = ImageCacheStorage::open(plateful_storage::paths::cache_db_path()?)?;
        Ok(Self::new(identity, documents, blobs, Arc::new(cache)))
    }

    /// Snapshot of the published state.
    pub fn state(&self) -> ProfileState {
        self.state.read().clone()
    }

    /// Subscribe to profile change events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.events.subscribe()
    }

    /// Assemble the full profile record for the current user from the
    /// published state.
    pub async fn profile(&self) -> Result<Profile> {
        let user_id = self.current_user().await?;
        let state = self.state.read().clone();

        Ok(Profile {
            user_id,
            name: state.name,
            image: state.image,
            preferences: state.preferences,
        })
    }

    /// Encode `image` as JPEG and replace the remote profile image.
    ///
    /// The existing blob is deleted first; a delete failure is logged and
    /// swallowed, the put is still issued (delete-then-put, not an atomic
    /// replace). On success the cached copy is invalidated so the next
    /// fetch sees the new image.
    pub async fn upload_profile_image(&self, image: &DynamicImage) -> Result<()> {
        let data = encode_jpeg(image)?;
        let user_id = self.current_user().await?;
        let path = blob_path(&user_id);

        if let Err(e) = self.blobs.delete(&path).await {
            warn!(%user_id, error = %e, "failed to delete existing profile image");
        }

        if let Err(e) = self.blobs.put(&path, &data).await {
            warn!(%user_id, error = %e, "profile image upload failed");
            return Err(e);
        }

        if let Err(e) = self.cache.invalidate(&cache_key(&user_id)) {
            warn!(%user_id, error = %e, "failed to invalidate cached profile image");
        }

        debug!(%user_id, bytes = data.len(), "profile image uploaded");
        self.publish(ProfileEvent::ImageChanged { user_id });
        Ok(())
    }

    /// Fetch the user's display name from the `users` collection.
    ///
    /// A missing document or a missing/non-string `name` field resolve to
    /// `None`.
    pub async fn fetch_user_name(&self) -> Result<Option<String>> {
        let user_id = self.current_user().await?;

        let document = match self.documents.get_document(&user_doc_path(&user_id)).await {
            Ok(document) => document,
            Err(e) => {
                warn!(%user_id, error = %e, "failed to fetch user document");
                return Err(e);
            }
        };

        let name = document
            .as_ref()
            .and_then(|doc| doc.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let Some(name) = name else {
            debug!(%user_id, "user document has no usable name field");
            return Ok(None);
        };

        self.state.write().name = name.clone();
        self.publish(ProfileEvent::NameChanged { user_id });
        Ok(Some(name))
    }

    /// Fetch the profile image, consulting the local cache first.
    ///
    /// A cached copy that still decodes short-circuits the remote fetch;
    /// bytes that no longer decode fall through to the blob store. A blob
    /// that does not exist resolves to `None`.
    pub async fn fetch_profile_image(&self) -> Result<Option<DynamicImage>> {
        let user_id = self.current_user().await?;
        let key = cache_key(&user_id);

        match self.cache.get(&key) {
            Ok(Some(bytes)) => match image::load_from_memory(&bytes) {
                Ok(image) => {
                    debug!(%user_id, "profile image served from cache");
                    self.commit_image(&user_id, bytes);
                    return Ok(Some(image));
                }
                Err(e) => warn!(%user_id, error = %e, "cached profile image no longer decodes"),
            },
            Ok(None) => {}
            Err(e) => warn!(%user_id, error = %e, "image cache read failed"),
        }

        let bytes = match self.blobs.get(&blob_path(&user_id), MAX_IMAGE_BYTES).await {
            Ok(bytes) => bytes,
            Err(ProfileError::NotFound(_)) => {
                debug!(%user_id, "no remote profile image");
                return Ok(None);
            }
            Err(e) => {
                warn!(%user_id, error = %e, "failed to fetch profile image");
                return Err(e);
            }
        };

        let image =
            image::load_from_memory(&bytes).map_err(|e| ProfileError::Decode(e.to_string()))?;

        if let Err(e) = self.cache.put(&key, &bytes) {
            warn!(%user_id, error = %e, "failed to cache profile image");
        }

        self.commit_image(&user_id, bytes);
        Ok(Some(image))
    }

    /// Overwrite the remote preference document with `preferences`.
    ///
    /// Published state is updated before the remote write completes, so
    /// in-memory and remote state can diverge silently on write failure
    /// (last-writer-wins remotely, no merge).
    pub async fn save_preferences(&self, preferences: Vec<String>) -> Result<()> {
        let user_id = self.current_user().await?;

        self.state.write().preferences = preferences.clone();
        self.publish(ProfileEvent::PreferencesChanged {
            user_id: user_id.clone(),
        });

        let document = json!({ "preferences": preferences });
        match self
            .documents
            .set_document(&preferences_doc_path(&user_id), document)
            .await
        {
            Ok(()) => {
                debug!(%user_id, "preferences saved");
                Ok(())
            }
            Err(e) => {
                warn!(%user_id, error = %e, "failed to save preferences");
                Err(e)
            }
        }
    }

    /// Fetch the stored preference list.
    ///
    /// A missing document, a missing field, or a field that is not an array
    /// of strings all resolve to `None`.
    pub async fn fetch_preferences(&self) -> Result<Option<Vec<String>>> {
        let user_id = self.current_user().await?;

        let document = match self
            .documents
            .get_document(&preferences_doc_path(&user_id))
            .await
        {
            Ok(document) => document,
            Err(e) => {
                warn!(%user_id, error = %e, "failed to fetch preferences");
                return Err(e);
            }
        };

        let Some(document) = document else {
            debug!(%user_id, "no preference document");
            return Ok(None);
        };

        let Some(preferences) = string_list(document.get("preferences")) else {
            warn!(%user_id, "preference document has no usable preferences field");
            return Ok(None);
        };

        {
            let mut state = self.state.write();
            state.preferences = preferences.clone();
            state.preference_doc = Some(document);
        }
        self.publish(ProfileEvent::PreferencesChanged { user_id });
        Ok(Some(preferences))
    }

    async fn current_user(&self) -> Result<String> {
        self.identity
            .current_user_id()
            .await
            .ok_or(ProfileError::Unauthenticated)
    }

    fn commit_image(&self, user_id: &str, bytes: Vec<u8>) {
        self.state.write().image = Some(bytes);
        self.publish(ProfileEvent::ImageChanged {
            user_id: user_id.to_string(),
        });
    }

    fn publish(&self, event: ProfileEvent) {
        // Nobody subscribed is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation() {
        assert_eq!(blob_path("u1"), "profile_images/u1.jpg");
        assert_eq!(cache_key("u1"), "profileImage_u1");
        assert_eq!(user_doc_path("u1"), "users/u1");
        assert_eq!(
            preferences_doc_path("u1"),
            "users/u1/preferences/user_preferences"
        );
    }

    #[test]
    fn test_encode_jpeg_produces_decodable_bytes() {
        let image = DynamicImage::new_rgb8(4, 4);

        let bytes = encode_jpeg(&image).unwrap();

        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
        image::load_from_memory(&bytes).unwrap();
    }

    #[test]
    fn test_encode_jpeg_rejects_alpha_formats() {
        // The JPEG encoder has no alpha support; this is the encoding
        // failure mode surfaced to callers.
        let image = DynamicImage::new_rgba8(4, 4);

        let err = encode_jpeg(&image).unwrap_err();

        assert!(matches!(err, ProfileError::Encoding(_)));
    }

    #[test]
    fn test_string_list_filters_non_strings() {
        assert_eq!(
            string_list(Some(&json!(["vegan", "spicy"]))),
            Some(vec!["vegan".to_string(), "spicy".to_string()])
        );
        assert_eq!(string_list(Some(&json!(["vegan", 3]))), None);
        assert_eq!(string_list(Some(&json!("vegan"))), None);
        assert_eq!(string_list(None), None);
    }
}
