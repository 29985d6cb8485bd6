//! REST client for the remote blob store.

use async_trait::async_trait;
use plateful_traits::{BlobStore, ProfileError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

use crate::http::build_http_client;

/// Blob store client for binary objects under `{base_url}/blobs/{path}`.
pub struct RestBlobStore {
    client: Client,
    base_url: String,
}

impl RestBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_http_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn blob_url(&self, path: &str) -> String {
        format!("{}/blobs/{}", self.base_url, path)
    }
}

#[async_trait]
impl BlobStore for RestBlobStore {
    async fn get(&self, path: &str, max_size: usize) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.blob_url(path))
            .send()
            .await
            .map_err(|e| ProfileError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(path, "blob not found");
                Err(ProfileError::NotFound(path.to_string()))
            }
            status if status.is_success() => {
                if let Some(len) = response.content_length()
                    && len as usize > max_size
                {
                    return Err(ProfileError::Transport(format!(
                        "blob {path} is {len} bytes, over the {max_size} byte cap"
                    )));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ProfileError::Transport(e.to_string()))?;

                // Chunked responses carry no content-length; re-check the body.
                if bytes.len() > max_size {
                    return Err(ProfileError::Transport(format!(
                        "blob {path} is {} bytes, over the {max_size} byte cap",
                        bytes.len()
                    )));
                }

                Ok(bytes.to_vec())
            }
            status => Err(ProfileError::Transport(format!(
                "GET {path} returned {status}"
            ))),
        }
    }

    async fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let response = self
            .client
            .put(self.blob_url(path))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| ProfileError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProfileError::Transport(format!(
                "PUT {path} returned {}",
                response.status()
            )))
        }
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.blob_url(path))
            .send()
            .await
            .map_err(|e| ProfileError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProfileError::NotFound(path.to_string())),
            status if status.is_success() => Ok(()),
            status => Err(ProfileError::Transport(format!(
                "DELETE {path} returned {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONE_MIB: usize = 1024 * 1024;

    #[tokio::test]
    async fn test_get_blob_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blobs/profile_images/u1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        let bytes = store.get("profile_images/u1.jpg", ONE_MIB).await.unwrap();

        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_get_missing_blob_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blobs/profile_images/ghost.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        let err = store
            .get("profile_images/ghost.jpg", ONE_MIB)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_enforces_byte_cap() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blobs/profile_images/u1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        let err = store.get("profile_images/u1.jpg", 16).await.unwrap_err();

        assert!(matches!(err, ProfileError::Transport(_)));
    }

    #[tokio::test]
    async fn test_put_blob_sends_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/blobs/profile_images/u1.jpg"))
            .and(body_bytes(vec![1, 2, 3]))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        store.put("profile_images/u1.jpg", &[1, 2, 3]).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_blob_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/blobs/profile_images/u1.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        let err = store.delete("profile_images/u1.jpg").await.unwrap_err();

        assert!(matches!(err, ProfileError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_existing_blob() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/blobs/profile_images/u1.jpg"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = RestBlobStore::new(server.uri());
        store.delete("profile_images/u1.jpg").await.unwrap();
    }
}
