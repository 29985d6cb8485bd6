//! REST client for the remote document database.

use async_trait::async_trait;
use plateful_traits::{DocumentStore, ProfileError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::http::build_http_client;

/// Document database client speaking plain JSON over HTTP.
///
/// Documents live under `{base_url}/documents/{path}` where `path` is the
/// slash-separated collection/document path (e.g. `users/u1`).
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
}

impl RestDocumentStore {
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

    fn document_url(&self, path: &str) -> String {
        format!("{}/documents/{}", self.base_url, path)
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get_document(&self, path: &str) -> Result<Option<Value>> {
        let response = self
            .client
            .get(self.document_url(path))
            .send()
            .await
            .map_err(|e| ProfileError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(path, "document not found");
                Ok(None)
            }
            status if status.is_success() => {
                let document = response
                    .json::<Value>()
                    .await
                    .map_err(|e| ProfileError::Malformed(e.to_string()))?;
                Ok(Some(document))
            }
            status => Err(ProfileError::Transport(format!(
                "GET {path} returned {status}"
            ))),
        }
    }

    async fn set_document(&self, path: &str, document: Value) -> Result<()> {
        let response = self
            .client
            .put(self.document_url(path))
            .json(&document)
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
}
