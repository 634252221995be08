//! Track catalog port and its HTTP implementation
//!
//! The catalog is a read-only collaborator: the engine fetches track
//! metadata and locators from it and never writes back.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::model::Track;

#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch a track by id; `None` when the catalog does not know it.
    async fn track(&self, track_id: &str) -> Result<Option<Track>>;
}

/// Catalog backed by the platform REST API.
pub struct HttpTrackCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTrackCatalog {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building catalog HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TrackCatalog for HttpTrackCatalog {
    async fn track(&self, track_id: &str) -> Result<Option<Track>> {
        let url = format!("{}/api/tracks/{}", self.base_url, track_id);
        tracing::debug!(track_id, %url, "Fetching track from catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("catalog request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .context("catalog returned an error status")?;
        let track = response
            .json::<Track>()
            .await
            .context("catalog returned an unreadable track")?;
        Ok(Some(track))
    }
}
