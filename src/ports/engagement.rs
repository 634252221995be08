//! Engagement store port and its HTTP implementation
//!
//! Records like counters and play events. Every call is best-effort; the
//! outbox retries and then drops, so implementations just report failure
//! and let the caller decide.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn increment_like_count(&self, track_id: &str) -> Result<()>;
    async fn decrement_like_count(&self, track_id: &str) -> Result<()>;
    async fn record_play_start(&self, track_id: &str) -> Result<()>;
}

/// Engagement store backed by the platform REST API.
pub struct HttpEngagementStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEngagementStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building engagement HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, track_id: &str, action: &str) -> Result<()> {
        let url = format!("{}/api/tracks/{}/{}", self.base_url, track_id, action);
        self.client
            .post(&url)
            .send()
            .await
            .with_context(|| format!("engagement call {action} failed"))?
            .error_for_status()
            .with_context(|| format!("engagement call {action} rejected"))?;
        Ok(())
    }
}

#[async_trait]
impl EngagementStore for HttpEngagementStore {
    async fn increment_like_count(&self, track_id: &str) -> Result<()> {
        self.post(track_id, "like").await
    }

    async fn decrement_like_count(&self, track_id: &str) -> Result<()> {
        self.post(track_id, "unlike").await
    }

    async fn record_play_start(&self, track_id: &str) -> Result<()> {
        self.post(track_id, "plays").await
    }
}
