//! Audio locator resolution
//!
//! A stored locator is normalized into a fully-qualified URL under the media
//! base, then probed for reachability before it is ever handed to the device.
//! If the primary construction is unreachable, one alternate construction
//! derived from the bare file name is tried; when both fail the load is
//! abandoned with a resolution error instead of assigning a dead URL.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::error::PlayerError;
use crate::model::Track;

/// Lightweight existence probe (HEAD-equivalent) against a candidate URL.
#[async_trait]
pub trait UrlProber: Send + Sync {
    async fn is_reachable(&self, url: &str) -> Result<bool>;
}

/// Prober issuing real HTTP HEAD requests.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("building probe HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProber for HttpProber {
    async fn is_reachable(&self, url: &str) -> Result<bool> {
        let response = self.client.head(url).send().await.context("HEAD request failed")?;
        Ok(response.status().is_success())
    }
}

/// Resolves track locators to playable URLs.
#[derive(Clone)]
pub struct MediaResolver {
    prober: Arc<dyn UrlProber>,
    media_base: String,
    probe_timeout: Duration,
}

impl MediaResolver {
    pub fn new(prober: Arc<dyn UrlProber>, media_base: impl Into<String>, probe_timeout: Duration) -> Self {
        Self {
            prober,
            media_base: media_base.into().trim_end_matches('/').to_string(),
            probe_timeout,
        }
    }

    /// Resolve a track's audio locator to a reachable URL.
    pub async fn resolve(&self, track: &Track) -> Result<String, PlayerError> {
        let locator = match track.audio_path.as_deref().filter(|p| !p.is_empty()) {
            Some(locator) => locator,
            None => {
                return Err(PlayerError::NoAudioSource {
                    title: track.title.clone(),
                });
            }
        };

        let primary = self.qualify(locator);
        if self.probe(&primary).await {
            return Ok(primary);
        }

        let alternate = format!("{}/audio/{}", self.media_base, file_name(locator));
        if alternate != primary && self.probe(&alternate).await {
            tracing::info!(
                track_id = %track.id,
                url = %alternate,
                "Primary locator unreachable, using alternate path"
            );
            return Ok(alternate);
        }

        tracing::warn!(track_id = %track.id, locator, "Audio locator unreachable after retry");
        Err(PlayerError::MediaUnreachable {
            title: track.title.clone(),
        })
    }

    /// Fully qualify a locator under the media base. Absolute URLs pass
    /// through unchanged.
    fn qualify(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!("{}/{}", self.media_base, locator.trim_start_matches('/'))
        }
    }

    async fn probe(&self, url: &str) -> bool {
        match tokio::time::timeout(self.probe_timeout, self.prober.is_reachable(url)).await {
            Ok(Ok(reachable)) => reachable,
            Ok(Err(e)) => {
                tracing::debug!(%url, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(%url, timeout_ms = self.probe_timeout.as_millis() as u64, "Probe timed out");
                false
            }
        }
    }
}

/// Bare file name of a locator, used for the alternate path construction.
fn file_name(locator: &str) -> &str {
    locator.rsplit('/').next().unwrap_or(locator)
}
