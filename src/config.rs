//! Engine configuration

use std::time::Duration;

use serde::Deserialize;

/// Queue wrap policy for `play_next` at the tail of the queue.
///
/// The reference player always wrapped, folding repeat-all into the default
/// advance. The policy is explicit here so a deployment can gate wrapping on
/// the repeat mode instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Wrap to the head regardless of repeat mode (reference behavior)
    #[default]
    Always,
    /// Wrap only when repeat mode is `All`; otherwise stop at the tail
    RepeatAllOnly,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the media storage namespace audio locators resolve under
    pub media_base_url: String,
    /// Base URL used to build canonical share links
    pub share_base_url: String,
    /// Upper bound on each reachability probe
    pub probe_timeout_ms: u64,
    pub wrap_mode: WrapMode,
    /// Initial volume, 0..=100
    pub default_volume: u8,
    /// How long a banner message stays visible
    pub advisory_ttl_ms: u64,
    /// Delivery attempts per engagement event before it is dropped
    pub outbox_retry_limit: u32,
    /// First retry backoff; doubles per attempt
    pub outbox_retry_base_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            media_base_url: "https://media.tunedeck.app".to_string(),
            share_base_url: "https://tunedeck.app".to_string(),
            probe_timeout_ms: 5_000,
            wrap_mode: WrapMode::Always,
            default_volume: 70,
            advisory_ttl_ms: 5_000,
            outbox_retry_limit: 3,
            outbox_retry_base_ms: 500,
        }
    }
}

impl EngineConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn advisory_ttl(&self) -> Duration {
        Duration::from_millis(self.advisory_ttl_ms)
    }

    pub fn outbox_retry_base(&self) -> Duration {
        Duration::from_millis(self.outbox_retry_base_ms)
    }

    /// Canonical shareable link for a track.
    pub fn share_url(&self, track_id: &str) -> String {
        format!("{}/track/{}", self.share_base_url.trim_end_matches('/'), track_id)
    }
}
