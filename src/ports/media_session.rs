//! Media-session port: platform transport controls
//!
//! Output-only integration. The engine publishes now-playing metadata so
//! platform-level transport UIs stay in sync, and drains the command
//! channel to map hardware keys onto its own operations. The platform is
//! never a source of state truth.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Now-playing metadata published to the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
}

/// Transport commands originating from platform controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    Play,
    Pause,
    Next,
    Previous,
    SeekTo(f64),
}

#[async_trait]
pub trait MediaSessionPort: Send + Sync {
    async fn publish(&self, now_playing: NowPlaying) -> Result<()>;
    async fn set_playback_state(&self, is_playing: bool) -> Result<()>;
    async fn clear(&self) -> Result<()>;

    /// Take the transport-command channel. Yields `Some` exactly once.
    async fn take_command_channel(&self) -> Option<mpsc::UnboundedReceiver<TransportCommand>>;
}
