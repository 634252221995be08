//! Audio-output device port
//!
//! Exactly one device exists per session and only the engine drives it. The
//! device decodes and plays one stream at a time; everything it knows about
//! playback progress comes back over its event channel.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::DeviceErrorKind;

/// Events emitted by the audio device, delivered on the engine's runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceEvent {
    /// Stream metadata became available after a load
    LoadedMetadata { duration_secs: f64 },
    Playing { position_secs: f64 },
    Paused { position_secs: f64 },
    PositionChanged { position_secs: f64 },
    /// The current stream played to completion
    Ended,
    Failed(DeviceErrorKind),
}

/// The platform audio primitive, abstracted so the engine can run against
/// a browser media element, a native pipeline, or a test double.
#[async_trait]
pub trait AudioDevice: Send + Sync {
    /// Assign a new source URL, resetting any in-progress playback.
    async fn load(&self, url: &str) -> Result<()>;

    /// Begin or resume playback. Platforms with autoplay policies may
    /// reject this; the rejection comes back as an error here.
    async fn play(&self) -> Result<()>;

    async fn pause(&self) -> Result<()>;

    async fn seek(&self, position_secs: f64) -> Result<()>;

    /// Output level in `0.0..=1.0`.
    async fn set_volume(&self, level: f32) -> Result<()>;

    /// Stop playback and release the current source.
    async fn stop(&self) -> Result<()>;

    /// Take the device's event channel. Yields `Some` exactly once; the
    /// engine owns the receiver for the rest of the session.
    async fn take_event_channel(&self) -> Option<mpsc::UnboundedReceiver<DeviceEvent>>;
}
