//! Device event listener
//!
//! One task per session drains the device's event channel and commits
//! position, duration, and play-state changes back into the session. The
//! end of a stream advances the queue; device failures become per-kind
//! advisories.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::model::{Advisory, RepeatMode};
use crate::ports::device::DeviceEvent;

use super::PlaybackEngine;

impl PlaybackEngine {
    pub(crate) fn start_device_event_listener(
        &self,
        mut events: mpsc::UnboundedReceiver<DeviceEvent>,
    ) -> JoinHandle<()> {
        let engine = self.clone();
        tracing::info!("Starting device event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if engine.is_shutting_down().await {
                    tracing::debug!("Device event listener shutting down");
                    break;
                }
                engine.handle_device_event(event).await;
            }
            tracing::debug!("Device event channel closed");
        })
    }

    async fn handle_device_event(&self, event: DeviceEvent) {
        match event {
            DeviceEvent::LoadedMetadata { duration_secs } => {
                tracing::debug!(duration_secs, "DeviceEvent::LoadedMetadata");
                let mut session = self.session.lock().await;
                session.timing.duration_secs = duration_secs;
                session.is_loading = false;
            }
            DeviceEvent::Playing { position_secs } => {
                tracing::trace!(position_secs, "DeviceEvent::Playing");
                {
                    let mut session = self.session.lock().await;
                    session.is_playing = true;
                    session.is_loading = false;
                    session.timing.set_position(position_secs, true);
                }
                self.update_platform_playback_state().await;
            }
            DeviceEvent::Paused { position_secs } => {
                tracing::debug!(position_secs, "DeviceEvent::Paused");
                {
                    let mut session = self.session.lock().await;
                    session.is_playing = false;
                    session.timing.set_position(position_secs, false);
                }
                self.update_platform_playback_state().await;
            }
            DeviceEvent::PositionChanged { position_secs } => {
                tracing::trace!(position_secs, "DeviceEvent::PositionChanged");
                let mut session = self.session.lock().await;
                let is_playing = session.is_playing;
                session.timing.set_position(position_secs, is_playing);
            }
            DeviceEvent::Ended => {
                tracing::debug!("DeviceEvent::Ended");
                self.handle_track_ended().await;
            }
            DeviceEvent::Failed(kind) => {
                let title = self
                    .current_track()
                    .await
                    .map(|t| t.title)
                    .unwrap_or_default();
                tracing::warn!(kind = %kind, track = %title, "Device reported a failure");
                let mut session = self.session.lock().await;
                session.is_playing = false;
                session.is_loading = false;
                session.timing.set_playing(false);
                session.set_advisory(Advisory::error(kind.advisory(&title)));
            }
        }
    }

    async fn handle_track_ended(&self) {
        let repeat = self.session.lock().await.repeat;

        if repeat == RepeatMode::One {
            self.seek_to(0.0).await;
            match self.device.play().await {
                Ok(()) => {
                    let mut session = self.session.lock().await;
                    session.is_playing = true;
                    session.timing.set_playing(true);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Could not restart track for repeat-one");
                    let mut session = self.session.lock().await;
                    session.is_playing = false;
                    session.timing.set_playing(false);
                }
            }
        } else {
            self.play_next().await;
        }
    }
}
