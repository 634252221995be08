//! Playback control operations

use rand::Rng;

use crate::config::WrapMode;
use crate::error::{DeviceErrorKind, PlayerError};
use crate::model::{Advisory, RepeatMode, Track};
use crate::outbox::EngagementEvent;

use super::PlaybackEngine;

enum PreviousAction {
    Play(Track),
    Restart,
    Nothing,
}

impl PlaybackEngine {
    /// Start playing a track, enqueueing it if it is not already queued.
    ///
    /// Returns immediately; resolution and device assignment continue in the
    /// background. A later `play_track` supersedes this load, and any failure
    /// surfaces as an advisory, never as an error to the caller.
    pub async fn play_track(&self, track: Track) {
        tracing::info!(track_id = %track.id, title = %track.title, "Play requested");

        let token = {
            let mut session = self.session.lock().await;
            session.enqueue_unique(track.clone());
            session.current_track = Some(track.clone());
            session.is_playing = true;
            session.is_loading = true;
            session.timing.duration_secs = track.duration_secs.unwrap_or(0.0);
            session.timing.set_position(0.0, false);
            session.clear_advisory();
            session.mint_load_token()
        };

        self.publish_now_playing(&track).await;

        let engine = self.clone();
        tokio::spawn(async move {
            engine.load_and_start(track, token).await;
        });
    }

    /// Resolve, assign, and start one load attempt. Only commits state while
    /// `token` is still the session's current load. Device assignment is
    /// serialized through the load gate so a superseded load can never land
    /// its source after the load that replaced it.
    async fn load_and_start(&self, track: Track, token: u64) {
        let url = match self.resolver.resolve(&track).await {
            Ok(url) => url,
            Err(e) => {
                self.fail_load(token, &track, &e).await;
                return;
            }
        };

        let _gate = self.load_gate.lock().await;

        if !self.session.lock().await.is_current_load(token) {
            tracing::debug!(track_id = %track.id, "Load superseded before device assignment");
            return;
        }

        if let Err(e) = self.device.load(&url).await {
            tracing::error!(track_id = %track.id, error = %e, "Device rejected source assignment");
            self.fail_load(token, &track, &PlayerError::Device(DeviceErrorKind::Unknown))
                .await;
            return;
        }

        // The token can go stale while the device is loading; a stale load
        // must not touch the device or the session past this point.
        if !self.session.lock().await.is_current_load(token) {
            tracing::debug!(track_id = %track.id, "Load superseded during device assignment");
            return;
        }

        let level = self.session.lock().await.effective_volume();
        if let Err(e) = self.device.set_volume(level).await {
            tracing::debug!(error = %e, "Could not apply volume to device");
        }

        let (is_current, should_play) = {
            let session = self.session.lock().await;
            (session.is_current_load(token), session.is_playing)
        };
        if !is_current {
            return;
        }
        if should_play {
            if let Err(e) = self.device.play().await {
                tracing::warn!(track_id = %track.id, error = %e, "Device refused to start playback");
                let mut session = self.session.lock().await;
                if session.is_current_load(token) {
                    session.is_playing = false;
                    session.is_loading = false;
                    session.timing.set_playing(false);
                    session.set_advisory(Advisory::error(
                        DeviceErrorKind::AutoplayBlocked.advisory(&track.title),
                    ));
                }
                return;
            }
        }

        self.outbox.push(EngagementEvent::PlayRecorded(track.id.clone()));
    }

    async fn fail_load(&self, token: u64, track: &Track, error: &PlayerError) {
        let mut session = self.session.lock().await;
        if !session.is_current_load(token) {
            return;
        }
        session.is_playing = false;
        session.is_loading = false;
        session.timing.set_playing(false);
        session.set_advisory(Advisory::error(error.advisory()));
        tracing::warn!(track_id = %track.id, error = %error, "Track load abandoned");
    }

    /// Flip play/pause. A no-op without a current track; a device rejection
    /// (autoplay policy) reverts to paused with an advisory.
    pub async fn toggle_play(&self) {
        let (current_title, was_playing) = {
            let session = self.session.lock().await;
            match &session.current_track {
                Some(track) => (track.title.clone(), session.is_playing),
                None => return,
            }
        };
        tracing::debug!(was_playing, "Toggling playback");

        if was_playing {
            if let Err(e) = self.device.pause().await {
                tracing::warn!(error = %e, "Device pause failed");
            }
            let mut session = self.session.lock().await;
            session.is_playing = false;
            session.timing.set_playing(false);
        } else {
            match self.device.play().await {
                Ok(()) => {
                    let mut session = self.session.lock().await;
                    session.is_playing = true;
                    session.timing.set_playing(true);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Device rejected playback");
                    let mut session = self.session.lock().await;
                    session.is_playing = false;
                    session.timing.set_playing(false);
                    session.set_advisory(Advisory::error(
                        DeviceErrorKind::AutoplayBlocked.advisory(&current_title),
                    ));
                }
            }
        }

        self.update_platform_playback_state().await;
    }

    /// Advance within the queue. At the tail, wrapping to the head is gated
    /// by the configured [`WrapMode`]; with shuffle on, a random other queue
    /// entry is chosen instead.
    pub async fn play_next(&self) {
        let next = {
            let session = self.session.lock().await;
            let len = session.queue.len();
            if len == 0 {
                return;
            }
            let index = session.current_index();
            let target = if session.shuffle && len > 1 {
                let current = index.unwrap_or(0);
                let mut pick = rand::thread_rng().gen_range(0..len - 1);
                if pick >= current {
                    pick += 1;
                }
                Some(pick)
            } else {
                match index {
                    Some(i) if i + 1 < len => Some(i + 1),
                    Some(_) => match (self.config.wrap_mode, session.repeat) {
                        (WrapMode::Always, _) => Some(0),
                        (WrapMode::RepeatAllOnly, RepeatMode::All) => Some(0),
                        (WrapMode::RepeatAllOnly, _) => None,
                    },
                    // Current track missing from the queue: fall back to the head
                    None => Some(0),
                }
            };
            target.map(|i| session.queue[i].clone())
        };

        match next {
            Some(track) => self.play_track(track).await,
            None => {
                tracing::debug!("End of queue, wrapping disabled; stopping");
                if let Err(e) = self.device.pause().await {
                    tracing::debug!(error = %e, "Device pause at queue end failed");
                }
                let mut session = self.session.lock().await;
                session.is_playing = false;
                session.timing.set_playing(false);
                drop(session);
                self.update_platform_playback_state().await;
            }
        }
    }

    /// Retreat within the queue. At the head the current track restarts from
    /// position zero instead of wrapping.
    pub async fn play_previous(&self) {
        let action = {
            let session = self.session.lock().await;
            match session.current_index() {
                Some(i) if i > 0 => PreviousAction::Play(session.queue[i - 1].clone()),
                Some(_) => PreviousAction::Restart,
                None if !session.queue.is_empty() => {
                    PreviousAction::Play(session.queue[0].clone())
                }
                None if session.current_track.is_some() => PreviousAction::Restart,
                None => PreviousAction::Nothing,
            }
        };

        match action {
            PreviousAction::Play(track) => self.play_track(track).await,
            PreviousAction::Restart => self.seek_to(0.0).await,
            PreviousAction::Nothing => {}
        }
    }

    /// Seek, clamped to `[0, duration]` once the duration is known.
    pub async fn seek_to(&self, position_secs: f64) {
        let clamped = {
            let session = self.session.lock().await;
            let duration = session.timing.duration_secs;
            if duration > 0.0 {
                position_secs.clamp(0.0, duration)
            } else {
                position_secs.max(0.0)
            }
        };

        if let Err(e) = self.device.seek(clamped).await {
            tracing::warn!(error = %e, position_secs = clamped, "Device seek failed");
        }

        let mut session = self.session.lock().await;
        let is_playing = session.timing.is_playing;
        session.timing.set_position(clamped, is_playing);
    }

    // ========================================================================
    // Volume
    // ========================================================================

    /// Set the volume (0..=100). Zero implies mute; a positive volume does
    /// not implicitly unmute.
    pub async fn set_volume(&self, volume: u8) {
        let level = {
            let mut session = self.session.lock().await;
            session.volume = volume.min(100);
            if session.volume == 0 {
                session.is_muted = true;
            }
            session.effective_volume()
        };
        if let Err(e) = self.device.set_volume(level).await {
            tracing::debug!(error = %e, "Could not apply volume to device");
        }
    }

    pub async fn toggle_mute(&self) {
        let level = {
            let mut session = self.session.lock().await;
            session.is_muted = !session.is_muted;
            session.effective_volume()
        };
        if let Err(e) = self.device.set_volume(level).await {
            tracing::debug!(error = %e, "Could not apply mute to device");
        }
    }

    pub async fn volume_up(&self) {
        let volume = self.session.lock().await.volume;
        self.set_volume(volume.saturating_add(5).min(100)).await;
    }

    pub async fn volume_down(&self) {
        let volume = self.session.lock().await.volume;
        self.set_volume(volume.saturating_sub(5)).await;
    }
}
