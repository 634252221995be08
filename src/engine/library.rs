//! Like/save bookkeeping and sharing

use crate::error::PlayerError;
use crate::model::{Advisory, Track};
use crate::outbox::EngagementEvent;
use crate::ports::share::ShareRequest;

use super::PlaybackEngine;

impl PlaybackEngine {
    /// Like a track: the local set commits immediately, the counter
    /// increment goes out through the outbox and is never rolled back.
    pub async fn like_track(&self, track_id: &str) {
        if self.library.like(track_id).await {
            tracing::debug!(track_id, "Track liked");
            self.outbox
                .push(EngagementEvent::LikeIncrement(track_id.to_string()));
        }
    }

    pub async fn unlike_track(&self, track_id: &str) {
        if self.library.unlike(track_id).await {
            tracing::debug!(track_id, "Track unliked");
            self.outbox
                .push(EngagementEvent::LikeDecrement(track_id.to_string()));
        }
    }

    /// Save is a purely local bookmark; nothing goes to the engagement store.
    pub async fn save_track(&self, track_id: &str) {
        if self.library.save(track_id).await {
            tracing::debug!(track_id, "Track saved");
        }
    }

    pub async fn unsave_track(&self, track_id: &str) {
        if self.library.unsave(track_id).await {
            tracing::debug!(track_id, "Track unsaved");
        }
    }

    pub async fn is_liked(&self, track_id: &str) -> bool {
        self.library.is_liked(track_id).await
    }

    pub async fn is_saved(&self, track_id: &str) -> bool {
        self.library.is_saved(track_id).await
    }

    /// Hand the track's canonical link to the platform share facility,
    /// falling back to a clipboard copy. Only a failed clipboard write is
    /// surfaced as an error advisory.
    pub async fn share_track(&self, track_id: &str) {
        let track = self.find_track(track_id).await;
        let url = self.config.share_url(track_id);

        let (title, text) = match &track {
            Some(t) => (
                t.title.clone(),
                format!("Listen to \"{}\" by {}", t.title, t.artist),
            ),
            None => ("Shared track".to_string(), "Listen on Tunedeck".to_string()),
        };

        let request = ShareRequest {
            title,
            text,
            url: url.clone(),
        };

        match self.share_target.share(&request).await {
            Ok(()) => {
                tracing::info!(track_id, "Track shared");
            }
            Err(e) => {
                tracing::debug!(track_id, error = %e, "Native share unavailable, copying link");
                match self.share_target.copy_to_clipboard(&url).await {
                    Ok(()) => {
                        let mut session = self.session.lock().await;
                        session.set_advisory(Advisory::notice("Link copied to clipboard"));
                    }
                    Err(e) => {
                        tracing::warn!(track_id, error = %e, "Clipboard write failed");
                        let mut session = self.session.lock().await;
                        session.set_advisory(Advisory::error(PlayerError::ShareFailed.advisory()));
                    }
                }
            }
        }
    }

    /// Look a track up locally first (current track, then queue), then fall
    /// back to the catalog.
    async fn find_track(&self, track_id: &str) -> Option<Track> {
        {
            let session = self.session.lock().await;
            if let Some(current) = &session.current_track {
                if current.id == track_id {
                    return Some(current.clone());
                }
            }
            if let Some(queued) = session.queue.iter().find(|t| t.id == track_id) {
                return Some(queued.clone());
            }
        }

        match self.catalog.track(track_id).await {
            Ok(track) => track,
            Err(e) => {
                tracing::debug!(track_id, error = %e, "Catalog lookup failed");
                None
            }
        }
    }
}
