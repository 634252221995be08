//! Queue operations

use crate::model::{Advisory, Track};

use super::PlaybackEngine;

impl PlaybackEngine {
    /// Append a track to the queue. Duplicates (by id) are rejected with a
    /// user-visible notice.
    pub async fn add_to_queue(&self, track: Track) {
        let mut session = self.session.lock().await;
        let title = track.title.clone();
        let track_id = track.id.clone();
        if session.enqueue_unique(track) {
            tracing::debug!(track_id = %track_id, "Track added to queue");
        } else {
            tracing::debug!(track_id = %track_id, "Track already queued");
            session.set_advisory(Advisory::notice(format!(
                "\"{title}\" is already in the queue"
            )));
        }
    }

    /// Remove a track by id. Removing the current entry does not advance
    /// playback; that stays an explicit `play_next`.
    pub async fn remove_from_queue(&self, track_id: &str) {
        let mut session = self.session.lock().await;
        if session.remove_by_id(track_id) {
            tracing::debug!(track_id, "Track removed from queue");
        }
    }

    pub async fn queue(&self) -> Vec<Track> {
        self.session.lock().await.queue.clone()
    }
}
