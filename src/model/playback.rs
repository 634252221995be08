//! Playback timing state and read-side snapshots

use std::time::Instant;

use super::track::Track;
use super::types::RepeatMode;

/// Internal timing state for smooth progress reads.
///
/// The device only reports positions on discrete events, so reads interpolate
/// against a monotonic clock while playback is running.
#[derive(Clone, Debug)]
pub struct PlaybackTiming {
    pub position_secs: f64,
    pub duration_secs: f64,
    pub is_playing: bool,
    pub last_update: Instant,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: 0.0,
            is_playing: false,
            last_update: Instant::now(),
        }
    }
}

impl PlaybackTiming {
    /// Current position, interpolated while playing. Never exceeds the known
    /// duration; before metadata loads (duration 0) the raw position passes
    /// through untouched.
    pub fn current_position(&self) -> f64 {
        let base = if self.is_playing {
            self.position_secs + self.last_update.elapsed().as_secs_f64()
        } else {
            self.position_secs
        };
        if self.duration_secs > 0.0 {
            base.min(self.duration_secs)
        } else {
            base
        }
    }

    pub fn set_position(&mut self, position_secs: f64, is_playing: bool) {
        self.position_secs = position_secs.max(0.0);
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    pub fn set_playing(&mut self, is_playing: bool) {
        self.position_secs = self.current_position();
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }
}

/// Snapshot of the session handed to readers (UI, transport surfaces).
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub is_playing: bool,
    pub is_loading: bool,
    pub volume: u8,
    pub is_muted: bool,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub advisory: Option<String>,
}
