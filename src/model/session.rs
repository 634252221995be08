//! The playback session: current track, queue, and device-facing flags
//!
//! One `PlaybackSession` exists per application run. It is owned by the
//! engine behind a mutex; everything here is synchronous bookkeeping, the
//! async edges live in the engine.

use std::time::Duration;

use super::playback::{PlaybackInfo, PlaybackTiming};
use super::track::Track;
use super::types::{Advisory, RepeatMode};

#[derive(Debug)]
pub struct PlaybackSession {
    pub current_track: Option<Track>,
    /// Insertion-ordered play queue, unique by track id
    pub queue: Vec<Track>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub timing: PlaybackTiming,
    /// 0..=100
    pub volume: u8,
    pub is_muted: bool,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    load_token: u64,
    advisory: Option<Advisory>,
    advisory_ttl: Duration,
}

impl PlaybackSession {
    pub fn new(default_volume: u8, advisory_ttl: Duration) -> Self {
        Self {
            current_track: None,
            queue: Vec::new(),
            is_playing: false,
            is_loading: false,
            timing: PlaybackTiming::default(),
            volume: default_volume.min(100),
            is_muted: false,
            repeat: RepeatMode::Off,
            shuffle: false,
            load_token: 0,
            advisory: None,
            advisory_ttl,
        }
    }

    // ========================================================================
    // Queue
    // ========================================================================

    pub fn queue_contains(&self, track_id: &str) -> bool {
        self.queue.iter().any(|t| t.id == track_id)
    }

    /// Append a track unless its id is already queued. Returns whether the
    /// queue changed.
    pub fn enqueue_unique(&mut self, track: Track) -> bool {
        if self.queue_contains(&track.id) {
            return false;
        }
        self.queue.push(track);
        true
    }

    /// Remove a track by id. `current_track` is left alone even when it is
    /// the removed entry; advancing is an explicit caller decision.
    pub fn remove_by_id(&mut self, track_id: &str) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != track_id);
        self.queue.len() != before
    }

    /// Index of the current track within the queue, if it is queued.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.queue.iter().position(|t| t.id == current.id)
    }

    // ========================================================================
    // Load token
    // ========================================================================

    /// Mint a new load token, superseding any in-flight load. Only the load
    /// holding the latest token may commit its completion.
    pub fn mint_load_token(&mut self) -> u64 {
        self.load_token += 1;
        self.load_token
    }

    pub fn is_current_load(&self, token: u64) -> bool {
        self.load_token == token
    }

    // ========================================================================
    // Volume
    // ========================================================================

    /// Device output level; mute always wins.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted {
            0.0
        } else {
            f32::from(self.volume) / 100.0
        }
    }

    // ========================================================================
    // Advisories
    // ========================================================================

    pub fn set_advisory(&mut self, advisory: Advisory) {
        self.advisory = Some(advisory);
    }

    pub fn clear_advisory(&mut self) {
        self.advisory = None;
    }

    /// Latest banner message, expiring it first if it has outlived its TTL.
    pub fn advisory(&mut self) -> Option<Advisory> {
        if let Some(adv) = &self.advisory {
            if adv.at.elapsed() > self.advisory_ttl {
                self.advisory = None;
            }
        }
        self.advisory.clone()
    }

    pub fn snapshot(&mut self) -> PlaybackInfo {
        let advisory = self.advisory().map(|a| a.message);
        PlaybackInfo {
            track: self.current_track.clone(),
            position_secs: self.timing.current_position(),
            duration_secs: self.timing.duration_secs,
            is_playing: self.is_playing,
            is_loading: self.is_loading,
            volume: self.volume,
            is_muted: self.is_muted,
            repeat: self.repeat,
            shuffle: self.shuffle,
            advisory,
        }
    }
}
