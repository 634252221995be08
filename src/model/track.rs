//! Track metadata as served by the track catalog
//!
//! Tracks are read-only to the engine. Play and like counters live in the
//! engagement store and are mutated through explicit calls, never locally.

use serde::{Deserialize, Serialize};

/// A single track from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Display name of the uploading artist
    pub artist: String,
    /// Stored audio locator; either an absolute URL or a path relative to the
    /// media base. Absent for tracks whose audio was never attached.
    pub audio_path: Option<String>,
    /// Cover image locator, if any
    #[serde(default)]
    pub cover_path: Option<String>,
    /// Duration in seconds; unknown until the device has loaded metadata
    #[serde(default)]
    pub duration_secs: Option<f64>,
    /// Genre and mood tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            audio_path: None,
            cover_path: None,
            duration_secs: None,
            tags: Vec::new(),
        }
    }

    pub fn with_audio(mut self, locator: impl Into<String>) -> Self {
        self.audio_path = Some(locator.into());
        self
    }
}
