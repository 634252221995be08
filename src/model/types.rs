//! Core type definitions for the playback session

use std::time::Instant;

/// Repeat mode for the session queue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Severity of a user-facing banner message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice ("Link copied to clipboard")
    Info,
    /// Playback advisory ("This format is not supported")
    Error,
}

/// A user-facing message with its creation time, so stale messages can be
/// expired on read.
#[derive(Clone, Debug)]
pub struct Advisory {
    pub severity: Severity,
    pub message: String,
    pub at: Instant,
}

impl Advisory {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            at: Instant::now(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            at: Instant::now(),
        }
    }
}
