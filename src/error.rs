//! Error taxonomy for the playback engine
//!
//! Nothing here crosses the engine's public boundary as an `Err`: playback
//! operations absorb failures and turn them into user advisories or log
//! lines. These types exist so each failure class maps to a distinct,
//! tailored message.

use thiserror::Error;

/// Device-level failure classes, mirroring what platform media elements
/// report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DeviceErrorKind {
    #[error("playback aborted")]
    Aborted,
    #[error("network failure while streaming")]
    Network,
    #[error("stream could not be decoded")]
    Decode,
    #[error("source format not supported")]
    NotSupported,
    #[error("playback blocked by autoplay policy")]
    AutoplayBlocked,
    #[error("unknown device failure")]
    Unknown,
}

impl DeviceErrorKind {
    /// User-facing advisory for this failure, referencing the track title
    /// where it helps the user act on it.
    pub fn advisory(&self, track_title: &str) -> String {
        match self {
            DeviceErrorKind::Aborted => "Playback was interrupted. Try again.".to_string(),
            DeviceErrorKind::Network => {
                "A network problem interrupted playback. Check your connection and try again."
                    .to_string()
            }
            DeviceErrorKind::Decode => {
                format!("\"{track_title}\" uses an audio format that is not supported on this device.")
            }
            DeviceErrorKind::NotSupported => {
                format!("\"{track_title}\" is not available in a playable format.")
            }
            DeviceErrorKind::AutoplayBlocked => {
                "Playback was blocked by the browser. Press play to start.".to_string()
            }
            DeviceErrorKind::Unknown => {
                "Something went wrong during playback. Please try again.".to_string()
            }
        }
    }
}

/// Failures internal to engine operations.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The track has no audio locator at all
    #[error("\"{title}\" has no audio file attached")]
    NoAudioSource { title: String },

    /// Both the primary and alternate locators failed the reachability probe
    #[error("audio file for \"{title}\" could not be found")]
    MediaUnreachable { title: String },

    #[error("device error: {0}")]
    Device(DeviceErrorKind),

    #[error("could not copy the link to the clipboard")]
    ShareFailed,
}

impl PlayerError {
    /// The advisory shown to the user for this failure.
    pub fn advisory(&self) -> String {
        match self {
            PlayerError::NoAudioSource { title } => {
                format!("\"{title}\" has no audio file. Playback is unavailable.")
            }
            PlayerError::MediaUnreachable { title } => {
                format!("The audio file for \"{title}\" could not be found.")
            }
            PlayerError::Device(kind) => kind.advisory(""),
            PlayerError::ShareFailed => {
                "Sharing failed and the link could not be copied.".to_string()
            }
        }
    }
}
