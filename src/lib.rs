//! Tunedeck playback engine
//!
//! The client-side core of a music streaming platform: one
//! [`PlaybackEngine`] owns the playback session (current track, queue,
//! shuffle/repeat, volume, liked/saved sets) and drives a single abstract
//! audio-output device. External collaborators - the track catalog, the
//! engagement store, local storage, sharing, and platform transport
//! controls - are injected through the traits in [`ports`].
//!
//! Playback operations never fail toward the caller: every failure path
//! ends in a state reset plus a user-visible advisory, or a log line.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod outbox;
pub mod ports;
pub mod resolve;

pub use config::{EngineConfig, WrapMode};
pub use engine::{EnginePorts, PlaybackEngine};
pub use error::{DeviceErrorKind, PlayerError};
pub use model::{Advisory, PlaybackInfo, RepeatMode, Severity, Track};
pub use outbox::EngagementEvent;
pub use resolve::{HttpProber, MediaResolver, UrlProber};
