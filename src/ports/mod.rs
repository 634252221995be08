//! Ports module - the engine's injection seams
//!
//! Every external collaborator the engine talks to is a trait here, so the
//! composition root decides what backs it (HTTP, platform primitive, test
//! double):
//!
//! - `device`: the single audio-output device
//! - `catalog`: read-only track metadata
//! - `engagement`: like/play counters, fire-and-forget
//! - `storage`: device-local key-value persistence
//! - `share`: native share sheet with clipboard fallback
//! - `media_session`: platform transport controls

pub mod catalog;
pub mod device;
pub mod engagement;
pub mod media_session;
pub mod share;
pub mod storage;

pub use catalog::{HttpTrackCatalog, TrackCatalog};
pub use device::{AudioDevice, DeviceEvent};
pub use engagement::{EngagementStore, HttpEngagementStore};
pub use media_session::{MediaSessionPort, NowPlaying, TransportCommand};
pub use share::{ShareRequest, ShareTarget};
pub use storage::{JsonFileStore, KvStore, MemoryStore};
