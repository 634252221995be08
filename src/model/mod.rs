//! Model module - session state and data types
//!
//! Everything the engine owns lives here, organized by responsibility:
//!
//! - `types`: core enums and the advisory banner type
//! - `track`: catalog track metadata
//! - `playback`: timing interpolation and read-side snapshots
//! - `session`: the playback session (queue, flags, load token)
//! - `library`: liked/saved id sets backed by the key-value port

mod library;
mod playback;
mod session;
mod track;
mod types;

pub use library::Library;
pub use playback::{PlaybackInfo, PlaybackTiming};
pub use session::PlaybackSession;
pub use track::Track;
pub use types::{Advisory, RepeatMode, Severity};
