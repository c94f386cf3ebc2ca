//! Playback engine: owns the media source and the playlist, exposes
//! transport operations and mirrors source notifications into a read-only
//! `PlaybackState`.
//!
//! Commands only *request* changes from the source. `is_playing`, the
//! authoritative position and the duration change when the source confirms
//! them through its notifications (`PlaybackEngine::pump`).

mod mirror;
mod state;
mod status;
mod transport;

pub use state::*;
pub use status::*;
pub use transport::*;
