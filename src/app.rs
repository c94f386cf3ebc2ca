//! Application module: the UI model used by the TUI and runtime.
//!
//! `App` holds the playlist cursor and the text prompts (open files, seek).
//! Playback itself lives in the engine; the app only mirrors what to show.

mod model;

pub use model::*;
