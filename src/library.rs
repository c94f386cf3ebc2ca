//! File ingestion: turns user-selected paths into `RawFile`s for the playlist.
//!
//! Directories are walked with the configured depth/hidden/symlink rules.
//! Display names are composed from tags when configured, otherwise the file
//! name is used.

mod display;
mod picker;

pub use display::*;
pub use picker::*;
