//! Memory-backed media handles.
//!
//! Selected files are turned into `ResourceHandle`s issued by the
//! `HandleRegistry`. A handle stands in for the file when binding the media
//! source and must be released exactly once by whoever owns it.

mod mime;
mod registry;

pub use mime::*;
pub use registry::*;
