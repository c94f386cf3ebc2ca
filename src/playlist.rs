//! Playlist store: the ordered list of loaded tracks.
//!
//! The store owns every `TrackDescriptor` and, through its `HandleRegistry`,
//! the handles behind them. Handles are only issued and released from here.

mod model;
mod store;

pub use model::*;
pub use store::*;

#[cfg(test)]
mod tests;
