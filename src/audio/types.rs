//! Audio-related small types shared by media sources and their observers.
//!
//! This module defines the notifications a media source emits and how much
//! data it has buffered.

/// How far a media source has progressed in making its bound stream playable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    /// Nothing bound, or the bound stream has not been looked at yet.
    #[default]
    HaveNothing,
    /// Duration and format are known.
    HaveMetadata,
    /// Enough data to render the current position; analysable.
    HaveCurrentData,
    /// Fully decoded and ready to play through.
    HaveEnoughData,
}

impl ReadyState {
    /// Whether an analyser or a play request can act on the source now.
    pub fn is_playable(self) -> bool {
        self >= ReadyState::HaveCurrentData
    }
}

/// Notifications emitted by a media source, delivered in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    /// Playback started or resumed.
    Started,
    /// Playback paused (including right before `Ended`).
    Paused,
    /// The bound stream played to its end.
    Ended,
    /// Playback position advanced or was set, in seconds.
    TimeUpdate(f64),
    /// Metadata resolved; carries the duration when known.
    MetadataReady(Option<f64>),
    /// Duration changed.
    DurationChanged(Option<f64>),
    /// Enough data buffered to render and analyse the stream.
    DataReady,
    /// The bound stream could not be decoded or played.
    Error(String),
}
