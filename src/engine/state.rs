/// Lifecycle of the bound track.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing bound.
    #[default]
    Empty,
    /// A track is bound but has not started.
    Ready,
    Playing,
    Paused,
}

/// Snapshot of everything the UI observes about playback.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    /// Playlist position currently loaded into the source.
    pub active_index: Option<usize>,
    pub is_playing: bool,
    pub position_secs: f64,
    /// `None` while unknown.
    pub duration_secs: Option<f64>,
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active_index: None,
            is_playing: false,
            position_secs: 0.0,
            duration_secs: None,
            volume: 1.0,
        }
    }
}

impl PlaybackState {
    /// Fraction of the track played, when the duration is known and non-zero.
    pub fn progress(&self) -> Option<f64> {
        self.duration_secs
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| (self.position_secs / d).clamp(0.0, 1.0))
    }
}
