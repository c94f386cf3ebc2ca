use std::fmt;

/// Human-readable status line shown under the player.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// Files are being read from the picker.
    Loading(usize),
    /// The playlist was replaced with this many tracks.
    Loaded(usize),
    /// A track was bound to the source.
    NowLoaded(String),
    /// The source refused to play.
    PlaybackFailed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Ready"),
            Status::Loading(n) => write!(f, "Loading {n} file(s)..."),
            Status::Loaded(n) => write!(f, "Ready. {n} tracks loaded."),
            Status::NowLoaded(name) => write!(f, "Loaded: {name}"),
            Status::PlaybackFailed(reason) => write!(f, "Playback failed: {reason}"),
        }
    }
}
