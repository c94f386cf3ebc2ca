//! Error taxonomy shared by the player core.
//!
//! None of these are fatal to a running session: ingestion errors skip the
//! offending file, playback errors surface as status text and seek errors are
//! dropped. Only output-device setup failures abort startup.

use crate::media::ResourceHandle;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// A selected file's declared type is not an accepted audio type.
    #[error("{name}: unsupported media type `{mime}`")]
    UnsupportedMediaType { name: String, mime: String },
    /// The media source refused to start (nothing decodable, device error...).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
    /// An operation needed buffered data the source does not have yet.
    #[error("media source is not ready")]
    SourceUnready,
    /// Seek input that does not parse as a finite number of seconds.
    #[error("invalid seek value `{0}`")]
    InvalidSeekValue(String),
    #[error("resource handle {0} has been revoked")]
    HandleRevoked(ResourceHandle),
    /// Audio output or decoder failure.
    #[error("audio output: {0}")]
    Output(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
