use std::path::PathBuf;

use crate::audio::{MediaSource, RodioSource};
use crate::config::{LibrarySettings, Settings};
use crate::engine::PlaybackEngine;
use crate::error::Result;
use crate::library::{expand_selection, read_selection};

/// Open the output device and build the engine around it.
pub fn build_engine(settings: &Settings) -> Result<PlaybackEngine<RodioSource>> {
    let source = RodioSource::open(&settings.audio)?;
    let mut engine = PlaybackEngine::new(source, &settings.playback);
    engine.set_volume(settings.audio.initial_volume);
    Ok(engine)
}

/// Replace the playlist with a file selection. A selection with nothing
/// readable in it keeps the current playlist. Returns the number of tracks
/// accepted.
pub fn open_selection<S: MediaSource>(
    engine: &mut PlaybackEngine<S>,
    inputs: &[PathBuf],
    library: &LibrarySettings,
) -> usize {
    if inputs.is_empty() {
        return 0;
    }

    let paths = expand_selection(inputs, library);
    if paths.is_empty() {
        log::warn!("nothing to open in {} path(s)", inputs.len());
        return 0;
    }

    let files = read_selection(&paths, library);
    if files.is_empty() {
        log::warn!("none of {} selected file(s) could be read", paths.len());
        return 0;
    }

    engine.begin_loading(files.len());
    engine.replace_playlist(files).accepted
}
