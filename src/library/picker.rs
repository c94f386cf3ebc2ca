use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::Result;
use crate::media::{RawFile, guess_mime, is_accepted_audio};

use super::display::{TrackTags, display_from_fields, needs_tags, read_tags};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_audio_type(path: &Path) -> bool {
    is_accepted_audio(guess_mime(path))
}

/// Audio files below `dir`, ordered by file name within each directory.
fn walk(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_audio_type(p))
        .collect()
}

/// Expand a selection: directories become the audio files inside them,
/// other paths are kept as given. Argument order is preserved.
pub fn expand_selection(inputs: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                walk(input, settings)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

/// Read one selected file.
///
/// Files whose guessed type is not audio are returned without their bytes;
/// the handle registry rejects them on ingestion.
pub fn read_file(path: &Path, settings: &LibrarySettings) -> Result<RawFile> {
    let mime = guess_mime(path).to_string();
    if !is_accepted_audio(&mime) {
        return Ok(RawFile {
            name: display_from_fields(path, &TrackTags::default(), &[], ""),
            mime,
            bytes: Vec::new(),
        });
    }

    let bytes = fs::read(path)?;
    let tags = if needs_tags(&settings.display_fields) {
        read_tags(&bytes)
    } else {
        TrackTags::default()
    };
    let name = display_from_fields(
        path,
        &tags,
        &settings.display_fields,
        &settings.display_separator,
    );

    Ok(RawFile { name, mime, bytes })
}

/// Read every file of a selection, skipping (and logging) unreadable ones.
pub fn read_selection(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<RawFile> {
    paths
        .iter()
        .filter_map(|path| match read_file(path, settings) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                None
            }
        })
        .collect()
}

/// Split prompt input into paths. Whitespace separates paths; double quotes
/// group a path containing spaces; a leading `~/` expands to `$HOME`.
pub fn split_paths(raw: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in raw.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    out.push(expand_home(&current));
                    current.clear();
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        out.push(expand_home(&current));
    }
    out
}

fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}
