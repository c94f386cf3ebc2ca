use std::collections::HashSet;

use crate::error::Result;
use crate::media::{HandleRegistry, MediaStream, RawFile, ResourceHandle};

use super::model::TrackDescriptor;

/// Result of replacing the whole playlist.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Number of files that became tracks.
    pub accepted: usize,
    /// Names of files skipped for not being audio.
    pub skipped: Vec<String>,
    /// Handles of the previous playlist that were revoked.
    pub revoked: usize,
}

/// A descriptor taken out of the playlist, with the active index adjusted
/// for its removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub track: TrackDescriptor,
    pub active: Option<usize>,
}

#[derive(Default)]
pub struct Playlist {
    tracks: Vec<TrackDescriptor>,
    registry: HandleRegistry,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every track with the audio files in `files`, keeping input order.
    ///
    /// Handles of the previous playlist that are not carried over are revoked
    /// exactly once.
    pub fn replace_all(&mut self, files: Vec<RawFile>) -> ReplaceOutcome {
        let mut outcome = ReplaceOutcome::default();
        let mut fresh = Vec::with_capacity(files.len());

        for file in files {
            let name = file.name.clone();
            match self.registry.issue(file) {
                Ok(handle) => fresh.push(TrackDescriptor::new(name, handle)),
                Err(e) => {
                    log::warn!("skipping {e}");
                    outcome.skipped.push(name);
                }
            }
        }

        let kept: HashSet<ResourceHandle> = fresh.iter().map(TrackDescriptor::handle).collect();
        let previous = std::mem::replace(&mut self.tracks, fresh);
        outcome.revoked = self.registry.revoke_all(
            previous
                .iter()
                .map(TrackDescriptor::handle)
                .filter(|h| !kept.contains(h)),
        );
        outcome.accepted = self.tracks.len();
        outcome
    }

    /// Remove the track at `index`, release its handle and return the
    /// adjusted active index. `None` when `index` is out of range.
    ///
    /// Callers must unbind the handle from the media source first.
    pub fn remove_at(&mut self, index: usize, active: Option<usize>) -> Option<Removal> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);
        self.registry.release(track.handle());
        let active = active_after_removal(index, active, self.tracks.len());
        Some(Removal { track, active })
    }

    pub fn open(&self, handle: ResourceHandle) -> Result<MediaStream> {
        self.registry.open(handle)
    }

    pub fn get(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }
}

/// Active index after removing `removed` from a list that now has `len` tracks.
///
/// Removing at or before the active track shifts it back by one so it keeps
/// pointing at the same neighbour, except when it is already the first track.
pub fn active_after_removal(removed: usize, active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(a) if removed <= a && a > 0 => Some(a - 1),
        other => other.map(|a| a.min(len - 1)),
    }
}
