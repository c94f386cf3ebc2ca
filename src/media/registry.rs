use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{PlayerError, Result};

use super::mime::is_accepted_audio;

/// One selected file as handed over by the file picker.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Opaque identifier for a memory-backed byte source.
///
/// Identity is the only meaningful comparison; two handles issued for the same
/// bytes are still distinct.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(u64);

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:yinyang/{:08x}", self.0)
    }
}

/// Bytes plus declared type, ready to be decoded by a media source.
#[derive(Debug, Clone)]
pub struct MediaStream {
    pub bytes: Arc<[u8]>,
    pub mime: String,
}

struct Entry {
    name: String,
    stream: MediaStream,
}

/// Arena of live handles keyed by identity.
///
/// Release is idempotent here, but owners are still expected to release each
/// handle once; a second release is logged.
#[derive(Default)]
pub struct HandleRegistry {
    next_id: u64,
    live: HashMap<ResourceHandle, Entry>,
    released: u64,
}

impl HandleRegistry {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a handle for `file`, or reject it when its declared type is not audio.
    pub fn issue(&mut self, file: RawFile) -> Result<ResourceHandle> {
        if !is_accepted_audio(&file.mime) {
            return Err(PlayerError::UnsupportedMediaType {
                name: file.name,
                mime: file.mime,
            });
        }

        self.next_id += 1;
        let handle = ResourceHandle(self.next_id);
        log::debug!("issued {handle} for {}", file.name);
        self.live.insert(
            handle,
            Entry {
                name: file.name,
                stream: MediaStream {
                    bytes: Arc::from(file.bytes),
                    mime: file.mime,
                },
            },
        );
        Ok(handle)
    }

    /// Release `handle`. Returns `false` if it was not live.
    pub fn release(&mut self, handle: ResourceHandle) -> bool {
        match self.live.remove(&handle) {
            Some(entry) => {
                self.released += 1;
                log::debug!("revoked {handle} ({})", entry.name);
                true
            }
            None => {
                log::warn!("release of {handle} ignored: not live");
                false
            }
        }
    }

    /// Bulk release, returning how many handles were actually live.
    pub fn revoke_all<I>(&mut self, handles: I) -> usize
    where
        I: IntoIterator<Item = ResourceHandle>,
    {
        handles
            .into_iter()
            .filter(|&h| self.release(h))
            .count()
    }

    /// Open the byte stream behind a live handle.
    pub fn open(&self, handle: ResourceHandle) -> Result<MediaStream> {
        self.live
            .get(&handle)
            .map(|e| e.stream.clone())
            .ok_or(PlayerError::HandleRevoked(handle))
    }

    pub fn is_live(&self, handle: ResourceHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total number of successful releases over the registry's lifetime.
    pub fn released_count(&self) -> u64 {
        self.released
    }
}
