use crate::media::ResourceHandle;

/// A loaded track: display name plus the handle to its bytes.
///
/// Immutable once created; the handle is released when the descriptor leaves
/// the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    name: String,
    handle: ResourceHandle,
}

impl TrackDescriptor {
    pub(crate) fn new(name: String, handle: ResourceHandle) -> Self {
        Self { name, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> ResourceHandle {
        self.handle
    }
}
