//! In-memory `MediaSource` for tests: notifications without any audio.

use crate::error::{PlayerError, Result};
use crate::media::{MediaStream, ResourceHandle};

use super::probe::ProbeBus;
use super::source::{EventHub, MediaSource, Subscription};
use super::types::{ReadyState, SourceEvent};

/// Media source that behaves like a browser media element without any audio.
#[derive(Default)]
pub struct FakeSource {
    pub hub: EventHub,
    pub bus: ProbeBus,
    pub bound: Option<ResourceHandle>,
    pub binds: usize,
    pub loads: usize,
    pub ready: ReadyState,
    pub playing: bool,
    pub time: f64,
    pub volume: f32,
    /// Data-ready is only reported through `make_ready` when set.
    pub slow: bool,
    pub reject: Option<String>,
}

impl FakeSource {
    pub fn make_ready(&mut self) {
        self.ready = ReadyState::HaveEnoughData;
        self.hub.emit(SourceEvent::DataReady);
    }

    pub fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            self.hub.emit(SourceEvent::Paused);
        }
    }
}

impl MediaSource for FakeSource {
    fn bind(&mut self, handle: ResourceHandle, _stream: MediaStream) {
        self.stop();
        self.bound = Some(handle);
        self.binds += 1;
        self.ready = ReadyState::HaveNothing;
        self.time = 0.0;
    }

    fn unbind(&mut self) {
        self.stop();
        self.bound = None;
        self.ready = ReadyState::HaveNothing;
    }

    fn bound(&self) -> Option<ResourceHandle> {
        self.bound
    }

    fn load(&mut self) {
        self.loads += 1;
        self.ready = ReadyState::HaveMetadata;
        self.hub.emit(SourceEvent::MetadataReady(Some(180.0)));
        self.hub.emit(SourceEvent::DurationChanged(Some(180.0)));
        self.hub.emit(SourceEvent::TimeUpdate(0.0));
        if !self.slow {
            self.make_ready();
        }
    }

    fn play(&mut self) -> Result<()> {
        if let Some(reason) = &self.reject {
            return Err(PlayerError::PlaybackRejected(reason.clone()));
        }
        if self.bound.is_none() {
            return Err(PlayerError::PlaybackRejected("nothing bound".into()));
        }
        if !self.ready.is_playable() {
            return Err(PlayerError::SourceUnready);
        }
        if !self.playing {
            self.playing = true;
            self.hub.emit(SourceEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, secs: f64) {
        self.time = secs;
        self.hub.emit(SourceEvent::TimeUpdate(secs));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn graph(&self) -> ProbeBus {
        self.bus.clone()
    }

    fn subscribe(&mut self) -> Subscription {
        self.hub.subscribe()
    }
}
