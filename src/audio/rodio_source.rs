//! `MediaSource` backed by a `rodio` sink on the default output device.
//!
//! Bound streams are decoded from memory; the decoded source is wrapped in a
//! `Probe` so analysers can watch what is actually being played.

use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::config::AudioSettings;
use crate::error::{PlayerError, Result};
use crate::media::{MediaStream, ResourceHandle};

use super::probe::{Probe, ProbeBus};
use super::source::{EventHub, MediaSource, Subscription};
use super::types::{ReadyState, SourceEvent};

pub struct RodioSource {
    stream: OutputStream,
    sink: Option<Sink>,
    bound: Option<(ResourceHandle, MediaStream)>,
    hub: EventHub,
    bus: ProbeBus,
    volume: f32,
    duration: Option<f64>,
    ready: ReadyState,
    playing: bool,
    last_time_update: Instant,
    time_update_every: Duration,
}

impl RodioSource {
    /// Open the default output device.
    pub fn open(settings: &AudioSettings) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            bound: None,
            hub: EventHub::new(),
            bus: ProbeBus::new(),
            volume: settings.initial_volume.clamp(0.0, 1.0),
            duration: None,
            ready: ReadyState::HaveNothing,
            playing: false,
            last_time_update: Instant::now(),
            time_update_every: Duration::from_millis(settings.time_update_ms),
        })
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        if self.playing {
            self.playing = false;
            self.hub.emit(SourceEvent::Paused);
        }
    }
}

/// Container-level duration for streams the decoder cannot measure (VBR mp3...).
fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = lofty::probe::Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    let d = tagged.properties().duration();
    (!d.is_zero()).then_some(d)
}

impl MediaSource for RodioSource {
    fn bind(&mut self, handle: ResourceHandle, stream: MediaStream) {
        self.stop_sink();
        log::info!("binding {handle} ({})", stream.mime);
        self.bound = Some((handle, stream));
        self.ready = ReadyState::HaveNothing;
        self.duration = None;
    }

    fn unbind(&mut self) {
        self.stop_sink();
        if let Some((handle, _)) = self.bound.take() {
            log::info!("unbound {handle}");
        }
        self.ready = ReadyState::HaveNothing;
        self.duration = None;
    }

    fn bound(&self) -> Option<ResourceHandle> {
        self.bound.as_ref().map(|(h, _)| *h)
    }

    fn load(&mut self) {
        self.stop_sink();
        let Some((handle, stream)) = self.bound.clone() else {
            return;
        };

        let bytes: Arc<[u8]> = stream.bytes.clone();
        let decoder = match Decoder::new(Cursor::new(bytes)) {
            Ok(d) => d,
            Err(e) => {
                self.ready = ReadyState::HaveNothing;
                self.hub.emit(SourceEvent::Error(format!("{handle}: {e}")));
                return;
            }
        };

        let duration = decoder
            .total_duration()
            .or_else(|| probe_duration(&stream.bytes))
            .map(|d| d.as_secs_f64());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(Probe::new(decoder, self.bus.clone()));
        self.sink = Some(sink);
        self.duration = duration;

        self.ready = ReadyState::HaveMetadata;
        self.hub.emit(SourceEvent::MetadataReady(duration));
        self.hub.emit(SourceEvent::DurationChanged(duration));

        self.ready = ReadyState::HaveEnoughData;
        self.hub.emit(SourceEvent::TimeUpdate(0.0));
        self.hub.emit(SourceEvent::DataReady);
    }

    fn play(&mut self) -> Result<()> {
        if self.bound.is_none() {
            return Err(PlayerError::PlaybackRejected("no stream bound".to_string()));
        }
        if !self.ready.is_playable() {
            return Err(PlayerError::SourceUnready);
        }
        // A drained sink means the stream ended; playing again starts over.
        if self.sink.as_ref().is_none_or(Sink::empty) {
            self.load();
        }
        let Some(sink) = self.sink.as_ref() else {
            return Err(PlayerError::PlaybackRejected(
                "stream could not be decoded".to_string(),
            ));
        };

        sink.play();
        if !self.playing {
            self.playing = true;
            self.last_time_update = Instant::now();
            self.hub.emit(SourceEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        if self.playing {
            self.playing = false;
            self.hub.emit(SourceEvent::Paused);
        }
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let Ok(target) = Duration::try_from_secs_f64(secs.max(0.0)) else {
            log::warn!("seek to {secs}s ignored: out of range");
            return;
        };
        if let Err(e) = sink.try_seek(target) {
            log::warn!("seek to {secs:.2}s failed: {e}");
            return;
        }
        self.hub.emit(SourceEvent::TimeUpdate(secs.max(0.0)));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
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

    fn poll(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            self.playing = false;
            let end = self.duration.unwrap_or_else(|| self.current_time());
            self.hub.emit(SourceEvent::TimeUpdate(end));
            self.hub.emit(SourceEvent::Paused);
            self.hub.emit(SourceEvent::Ended);
            return;
        }

        if self.last_time_update.elapsed() >= self.time_update_every {
            self.last_time_update = Instant::now();
            let pos = sink.get_pos().as_secs_f64();
            self.hub.emit(SourceEvent::TimeUpdate(pos));
        }
    }
}
