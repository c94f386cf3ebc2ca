use crate::audio::{MediaSource, SourceEvent};

use super::state::Phase;
use super::status::Status;
use super::transport::PlaybackEngine;

impl<S: MediaSource> PlaybackEngine<S> {
    /// Let the source emit its time-driven notifications, then apply
    /// everything it has emitted since the last pump, in order.
    ///
    /// The applied batch is returned so other observers (the visualizer)
    /// see the same sequence.
    pub fn pump(&mut self) -> Vec<SourceEvent> {
        self.source.poll();
        let events = self.events.drain();
        for event in &events {
            self.apply(event);
        }
        events
    }

    fn apply(&mut self, event: &SourceEvent) {
        match event {
            SourceEvent::Started => {
                self.state.is_playing = true;
                if self.phase != Phase::Empty {
                    self.phase = Phase::Playing;
                }
            }
            SourceEvent::Paused => {
                self.state.is_playing = false;
                if self.phase == Phase::Playing {
                    self.phase = Phase::Paused;
                }
            }
            SourceEvent::TimeUpdate(secs) => {
                self.state.position_secs = secs.max(0.0);
            }
            SourceEvent::MetadataReady(duration) | SourceEvent::DurationChanged(duration) => {
                self.state.duration_secs = duration.filter(|d| d.is_finite() && *d >= 0.0);
            }
            SourceEvent::DataReady => {
                if self.pending_play {
                    log::debug!("source ready; fulfilling deferred play");
                    self.attempt_play();
                }
            }
            SourceEvent::Ended => {
                log::info!("track ended; advancing");
                self.next();
            }
            SourceEvent::Error(reason) => {
                log::warn!("source error: {reason}");
                self.pending_play = false;
                self.status = Status::PlaybackFailed(reason.clone());
            }
        }
    }
}
