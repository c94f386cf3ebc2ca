use crate::audio::{MediaSource, ProbeBus, ReadyState, Subscription};
use crate::config::PlaybackSettings;
use crate::error::{PlayerError, Result};
use crate::media::RawFile;
use crate::playlist::{Playlist, ReplaceOutcome, TrackDescriptor};

use super::state::{Phase, PlaybackState};
use super::status::Status;

/// Owner of the single media source and of the playlist feeding it.
pub struct PlaybackEngine<S: MediaSource> {
    pub(super) source: S,
    pub(super) playlist: Playlist,
    pub(super) events: Subscription,
    pub(super) state: PlaybackState,
    pub(super) phase: Phase,
    /// A play request waiting for the source to report data-ready.
    pub(super) pending_play: bool,
    pub(super) status: Status,
    restart_threshold: f64,
}

/// Parse raw seek input into seconds.
pub fn parse_seek(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PlayerError::InvalidSeekValue(raw.to_string()))
}

impl<S: MediaSource> PlaybackEngine<S> {
    pub fn new(mut source: S, settings: &PlaybackSettings) -> Self {
        let events = source.subscribe();
        Self {
            source,
            playlist: Playlist::new(),
            events,
            state: PlaybackState::default(),
            phase: Phase::Empty,
            pending_play: false,
            status: Status::Idle,
            restart_threshold: settings.restart_threshold_secs,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn active_track(&self) -> Option<&TrackDescriptor> {
        self.state.active_index.and_then(|i| self.playlist.get(i))
    }

    pub fn has_pending_play(&self) -> bool {
        self.pending_play
    }

    pub fn graph(&self) -> ProbeBus {
        self.source.graph()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.source.ready_state()
    }

    /// Note that `count` files are about to be read.
    pub fn begin_loading(&mut self, count: usize) {
        self.status = Status::Loading(count);
    }

    /// Replace the playlist with `files` and load a track if there is one.
    ///
    /// The previous active index is kept when still in range, otherwise the
    /// first track is loaded. Nothing starts playing.
    pub fn replace_playlist(&mut self, files: Vec<RawFile>) -> ReplaceOutcome {
        // Every selection issues fresh handles, so the bound one is about to
        // be revoked and must be unbound first.
        self.unbind();

        let outcome = self.playlist.replace_all(files);
        let registry = self.playlist.registry();
        log::info!(
            "playlist replaced: {} tracks, {} skipped, {} handles revoked ({} live, {} released in total)",
            outcome.accepted,
            outcome.skipped.len(),
            outcome.revoked,
            registry.live_count(),
            registry.released_count()
        );
        self.status = Status::Loaded(outcome.accepted);

        if self.playlist.is_empty() {
            self.reset_to_empty();
            return outcome;
        }

        let target = self
            .state
            .active_index
            .filter(|&i| i < self.playlist.len())
            .unwrap_or(0);
        self.load_track(target);
        outcome
    }

    /// Remove the track at `index`, keeping the active index on the same
    /// logical neighbour.
    pub fn remove_track(&mut self, index: usize) -> bool {
        let Some(handle) = self.playlist.get(index).map(TrackDescriptor::handle) else {
            return false;
        };
        if self.source.bound() == Some(handle) {
            self.unbind();
        }

        let Some(removal) = self.playlist.remove_at(index, self.state.active_index) else {
            return false;
        };
        debug_assert!(!self.playlist.registry().is_live(handle));
        log::info!("removed {}", removal.track.name());

        if self.playlist.is_empty() {
            self.reset_to_empty();
        } else if let Some(active) = removal.active {
            self.load_track(active);
        }
        true
    }

    /// Make `index` the active track, binding it unless it is already bound.
    pub fn load_track(&mut self, index: usize) -> bool {
        let Some(track) = self.playlist.get(index) else {
            log::debug!("load of track {index} ignored: out of range");
            return false;
        };
        let handle = track.handle();
        let name = track.name().to_string();

        if self.source.bound() != Some(handle) {
            let stream = match self.playlist.open(handle) {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!("cannot bind track {index}: {e}");
                    self.status = Status::PlaybackFailed(e.to_string());
                    return false;
                }
            };
            self.pending_play = false;
            self.source.bind(handle, stream);
            self.source.load();
            self.state.position_secs = 0.0;
            self.state.duration_secs = None;
            self.phase = Phase::Ready;
            log::info!("loaded track {index}: {name}");
        }

        self.state.active_index = Some(index);
        self.status = Status::NowLoaded(name);
        true
    }

    /// Load `index` and start it (playlist row activation).
    pub fn select(&mut self, index: usize) {
        if self.load_track(index) {
            self.request_play();
        }
    }

    pub fn play(&mut self) {
        if self.playlist.is_empty() {
            log::debug!("play ignored: playlist is empty");
            return;
        }
        if self.source.bound().is_none() {
            let index = self.state.active_index.unwrap_or(0);
            if !self.load_track(index) {
                return;
            }
        }
        self.request_play();
    }

    pub fn pause(&mut self) {
        self.pending_play = false;
        if self.state.is_playing {
            self.source.pause();
        }
    }

    /// Play/pause button.
    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and rewind; the bound track stays.
    pub fn stop(&mut self) {
        if self.source.bound().is_none() {
            return;
        }
        self.pending_play = false;
        self.source.pause();
        self.source.set_current_time(0.0);
    }

    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let target = self.state.active_index.map_or(0, |i| (i + 1) % len);
        if self.load_track(target) {
            self.request_play();
        }
    }

    /// Previous track, or restart the current one when past the restart threshold.
    pub fn prev(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        if self.source.bound().is_some() && self.source.current_time() > self.restart_threshold {
            self.seek_to(0.0);
            if !self.state.is_playing {
                self.attempt_play();
            }
            return;
        }

        let target = self.state.active_index.map_or(len - 1, |i| (i + len - 1) % len);
        if self.load_track(target) {
            self.request_play();
        }
    }

    /// Seek from raw user input; anything that is not a number is ignored.
    pub fn seek(&mut self, raw: &str) {
        match parse_seek(raw) {
            Ok(secs) => self.seek_to(secs),
            Err(e) => log::debug!("{e}; ignored"),
        }
    }

    /// Move the source to `secs`, updating the observed position right away.
    pub fn seek_to(&mut self, secs: f64) {
        if !secs.is_finite() {
            log::debug!("{}; ignored", PlayerError::InvalidSeekValue(secs.to_string()));
            return;
        }
        if self.source.bound().is_none() {
            return;
        }
        let target = secs.max(0.0);
        self.source.set_current_time(target);
        self.state.position_secs = target;
    }

    /// Seek relative to the current position.
    pub fn scrub(&mut self, delta_secs: f64) {
        let from = self.source.current_time();
        self.seek_to(from + delta_secs);
    }

    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.source.set_volume(volume);
        self.state.volume = volume;
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.set_volume(self.state.volume + delta);
    }

    /// Play now if the source can, otherwise remember the intent until it
    /// reports data-ready.
    pub(super) fn request_play(&mut self) {
        if self.source.ready_state().is_playable() {
            self.attempt_play();
        } else {
            log::debug!("{}; play deferred", PlayerError::SourceUnready);
            self.pending_play = true;
        }
    }

    /// Ask the source to play, turning a refusal into status text.
    pub(super) fn attempt_play(&mut self) {
        self.pending_play = false;
        match self.source.play() {
            Ok(()) => {}
            Err(PlayerError::SourceUnready) => {
                log::debug!("source not ready yet; play deferred");
                self.pending_play = true;
            }
            Err(e) => {
                log::warn!("{e}");
                self.status = Status::PlaybackFailed(e.to_string());
            }
        }
    }

    fn unbind(&mut self) {
        if self.source.bound().is_some() {
            self.source.unbind();
        }
        self.pending_play = false;
        self.phase = Phase::Empty;
    }

    /// Back to the initial state once the playlist is empty; there is no
    /// source left to confirm anything, so the observed fields reset here.
    fn reset_to_empty(&mut self) {
        self.unbind();
        self.state = PlaybackState {
            volume: self.state.volume,
            ..PlaybackState::default()
        };
        self.status = Status::Idle;
    }
}
