//! Non-destructive signal probe spliced into the playback chain.
//!
//! Every stream a media source plays is wrapped in a `Probe`, which passes
//! samples through untouched while copying a mono mix into the `ProbeBus`.
//! Analysers connect to the bus to read the most recent samples; with no
//! analyser connected the probe only forwards audio.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rodio::Source;
use rodio::source::SeekError;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Samples are handed to the bus in blocks to keep lock traffic off the
/// per-sample path.
const FLUSH_SAMPLES: usize = 256;

type SampleRing = Arc<Mutex<VecDeque<f32>>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Connection {
    id: u64,
    ring: SampleRing,
    capacity: usize,
}

/// The audio graph of one media source: source -> probe -> output.
#[derive(Clone)]
pub struct ProbeBus {
    id: u64,
    connections: Arc<Mutex<Vec<Connection>>>,
    next_connection: Arc<AtomicU64>,
}

impl Default for ProbeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeBus {
    pub fn new() -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            connections: Arc::new(Mutex::new(Vec::new())),
            next_connection: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Identity of the graph; stable for the life of the media source.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Open an analysis context reading `fft_size` samples per snapshot.
    pub fn connect(&self, fft_size: usize) -> AnalyserNode {
        let id = self.next_connection.fetch_add(1, Ordering::Relaxed);
        let ring: SampleRing = Arc::new(Mutex::new(VecDeque::with_capacity(fft_size)));
        lock(&self.connections).push(Connection {
            id,
            ring: ring.clone(),
            capacity: fft_size,
        });
        log::debug!("analyser {id} connected to graph {}", self.id);
        AnalyserNode {
            bus: self.clone(),
            id,
            ring,
            fft_size,
            closed: false,
        }
    }

    /// Number of analysis contexts currently open on this graph.
    pub fn open_contexts(&self) -> usize {
        lock(&self.connections).len()
    }

    /// Push mono samples to every connected analyser.
    pub fn feed(&self, samples: &[f32]) {
        let connections = lock(&self.connections);
        for c in connections.iter() {
            let mut ring = lock(&c.ring);
            ring.extend(samples.iter().copied());
            let excess = ring.len().saturating_sub(c.capacity);
            ring.drain(..excess);
        }
    }

    fn disconnect(&self, id: u64) {
        lock(&self.connections).retain(|c| c.id != id);
        log::debug!("analyser {id} disconnected from graph {}", self.id);
    }
}

/// An open analysis context. Closing it (or dropping it) releases the context.
pub struct AnalyserNode {
    bus: ProbeBus,
    id: u64,
    ring: SampleRing,
    fft_size: usize,
    closed: bool,
}

impl AnalyserNode {
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn graph_id(&self) -> u64 {
        self.bus.id()
    }

    /// Fill `out` with the latest time-domain samples as bytes, 128 being zero.
    ///
    /// When fewer samples than `out.len()` have arrived the front is padded
    /// with silence.
    pub fn byte_time_domain_data(&self, out: &mut [u8]) {
        let ring = lock(&self.ring);
        let have = ring.len().min(out.len());
        let pad = out.len() - have;
        out[..pad].fill(128);
        for (dst, &s) in out[pad..].iter_mut().zip(ring.iter().skip(ring.len() - have)) {
            *dst = sample_to_byte(s);
        }
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.bus.disconnect(self.id);
        }
    }
}

impl Drop for AnalyserNode {
    fn drop(&mut self) {
        self.close();
    }
}

/// Map a float sample in `[-1, 1]` to an unsigned byte centred on 128.
pub fn sample_to_byte(s: f32) -> u8 {
    (128.0 * (1.0 + s)).clamp(0.0, 255.0) as u8
}

/// Pass-through source that copies a mono mix of what it plays into a bus.
pub struct Probe<S> {
    inner: S,
    bus: ProbeBus,
    frame: Vec<f32>,
    pending: Vec<f32>,
}

impl<S: Source> Probe<S> {
    pub fn new(inner: S, bus: ProbeBus) -> Self {
        Self {
            inner,
            bus,
            frame: Vec::with_capacity(2),
            pending: Vec::with_capacity(FLUSH_SAMPLES),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.bus.feed(&self.pending);
            self.pending.clear();
        }
    }
}

impl<S: Source> Iterator for Probe<S> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(sample) = self.inner.next() else {
            self.flush();
            return None;
        };

        self.frame.push(sample);
        let channels = self.inner.channels().max(1) as usize;
        if self.frame.len() >= channels {
            let mono = self.frame.iter().sum::<f32>() / self.frame.len() as f32;
            self.frame.clear();
            self.pending.push(mono);
            if self.pending.len() >= FLUSH_SAMPLES {
                self.flush();
            }
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Source> Source for Probe<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.frame.clear();
        self.pending.clear();
        self.inner.try_seek(pos)
    }
}
