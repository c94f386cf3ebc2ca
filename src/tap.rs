//! Signal tap: an analyser connected to the bound source's audio graph.
//!
//! Attachment waits for the source to have playable data. Once attached the
//! tap hands out `SignalFrame`s of the latest time-domain samples until it is
//! detached (explicitly or on drop), which releases the analysis context.

mod frame;

pub use frame::{SILENCE, SignalFrame};

use crate::audio::{AnalyserNode, ProbeBus, ReadyState};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapStatus {
    Attached,
    /// The source is not ready; attachment happens on `notify_ready`.
    Deferred,
    /// Already attached; nothing changed.
    AlreadyAttached,
}

pub struct SignalTap {
    fft_size: usize,
    node: Option<AnalyserNode>,
    /// Graph waiting for its source to become ready.
    deferred: Option<u64>,
    frame: SignalFrame,
}

impl SignalTap {
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft_size,
            node: None,
            deferred: None,
            frame: SignalFrame::silent(fft_size),
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn attach(&mut self, graph: &ProbeBus, ready: ReadyState) -> TapStatus {
        if let Some(node) = &self.node {
            if node.graph_id() != graph.id() {
                log::warn!(
                    "tap already attached to graph {}; detach before attaching to {}",
                    node.graph_id(),
                    graph.id()
                );
            }
            return TapStatus::AlreadyAttached;
        }
        if !ready.is_playable() {
            log::debug!("tap deferred until graph {} is ready", graph.id());
            self.deferred = Some(graph.id());
            return TapStatus::Deferred;
        }
        self.connect(graph);
        TapStatus::Attached
    }

    /// Complete a deferred attachment once `graph`'s source reports data.
    pub fn notify_ready(&mut self, graph: &ProbeBus) -> bool {
        if self.node.is_some() || self.deferred != Some(graph.id()) {
            return false;
        }
        self.connect(graph);
        true
    }

    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    /// Latest waveform snapshot, or `None` while detached.
    pub fn sample(&mut self) -> Option<&SignalFrame> {
        let node = self.node.as_ref()?;
        self.frame.refill(node);
        Some(&self.frame)
    }

    /// Release the analysis context. Returns whether one was open.
    pub fn detach(&mut self) -> bool {
        self.deferred = None;
        match self.node.take() {
            Some(mut node) => {
                node.close();
                log::debug!("tap detached from graph {}", node.graph_id());
                true
            }
            None => false,
        }
    }

    fn connect(&mut self, graph: &ProbeBus) {
        self.deferred = None;
        self.node = Some(graph.connect(self.fft_size));
        log::debug!(
            "tap attached to graph {} ({} open contexts)",
            graph.id(),
            graph.open_contexts()
        );
    }
}

impl Drop for SignalTap {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests;
