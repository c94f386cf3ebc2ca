use crate::audio::AnalyserNode;

/// Value of a zero sample.
pub const SILENCE: u8 = 128;

/// One waveform snapshot: unsigned bytes, 128 being zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalFrame {
    samples: Vec<u8>,
}

impl SignalFrame {
    pub fn new(samples: Vec<u8>) -> Self {
        Self { samples }
    }

    pub fn silent(len: usize) -> Self {
        Self::new(vec![SILENCE; len])
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.samples.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.samples.iter().copied()
    }

    pub(super) fn refill(&mut self, node: &AnalyserNode) {
        self.samples.resize(node.fft_size(), SILENCE);
        node.byte_time_domain_data(&mut self.samples);
    }
}
