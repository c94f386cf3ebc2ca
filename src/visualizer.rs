//! Waveform visualizer.
//!
//! A `Visualizer` owns the signal tap and a recorded 2D `Surface`, and runs
//! one self-rescheduling frame loop on a `FrameScheduler`. Each frame pulls a
//! `SignalFrame` from the tap and lets the active `RenderStrategy` map it to
//! shapes. Switching strategy cancels the running loop before the next one
//! starts; the tap is left alone.

mod scheduler;
mod strategy;
mod surface;
mod view;

pub use scheduler::*;
pub use strategy::*;
pub use surface::*;
pub use view::*;
