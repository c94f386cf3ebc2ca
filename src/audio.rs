//! Media source collaborator: the single playable source, its notification
//! stream and the signal probe analysers read from.

mod probe;
mod rodio_source;
mod source;
mod types;

pub use probe::*;
pub use rodio_source::RodioSource;
pub use source::*;
pub use types::*;

#[cfg(test)]
pub mod fake;
#[cfg(test)]
mod tests;
