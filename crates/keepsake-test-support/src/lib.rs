//! Shared test fakes and utilities for the Keepsake narrative sequencer.

mod clock;
mod media;
mod rng;

pub use clock::{FixedClock, ManualClock, fixed_start};
pub use media::{MediaCall, RecordingMediaBackend, RejectingMediaBackend};
pub use rng::{MockRng, SequenceRng};
