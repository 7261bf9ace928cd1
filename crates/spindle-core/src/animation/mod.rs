//! Spin animation: the sub-tick clock and the two rotating indicators

mod clock;
mod spin;
mod winder;

pub use clock::{AnimationClock, RunId, SubTickOutcome};
pub use spin::SpinState;
pub use winder::WinderState;
