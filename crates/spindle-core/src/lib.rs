//! Hardware-independent core of the spindle watchface
//!
//! On every minute boundary two mirrored blades spin half a turn around the
//! dial with an eased motion, and the hour/minute digits flip at the moment
//! the motion passes its midpoint, so the change is hidden by the blades. A
//! second-hand marker follows the wall-clock seconds and rides along with
//! the spin.
//!
//! The crate owns the timing, easing, state and draw composition. Timers,
//! the tick service and the panel belong to the platform and are reached
//! through the traits in [`platform`].
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod framebuffer;
pub mod platform;
pub mod render;
pub mod text;
pub mod time;
pub mod watchface;

#[cfg(test)]
mod testing;

pub use animation::{RunId, SubTickOutcome};
pub use config::SpindleConfig;
pub use easing::Easing;
pub use error::{SpindleError, SpindleResult};
pub use events::{EventQueue, WatchEvent};
pub use time::{HourMode, TimeUnits, WallClock};
pub use watchface::Watchface;
