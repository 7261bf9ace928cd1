//! Interfaces the watchface consumes from its platform
//!
//! The core never owns a timer, a display or a clock. A port (the desktop
//! simulator, or firmware on a watch) implements these traits and feeds the
//! resulting events back through
//! [`Watchface::dispatch`](crate::watchface::Watchface::dispatch).

use core::time::Duration;

use crate::animation::RunId;
use crate::render::SurfaceId;
use crate::time::WallClock;

/// Opaque identifier for a scheduled one-shot timer.
///
/// Timers are never cancelled: a superseded run's sub-tick is discarded by
/// its [`RunId`] when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// One-shot timer registration.
pub trait Scheduler {
    /// Arrange for `WatchEvent::SubTick(run)` to be delivered after `delay`.
    fn schedule_once(&mut self, delay: Duration, run: RunId) -> TimerHandle;
}

/// Marks a drawable surface dirty for the next paint pass.
///
/// Requests are idempotent: marking a surface twice before a paint is the
/// same as marking it once.
pub trait RedrawSink {
    fn request_redraw(&mut self, surface: SurfaceId);
}

/// Startup queries answered by the platform.
pub trait Platform {
    /// User's 12/24-hour preference. Read once at startup.
    fn is_24_hour_mode(&self) -> bool;

    /// Current wall-clock time, used to prime the first paint.
    fn now(&self) -> WallClock;
}
