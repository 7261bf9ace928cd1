//! Platform fakes shared by the unit tests

extern crate alloc;
use alloc::vec::Vec;
use core::time::Duration;

use crate::animation::RunId;
use crate::platform::{Platform, Scheduler, TimerHandle};
use crate::time::WallClock;

/// Records every one-shot request instead of arming a timer.
#[derive(Debug, Default)]
pub(crate) struct RecordingScheduler {
    pub(crate) scheduled: Vec<(Duration, RunId)>,
}

impl RecordingScheduler {
    /// Run id of the most recent request.
    pub(crate) fn last_run(&self) -> Option<RunId> {
        self.scheduled.last().map(|(_, run)| *run)
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule_once(&mut self, delay: Duration, run: RunId) -> TimerHandle {
        self.scheduled.push((delay, run));
        TimerHandle(self.scheduled.len() as u32)
    }
}

/// Platform frozen at one instant.
pub(crate) struct FixedPlatform {
    pub(crate) is_24_hour: bool,
    pub(crate) now: WallClock,
}

impl FixedPlatform {
    pub(crate) fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            is_24_hour: true,
            now: WallClock::new(hour, minute, second).unwrap(),
        }
    }

    pub(crate) fn twelve_hour(mut self) -> Self {
        self.is_24_hour = false;
        self
    }
}

impl Platform for FixedPlatform {
    fn is_24_hour_mode(&self) -> bool {
        self.is_24_hour
    }

    fn now(&self) -> WallClock {
        self.now
    }
}
