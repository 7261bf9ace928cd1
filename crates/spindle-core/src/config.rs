//! Build-time tunables for the watchface animation

use core::time::Duration;

use log::warn;

use crate::easing::Easing;
use crate::error::{SpindleError, SpindleResult};

/// Length of one spin run.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Interval between animation sub-ticks.
pub const DEFAULT_QUANTUM: Duration = Duration::from_millis(50);

/// Winder angle at second 0, in degrees.
pub const WINDER_START_DEG: i32 = 360;

/// Degrees the winder moves back per second (360 / 60).
pub const WINDER_STEP_DEG: i32 = 6;

/// Fixed rotation added to the winder blade when drawn.
pub const WINDER_OFFSET_DEG: i32 = 0;

/// Animation and winder tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpindleConfig {
    /// Total run length `D`
    pub duration: Duration,
    /// Sub-tick quantum `Q`
    pub quantum: Duration,
    /// Active easing curve
    pub easing: Easing,
    pub winder_start_deg: i32,
    pub winder_step_deg: i32,
    pub winder_offset_deg: i32,
}

impl Default for SpindleConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            quantum: DEFAULT_QUANTUM,
            easing: Easing::default(),
            winder_start_deg: WINDER_START_DEG,
            winder_step_deg: WINDER_STEP_DEG,
            winder_offset_deg: WINDER_OFFSET_DEG,
        }
    }
}

impl SpindleConfig {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_quantum(mut self, quantum: Duration) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Run length in whole milliseconds, saturating at `u32::MAX`.
    pub fn duration_ms(&self) -> u32 {
        whole_millis(self.duration)
    }

    /// Sub-tick quantum in whole milliseconds, saturating at `u32::MAX`.
    pub fn quantum_ms(&self) -> u32 {
        whole_millis(self.quantum)
    }

    /// Number of sub-ticks in a complete run.
    pub fn sub_ticks_per_run(&self) -> u32 {
        let quantum = self.quantum_ms().max(1);
        self.duration_ms().div_ceil(quantum)
    }

    /// Reject tunables that cannot drive a run at all.
    ///
    /// A configuration where the easing never passes 0.5 on a sub-tick is
    /// accepted with a warning: the time text would simply not update.
    pub fn validate(&self) -> SpindleResult<()> {
        if !is_whole_millis(self.duration) {
            return Err(SpindleError::InvalidConfig {
                reason: "animation duration must be a whole number of milliseconds up to u32::MAX",
            });
        }
        if !is_whole_millis(self.quantum) {
            return Err(SpindleError::InvalidConfig {
                reason: "sub-tick quantum must be a whole number of milliseconds up to u32::MAX",
            });
        }

        if self.quantum_ms() == 0 {
            return Err(SpindleError::InvalidConfig {
                reason: "sub-tick quantum must be at least 1 ms",
            });
        }
        if self.duration_ms() == 0 {
            return Err(SpindleError::InvalidConfig {
                reason: "animation duration must be at least 1 ms",
            });
        }

        if !self.swap_reachable() {
            warn!(
                "Easing {} never passes 0.5 within {} ms at {} ms sub-ticks; time text will not update",
                self.easing.name(),
                self.duration_ms(),
                self.quantum_ms()
            );
        }

        Ok(())
    }

    /// Whether any sub-tick of a run sees eased progress above 0.5.
    pub fn swap_reachable(&self) -> bool {
        let duration = self.duration_ms();
        let quantum = self.quantum_ms().max(1);
        (1..=self.sub_ticks_per_run()).any(|tick| {
            let progress = tick.saturating_mul(quantum).min(duration);
            self.easing.ease(progress as f64 / duration as f64) > 0.5
        })
    }
}

fn whole_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Progress is counted in whole milliseconds, so timer delays must be too.
fn is_whole_millis(duration: Duration) -> bool {
    duration.subsec_nanos() % 1_000_000 == 0 && duration.as_millis() <= u32::MAX as u128
}
