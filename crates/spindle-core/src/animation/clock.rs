//! Sub-tick driver for spin runs
//!
//! A run starts on every minute boundary and self-reschedules one quantum at
//! a time through the platform [`Scheduler`] until the configured duration
//! has elapsed. Each scheduled sub-tick carries the [`RunId`] it was issued
//! for; starting a new run bumps the id, so a sub-tick left over from a
//! superseded run is recognised and dropped instead of advancing the new one.

use core::time::Duration;

use log::{debug, trace, warn};

use super::spin::SpinState;
use crate::config::SpindleConfig;
use crate::easing::Easing;
use crate::platform::{RedrawSink, Scheduler};
use crate::render::SurfaceId;
use crate::text::TimeTextBuffer;

/// Eased progress that triggers the deferred text commit.
const SWAP_THRESHOLD: f64 = 0.5;

/// Identifier of one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunId(u32);

impl RunId {
    fn next(self) -> Self {
        RunId(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// What a sub-tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTickOutcome {
    /// The sub-tick belonged to a superseded or finished run and was ignored
    Stale,
    /// The run advanced and the next sub-tick is scheduled
    Advanced {
        /// The text commit happened on this sub-tick
        swapped: bool,
    },
    /// The run reached its duration and returned to rest
    Finished {
        /// The text commit happened on this sub-tick
        swapped: bool,
    },
}

/// Drives [`SpinState`] through one run at a time.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    duration_ms: u32,
    quantum_ms: u32,
    quantum: Duration,
    easing: Easing,
    current_run: RunId,
    active: bool,
}

impl AnimationClock {
    pub fn new(config: &SpindleConfig) -> Self {
        Self {
            duration_ms: config.duration_ms(),
            quantum_ms: config.quantum_ms(),
            quantum: config.quantum,
            easing: config.easing,
            current_run: RunId::default(),
            active: false,
        }
    }

    /// Begin a new run, superseding any run still in flight.
    pub fn start<S: Scheduler>(&mut self, spin: &mut SpinState, scheduler: &mut S) -> RunId {
        if self.active {
            debug!(
                "Run {} superseded at {} ms",
                self.current_run.value(),
                spin.progress_ms()
            );
        }

        self.current_run = self.current_run.next();
        self.active = true;
        spin.reset();
        scheduler.schedule_once(self.quantum, self.current_run);

        debug!(
            "Run {} started ({} ms, {})",
            self.current_run.value(),
            self.duration_ms,
            self.easing.name()
        );
        self.current_run
    }

    /// Handle a sub-tick issued for `run`.
    pub fn on_sub_tick<S, R>(
        &mut self,
        run: RunId,
        spin: &mut SpinState,
        text: &mut TimeTextBuffer,
        scheduler: &mut S,
        redraw: &mut R,
    ) -> SubTickOutcome
    where
        S: Scheduler,
        R: RedrawSink,
    {
        if !self.active || run != self.current_run {
            trace!(
                "Dropping stale sub-tick for run {} (current {})",
                run.value(),
                self.current_run.value()
            );
            return SubTickOutcome::Stale;
        }

        let eased = spin.advance(self.quantum_ms, self.duration_ms, self.easing);

        // The winder blade rotates with the spin, so both layers move
        redraw.request_redraw(SurfaceId::Spinner);
        redraw.request_redraw(SurfaceId::Winder);

        let mut swapped = false;
        if !spin.swap_fired() && eased > SWAP_THRESHOLD {
            text.commit();
            spin.mark_swapped();
            redraw.request_redraw(SurfaceId::TimeText);
            swapped = true;
            debug!(
                "Run {} committed time text at {} ms",
                run.value(),
                spin.progress_ms()
            );
        }

        if spin.progress_ms() < self.duration_ms {
            scheduler.schedule_once(self.quantum, run);
            return SubTickOutcome::Advanced { swapped };
        }

        if !spin.swap_fired() {
            warn!(
                "Run {} finished without passing the swap threshold",
                run.value()
            );
        }
        spin.settle();
        self.active = false;
        debug!("Run {} finished", run.value());
        SubTickOutcome::Finished { swapped }
    }

    pub fn current_run(&self) -> RunId {
        self.current_run
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DirtySurfaces;
    use crate::testing::RecordingScheduler;
    use crate::time::{HourMode, WallClock};

    extern crate alloc;
    use alloc::vec::Vec;

    struct Rig {
        clock: AnimationClock,
        spin: SpinState,
        text: TimeTextBuffer,
        scheduler: RecordingScheduler,
        redraw: DirtySurfaces,
    }

    impl Rig {
        fn new(config: SpindleConfig) -> Self {
            let mut text = TimeTextBuffer::new(HourMode::TwentyFour);
            text.prime(&WallClock::new(14, 4, 0).unwrap());
            Self {
                clock: AnimationClock::new(&config),
                spin: SpinState::new(),
                text,
                scheduler: RecordingScheduler::default(),
                redraw: DirtySurfaces::new(),
            }
        }

        fn start(&mut self) -> RunId {
            self.text
                .on_minute_boundary(&WallClock::new(14, 5, 0).unwrap());
            self.clock.start(&mut self.spin, &mut self.scheduler)
        }

        fn tick(&mut self, run: RunId) -> SubTickOutcome {
            self.clock.on_sub_tick(
                run,
                &mut self.spin,
                &mut self.text,
                &mut self.scheduler,
                &mut self.redraw,
            )
        }
    }

    #[test]
    fn test_start_schedules_first_sub_tick() {
        let mut rig = Rig::new(SpindleConfig::default());
        let run = rig.start();

        assert!(rig.clock.is_active());
        assert_eq!(rig.scheduler.scheduled, [(Duration::from_millis(50), run)]);
        assert_eq!(rig.spin.progress_ms(), 0);
        assert!(!rig.spin.swap_fired());
    }

    #[test]
    fn test_full_run_swaps_once_and_returns_to_rest() {
        let mut rig = Rig::new(SpindleConfig::default());
        let run = rig.start();

        let mut swaps = Vec::new();
        let mut last = SubTickOutcome::Stale;
        for index in 1..=40u32 {
            last = rig.tick(run);
            match last {
                SubTickOutcome::Advanced { swapped } | SubTickOutcome::Finished { swapped } => {
                    if swapped {
                        swaps.push(index);
                    }
                }
                SubTickOutcome::Stale => panic!("sub-tick {} was stale", index),
            }
        }

        assert_eq!(last, SubTickOutcome::Finished { swapped: false });
        // Bounce first passes 0.5 at 550 ms (p = 0.275)
        assert_eq!(swaps, [11]);
        assert!(rig.spin.swap_fired());
        assert_eq!(rig.spin.progress_ms(), 0);
        assert_eq!(rig.spin.angle_deg(), 0.0);
        assert!(!rig.clock.is_active());
        assert_eq!(rig.text.current().minute(), "05");
        // One initial schedule plus one per non-final sub-tick
        assert_eq!(rig.scheduler.scheduled.len(), 40);
    }

    #[test]
    fn test_commit_happens_on_first_sub_tick_past_half() {
        let config = SpindleConfig::default();
        let mut rig = Rig::new(config);
        let run = rig.start();

        for _ in 0..10 {
            rig.tick(run);
            assert!(rig.spin.eased() <= 0.5);
            assert_eq!(rig.text.current().minute(), "04");
        }

        assert_eq!(rig.tick(run), SubTickOutcome::Advanced { swapped: true });
        assert!(rig.spin.eased() > 0.5);
        assert_eq!(rig.text.current().minute(), "05");
    }

    #[test]
    fn test_restart_supersedes_in_flight_run() {
        let mut rig = Rig::new(SpindleConfig::default());
        let first = rig.start();
        for _ in 0..15 {
            rig.tick(first);
        }
        assert!(rig.spin.swap_fired());

        let second = rig.start();
        assert_ne!(first, second);
        assert_eq!(rig.spin.progress_ms(), 0);
        assert!(!rig.spin.swap_fired());

        // The first run's pending continuation fires after the reset
        assert_eq!(rig.tick(first), SubTickOutcome::Stale);
        assert_eq!(rig.spin.progress_ms(), 0);

        assert!(matches!(rig.tick(second), SubTickOutcome::Advanced { .. }));
        assert_eq!(rig.spin.progress_ms(), 50);
    }

    #[test]
    fn test_sub_tick_after_finish_is_stale() {
        let mut rig = Rig::new(SpindleConfig::default());
        let run = rig.start();
        for _ in 0..40 {
            rig.tick(run);
        }
        assert_eq!(rig.tick(run), SubTickOutcome::Stale);
    }

    #[test]
    fn test_sub_tick_marks_spinner_and_winder_dirty() {
        let mut rig = Rig::new(SpindleConfig::default());
        let run = rig.start();
        rig.tick(run);

        assert!(rig.redraw.is_marked(SurfaceId::Spinner));
        assert!(rig.redraw.is_marked(SurfaceId::Winder));
        assert!(!rig.redraw.is_marked(SurfaceId::TimeText));
    }

    #[test]
    fn test_superseded_run_never_swaps() {
        let mut rig = Rig::new(SpindleConfig::default());
        let first = rig.start();
        for _ in 0..5 {
            rig.tick(first);
        }
        assert!(!rig.spin.swap_fired());

        // The next minute arrives before the first run reached its swap
        rig.text
            .on_minute_boundary(&WallClock::new(14, 6, 0).unwrap());
        rig.clock.start(&mut rig.spin, &mut rig.scheduler);

        assert_eq!(rig.text.current().minute(), "04");
        assert_eq!(rig.text.pending().minute(), "06");
    }

    #[test]
    fn test_quantum_longer_than_duration_finishes_in_one_sub_tick() {
        let config = SpindleConfig::default().with_quantum(Duration::from_millis(5000));
        let mut rig = Rig::new(config);
        let run = rig.start();

        assert_eq!(rig.tick(run), SubTickOutcome::Finished { swapped: true });
        assert_eq!(rig.text.current().minute(), "05");
        assert_eq!(rig.scheduler.scheduled.len(), 1);
    }
}
