//! The watchface: owns every piece of face state and routes platform events
//!
//! Each state holder has exactly one writer:
//! - [`SpinState`]: the [`AnimationClock`] sub-tick handler
//! - [`WinderState`]: the second/minute boundary handler
//! - [`TimeTextBuffer`]: pending on minute boundaries, current on the clock's swap
//!
//! The renderer only reads, through [`Watchface::frame`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};

use crate::animation::{AnimationClock, RunId, SpinState, SubTickOutcome, WinderState};
use crate::config::SpindleConfig;
use crate::error::SpindleResult;
use crate::events::{EventQueue, WatchEvent};
use crate::platform::{Platform, RedrawSink, Scheduler};
use crate::render::{FaceFrame, FaceLayout, FacePalette, SurfaceId, compose};
use crate::text::TimeTextBuffer;
use crate::time::{HourMode, TimeUnits, WallClock};

pub struct Watchface {
    config: SpindleConfig,
    clock: AnimationClock,
    spin: SpinState,
    winder: WinderState,
    text: TimeTextBuffer,
    layout: FaceLayout,
    palette: FacePalette,
}

impl Watchface {
    /// Build the face and prime it with the platform's current time.
    ///
    /// The hour mode is read from the platform here and never again.
    pub fn new<P: Platform>(
        config: SpindleConfig,
        platform: &P,
        bounds: Rectangle,
    ) -> SpindleResult<Self> {
        config.validate()?;

        let mode = HourMode::from_24_hour_flag(platform.is_24_hour_mode());
        let now = platform.now();

        let mut text = TimeTextBuffer::new(mode);
        text.prime(&now);

        let mut winder = WinderState::new(&config);
        winder.on_second(now.second());

        info!(
            "Watchface ready at {:02}:{:02}:{:02} ({:?}, {} easing)",
            now.hour(),
            now.minute(),
            now.second(),
            mode,
            config.easing.name()
        );

        Ok(Self {
            config,
            clock: AnimationClock::new(&config),
            spin: SpinState::new(),
            winder,
            text,
            layout: FaceLayout::new(bounds),
            palette: FacePalette::default(),
        })
    }

    /// Handle a tick-service event.
    ///
    /// A minute boundary stages the new text, resets the winder and starts a
    /// spin run, superseding any run still going. A second boundary moves
    /// the winder.
    pub fn on_time_changed<S, R>(
        &mut self,
        time: WallClock,
        units: TimeUnits,
        scheduler: &mut S,
        redraw: &mut R,
    ) where
        S: Scheduler,
        R: RedrawSink,
    {
        if units.contains(TimeUnits::MINUTE) {
            debug!("Minute boundary at {:02}:{:02}", time.hour(), time.minute());
            self.text.on_minute_boundary(&time);
            self.winder.reset();
            self.clock.start(&mut self.spin, scheduler);
            redraw.request_redraw(SurfaceId::Spinner);
            redraw.request_redraw(SurfaceId::Winder);
        }

        if units.contains(TimeUnits::SECOND) {
            self.winder.on_second(time.second());
            redraw.request_redraw(SurfaceId::Winder);
        }
    }

    /// Handle an expired sub-tick timer.
    pub fn on_sub_tick<S, R>(&mut self, run: RunId, scheduler: &mut S, redraw: &mut R) -> SubTickOutcome
    where
        S: Scheduler,
        R: RedrawSink,
    {
        self.clock
            .on_sub_tick(run, &mut self.spin, &mut self.text, scheduler, redraw)
    }

    /// Route one event to its handler.
    pub fn dispatch<S, R>(&mut self, event: WatchEvent, scheduler: &mut S, redraw: &mut R)
    where
        S: Scheduler,
        R: RedrawSink,
    {
        match event {
            WatchEvent::TimeChanged { time, units } => {
                self.on_time_changed(time, units, scheduler, redraw)
            }
            WatchEvent::SubTick(run) => {
                self.on_sub_tick(run, scheduler, redraw);
            }
        }
    }

    /// Dispatch every queued event in order. Returns how many were handled.
    pub fn drain<const N: usize, S, R>(
        &mut self,
        queue: &EventQueue<N>,
        scheduler: &mut S,
        redraw: &mut R,
    ) -> usize
    where
        S: Scheduler,
        R: RedrawSink,
    {
        let mut handled = 0;
        while let Some(event) = queue.next() {
            self.dispatch(event, scheduler, redraw);
            handled += 1;
        }
        handled
    }

    /// Draw instructions for the current state.
    pub fn frame(&self) -> FaceFrame<'_> {
        compose(
            &self.spin,
            &self.winder,
            self.config.winder_offset_deg,
            &self.text,
            &self.layout,
            &self.palette,
        )
    }

    /// Paint the current state onto `display`.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.frame().draw(display)
    }

    pub fn config(&self) -> &SpindleConfig {
        &self.config
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    pub fn winder(&self) -> &WinderState {
        &self.winder
    }

    pub fn text(&self) -> &TimeTextBuffer {
        &self.text
    }
}
