//! Desktop simulator for the spindle watchface.
//!
//! Plays the platform's part for `spindle-core`: a tick service driven by
//! the host's local clock, a one-shot timer queue for animation sub-ticks, and
//! an SDL2 window via `embedded-graphics-simulator` standing in for the
//! panel.
//!
//! # Environment
//!
//! | Variable            | Values                              | Default  |
//! |---------------------|-------------------------------------|----------|
//! | `SPINDLE_HOUR_MODE` | `12`, `24`                          | `24`     |
//! | `SPINDLE_EASING`    | `bounce`, `back-out`, `back-in-out` | `bounce` |
//! | `RUST_LOG`          | `env_logger` filter                 | unset    |
//!
//! Close the window or press Q / Esc to quit.

use std::time::{Duration, Instant};

use chrono::{Local, Timelike};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, error, info, warn};

use spindle_core::framebuffer::FrameBuffer;
use spindle_core::platform::{Platform, Scheduler, TimerHandle};
use spindle_core::render::{DirtySurfaces, FACE_HEIGHT_PX, FACE_WIDTH_PX, face_bounds};
use spindle_core::{
    Easing, EventQueue, RunId, SpindleConfig, TimeUnits, WallClock, WatchEvent, Watchface,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Loop period; well under the animation quantum so sub-ticks land on time.
const LOOP_PERIOD: Duration = Duration::from_millis(5);

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Host clock and user preferences.
struct HostPlatform {
    is_24_hour: bool,
}

impl HostPlatform {
    fn from_env() -> Self {
        let is_24_hour = match std::env::var("SPINDLE_HOUR_MODE").as_deref() {
            Ok("12") => false,
            Ok("24") | Err(_) => true,
            Ok(other) => {
                warn!("Unknown SPINDLE_HOUR_MODE {:?}, using 24-hour", other);
                true
            }
        };
        Self { is_24_hour }
    }
}

impl Platform for HostPlatform {
    fn is_24_hour_mode(&self) -> bool {
        self.is_24_hour
    }

    fn now(&self) -> WallClock {
        wall_clock_from(&Local::now())
    }
}

/// Hour, minute and second of a chrono time of day.
fn wall_clock_from<T: Timelike>(time: &T) -> WallClock {
    // chrono reports leap seconds through the nanosecond field, so these
    // are always in range
    WallClock::new(time.hour() as u8, time.minute() as u8, time.second() as u8)
        .unwrap_or_else(|e| {
            warn!("Host clock out of range: {}", e);
            WallClock::default()
        })
}

/// Easing selected through `SPINDLE_EASING`.
fn easing_from_env() -> Easing {
    match std::env::var("SPINDLE_EASING") {
        Ok(name) => Easing::from_name(&name).unwrap_or_else(|| {
            warn!("Unknown SPINDLE_EASING {:?}, using bounce", name);
            Easing::default()
        }),
        Err(_) => Easing::default(),
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// One-shot timers waiting to post a sub-tick.
#[derive(Default)]
struct TimerQueue {
    pending: Vec<(Instant, RunId)>,
    issued: u32,
}

impl TimerQueue {
    /// Remove and return the runs whose deadline has passed, earliest first.
    fn take_due(&mut self, now: Instant) -> Vec<RunId> {
        self.pending.sort_by_key(|(deadline, _)| *deadline);
        let split = self
            .pending
            .iter()
            .position(|(deadline, _)| *deadline > now)
            .unwrap_or(self.pending.len());
        self.pending.drain(..split).map(|(_, run)| run).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, run: RunId) -> TimerHandle {
        self.pending.push((Instant::now() + delay, run));
        self.issued = self.issued.wrapping_add(1);
        TimerHandle(self.issued)
    }
}

// ---------------------------------------------------------------------------
// Tick service
// ---------------------------------------------------------------------------

/// Reports second/minute roll-overs of the host clock.
struct TickService {
    last: WallClock,
}

impl TickService {
    fn new(now: WallClock) -> Self {
        Self { last: now }
    }

    fn poll(&mut self, now: WallClock) -> Option<WatchEvent> {
        let units = TimeUnits::between(&self.last, &now);
        self.last = now;
        (!units.is_empty()).then_some(WatchEvent::TimeChanged { time: now, units })
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting spindle simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        FACE_WIDTH_PX, FACE_HEIGHT_PX, WINDOW_SCALE
    );

    let platform = HostPlatform::from_env();
    let config = SpindleConfig::default().with_easing(easing_from_env());

    let mut face = match Watchface::new(config, &platform, face_bounds()) {
        Ok(face) => face,
        Err(e) => {
            error!("Cannot start watchface: {}", e);
            std::process::exit(1);
        }
    };

    let mut display = SimulatorDisplay::<Rgb565>::new(face_bounds().size);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Spindle Simulator", &output_settings);

    let mut framebuffer = FrameBuffer::new(face_bounds().size);
    let queue: EventQueue = EventQueue::new();
    let mut timers = TimerQueue::default();
    let mut ticks = TickService::new(platform.now());
    let mut dirty = DirtySurfaces::all();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = face.draw(&mut framebuffer);
    let _ = framebuffer.flush(&mut display);
    window.update(&display);

    'running: loop {
        let loop_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                _ => {}
            }
        }

        if let Some(event) = ticks.poll(platform.now()) {
            if let Err(e) = queue.post(event) {
                warn!("Tick lost: {}", e);
            }
        }

        for run in timers.take_due(loop_start) {
            if let Err(e) = queue.post(WatchEvent::SubTick(run)) {
                warn!("Sub-tick lost: {}", e);
            }
        }

        face.drain(&queue, &mut timers, &mut dirty);

        if dirty.is_dirty() {
            let surfaces = dirty.take();
            debug!("Repainting {:?}", surfaces);
            let _ = face.draw(&mut framebuffer);
            let _ = framebuffer.flush(&mut display);
        }

        window.update(&display);

        let elapsed = loop_start.elapsed();
        if elapsed < LOOP_PERIOD {
            std::thread::sleep(LOOP_PERIOD - elapsed);
        }
    }

    info!("Simulator exiting");
}
