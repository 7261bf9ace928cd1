//! Double-buffered hour/minute text
//!
//! A minute boundary writes the new strings into the pending pair straight
//! away. The current pair, which is what gets rendered, only changes when the
//! animation clock commits mid-spin, so the digits flip while the blades are
//! moving fastest.

use core::fmt::Write;

use crate::time::{HourMode, WallClock};

/// Two-digit text field.
pub type TimeField = heapless::String<2>;

/// Hour and minute strings shown together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeText {
    pub hour: TimeField,
    pub minute: TimeField,
}

impl TimeText {
    /// Format `time` for display in `mode`.
    pub fn format(time: &WallClock, mode: HourMode) -> Self {
        Self {
            hour: two_digits(mode.display_hour(time.hour())),
            minute: two_digits(time.minute()),
        }
    }

    pub fn hour(&self) -> &str {
        self.hour.as_str()
    }

    pub fn minute(&self) -> &str {
        self.minute.as_str()
    }
}

/// Zero-padded field for a value below 100.
fn two_digits(value: u8) -> TimeField {
    let mut field = TimeField::new();
    // WallClock bounds every component to 0..=59, so two digits always fit
    write!(field, "{:02}", value).ok();
    field
}

/// Pending/current text pair.
#[derive(Debug, Clone)]
pub struct TimeTextBuffer {
    mode: HourMode,
    pending: TimeText,
    current: TimeText,
}

impl TimeTextBuffer {
    pub fn new(mode: HourMode) -> Self {
        Self {
            mode,
            pending: TimeText::default(),
            current: TimeText::default(),
        }
    }

    pub fn mode(&self) -> HourMode {
        self.mode
    }

    /// Format the new minute into the pending pair. Current is untouched.
    pub fn on_minute_boundary(&mut self, time: &WallClock) {
        self.pending = TimeText::format(time, self.mode);
    }

    /// Copy pending into current.
    pub fn commit(&mut self) {
        self.current.clone_from(&self.pending);
    }

    /// Format and commit immediately, for the first paint.
    pub fn prime(&mut self, time: &WallClock) {
        self.on_minute_boundary(time);
        self.commit();
    }

    pub fn pending(&self) -> &TimeText {
        &self.pending
    }

    pub fn current(&self) -> &TimeText {
        &self.current
    }

    /// Whether a commit would change what is on screen.
    pub fn has_pending_change(&self) -> bool {
        self.pending != self.current
    }
}
