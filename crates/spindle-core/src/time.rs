//! Wall-clock values delivered by the platform tick service

use crate::error::{SpindleError, SpindleResult};

bitflags::bitflags! {
    /// Units that changed in a tick event.
    ///
    /// A minute boundary also carries `SECOND`, the same way a tick service
    /// reports every unit that rolled over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimeUnits: u8 {
        const SECOND = 0b0000_0001;
        const MINUTE = 0b0000_0010;
        const HOUR = 0b0000_0100;
    }
}

impl TimeUnits {
    /// Units changed when moving from `previous` to `next`.
    pub fn between(previous: &WallClock, next: &WallClock) -> Self {
        let mut units = TimeUnits::empty();
        if previous.second != next.second {
            units |= TimeUnits::SECOND;
        }
        if previous.minute != next.minute {
            units |= TimeUnits::MINUTE;
        }
        if previous.hour != next.hour {
            units |= TimeUnits::HOUR;
        }
        units
    }
}

/// Hour display mode, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourMode {
    /// `00`..`23`
    #[default]
    TwentyFour,
    /// `01`..`12`
    Twelve,
}

impl HourMode {
    pub fn from_24_hour_flag(is_24_hour: bool) -> Self {
        if is_24_hour {
            HourMode::TwentyFour
        } else {
            HourMode::Twelve
        }
    }

    /// Map a 24-hour clock hour to the value shown in this mode.
    pub fn display_hour(self, hour: u8) -> u8 {
        match self {
            HourMode::TwentyFour => hour,
            HourMode::Twelve => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

/// A validated time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallClock {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallClock {
    pub fn new(hour: u8, minute: u8, second: u8) -> SpindleResult<Self> {
        if hour > 23 {
            return Err(SpindleError::InvalidTime {
                field: "hour",
                value: hour,
            });
        }
        if minute > 59 {
            return Err(SpindleError::InvalidTime {
                field: "minute",
                value: minute,
            });
        }
        if second > 59 {
            return Err(SpindleError::InvalidTime {
                field: "second",
                value: second,
            });
        }

        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_components() {
        assert_eq!(
            WallClock::new(24, 0, 0),
            Err(SpindleError::InvalidTime {
                field: "hour",
                value: 24
            })
        );
        assert!(WallClock::new(23, 60, 0).is_err());
        assert!(WallClock::new(23, 59, 60).is_err());
        assert!(WallClock::new(23, 59, 59).is_ok());
    }

    #[test]
    fn test_twelve_hour_mapping() {
        let mode = HourMode::Twelve;
        assert_eq!(mode.display_hour(0), 12);
        assert_eq!(mode.display_hour(12), 12);
        assert_eq!(mode.display_hour(13), 1);
        assert_eq!(mode.display_hour(23), 11);
        assert_eq!(HourMode::TwentyFour.display_hour(0), 0);
    }

    #[test]
    fn test_units_between_minute_rollover() {
        let before = WallClock::new(14, 4, 59).unwrap();
        let after = WallClock::new(14, 5, 0).unwrap();
        let units = TimeUnits::between(&before, &after);
        assert!(units.contains(TimeUnits::MINUTE | TimeUnits::SECOND));
        assert!(!units.contains(TimeUnits::HOUR));
    }
}
