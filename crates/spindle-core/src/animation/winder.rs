//! Second-hand ("winder") state
//!
//! The winder follows wall-clock seconds linearly, with no easing, like a
//! mechanical second hand.

use crate::config::SpindleConfig;

/// Written only by the second-boundary handler; read by the renderer.
#[derive(Debug, Clone)]
pub struct WinderState {
    start_deg: i32,
    step_deg: i32,
    angle_deg: i32,
}

impl WinderState {
    pub fn new(config: &SpindleConfig) -> Self {
        Self {
            start_deg: config.winder_start_deg,
            step_deg: config.winder_step_deg,
            angle_deg: config.winder_start_deg,
        }
    }

    /// Back to the start-of-minute angle.
    pub fn reset(&mut self) {
        self.angle_deg = self.start_deg;
    }

    /// `start - second * step`.
    pub fn on_second(&mut self, second: u8) {
        self.angle_deg = self.start_deg - i32::from(second) * self.step_deg;
    }

    /// Raw angle; `360` at second 0 with the default tunables.
    pub fn angle_deg(&self) -> i32 {
        self.angle_deg
    }

    /// Angle folded into `[0, 360)`.
    pub fn normalized_deg(&self) -> i32 {
        self.angle_deg.rem_euclid(360)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_value_at_second_zero() {
        let mut winder = WinderState::new(&SpindleConfig::default());
        winder.on_second(0);
        assert_eq!(winder.angle_deg(), 360);
        assert_eq!(winder.normalized_deg(), 0);
    }

    #[test]
    fn test_thirty_seconds_is_thirty_steps_lower() {
        let mut winder = WinderState::new(&SpindleConfig::default());
        winder.on_second(30);
        assert_eq!(winder.angle_deg(), 360 - 30 * 6);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut winder = WinderState::new(&SpindleConfig::default());
        winder.on_second(59);
        assert_eq!(winder.angle_deg(), 6);
        winder.reset();
        assert_eq!(winder.angle_deg(), 360);
    }
}
