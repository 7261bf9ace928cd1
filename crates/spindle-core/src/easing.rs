//! Easing curves for the spin animation
//!
//! Every curve maps normalized progress `p` in `[0, 1]` to eased progress with
//! `ease(0) == 0` and `ease(1) == 1`. Callers clamp `p` before calling. The
//! curves are not guaranteed to stay inside `[0, 1]` in between: the back
//! family pulls below 0 and past 1 on purpose.
//!
//! The active curve is an [`Easing`] value carried by
//! [`SpindleConfig`](crate::config::SpindleConfig), so swapping curves never
//! touches the animation clock or state code.

use core::f64::consts::TAU;

/// Selectable easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Piecewise-quadratic bounce that settles on 1
    #[default]
    BounceOut,
    /// Back easing applied to the end of the motion
    BackOut,
    /// Back easing mirrored about the midpoint
    BackInOut,
}

impl Easing {
    /// Evaluate the curve at `p`.
    pub fn ease(self, p: f64) -> f64 {
        match self {
            Easing::BounceOut => bounce_ease_out(p),
            Easing::BackOut => back_ease_out(p),
            Easing::BackInOut => back_ease_in_out(p),
        }
    }

    /// Short name used in logs and environment variables.
    pub fn name(self) -> &'static str {
        match self {
            Easing::BounceOut => "bounce",
            Easing::BackOut => "back-out",
            Easing::BackInOut => "back-in-out",
        }
    }

    /// Parse the name returned by [`Easing::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bounce" => Some(Easing::BounceOut),
            "back-out" => Some(Easing::BackOut),
            "back-in-out" => Some(Easing::BackInOut),
            _ => None,
        }
    }
}

/// Bounce ease-out.
///
/// The coefficients are exact; each segment meets its neighbour at 1.0.
pub fn bounce_ease_out(p: f64) -> f64 {
    // The last segment lands a few ulps above 1.0 at p = 1
    if p >= 1.0 {
        return 1.0;
    }

    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}

/// Back ease-out: overshoots past 1 before settling.
pub fn back_ease_out(p: f64) -> f64 {
    let f = 1.0 - p;
    1.0 - back_curve(f)
}

/// Back ease-in-out: the in half for `p < 0.5`, the out half mirrored after.
pub fn back_ease_in_out(p: f64) -> f64 {
    if p < 0.5 {
        let f = 2.0 * p;
        0.5 * back_curve(f)
    } else {
        let f = 1.0 - (2.0 * p - 1.0);
        0.5 * (1.0 - back_curve(f)) + 0.5
    }
}

/// `f² - f·sin(f·τ)`: 0 at `f = 0`, 1 at `f = 1`.
fn back_curve(f: f64) -> f64 {
    f * f - f * libm::sin(f * TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::BounceOut, Easing::BackOut, Easing::BackInOut];

    #[test]
    fn test_endpoints_are_exact() {
        assert_eq!(bounce_ease_out(0.0), 0.0);
        assert_eq!(bounce_ease_out(1.0), 1.0);

        for easing in ALL {
            assert!(easing.ease(0.0).abs() < 1e-12, "{:?} at 0", easing);
            assert!((easing.ease(1.0) - 1.0).abs() < 1e-12, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_bounce_is_continuous_at_segment_boundaries() {
        for boundary in [4.0 / 11.0, 8.0 / 11.0, 9.0 / 10.0] {
            let left = bounce_ease_out(boundary - 1e-9);
            let right = bounce_ease_out(boundary);
            assert!(
                (left - right).abs() < 1e-6,
                "discontinuity at {}: {} vs {}",
                boundary,
                left,
                right
            );
            // Every segment boundary is a bounce landing at exactly 1.0
            assert!((right - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bounce_dips_between_segments() {
        // Midway through the second segment the curve has bounced back down
        let mid = bounce_ease_out(6.0 / 11.0);
        assert!(mid < 1.0 && mid > 0.6, "unexpected bounce value {}", mid);
    }

    #[test]
    fn test_bounce_first_crosses_half_early() {
        assert!(bounce_ease_out(0.25) < 0.5);
        assert!(bounce_ease_out(0.275) > 0.5);
    }

    #[test]
    fn test_back_out_overshoots() {
        // f = 0.25 → f² - f·sin(π/2) = -0.1875
        let value = back_ease_out(0.75);
        assert!((value - 1.1875).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_back_in_out_is_continuous_at_midpoint() {
        let left = back_ease_in_out(0.5 - 1e-9);
        let right = back_ease_in_out(0.5);
        assert!((left - 0.5).abs() < 1e-6);
        assert!((right - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_names_round_trip() {
        for easing in ALL {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
        assert_eq!(Easing::from_name("linear"), None);
    }
}
