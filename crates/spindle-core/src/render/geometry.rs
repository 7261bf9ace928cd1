//! Blade outlines and their rotation about the dial centre

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Triangle;
use libm::{cosf, roundf, sinf};

/// A triangular outline in dial coordinates, origin at the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blade {
    points: [Point; 3],
}

/// Spinner blade; its tip reaches past the screen edge.
pub const SPINNER_BLADE: Blade = Blade::new([
    Point::new(0, 0),
    Point::new(-150, 30),
    Point::new(-30, 150),
]);

/// Second-hand marker, pointing in at the hub.
pub const WINDER_BLADE: Blade = Blade::new([
    Point::new(-5, -40),
    Point::new(5, -40),
    Point::new(0, -24),
]);

impl Blade {
    pub const fn new(points: [Point; 3]) -> Self {
        Self { points }
    }

    /// Rotate clockwise (screen y grows downward) by `angle_deg` and move
    /// the pivot to `center`.
    pub fn rotated(&self, center: Point, angle_deg: f32) -> Triangle {
        let radians = angle_deg.to_radians();
        let (sin, cos) = (sinf(radians), cosf(radians));
        let [a, b, c] = self.points.map(|p| rotate(p, sin, cos) + center);
        Triangle::new(a, b, c)
    }
}

fn rotate(point: Point, sin: f32, cos: f32) -> Point {
    let x = point.x as f32;
    let y = point.y as f32;
    Point::new(
        roundf(x * cos - y * sin) as i32,
        roundf(x * sin + y * cos) as i32,
    )
}
