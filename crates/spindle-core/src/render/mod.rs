//! Render composition for the watchface
//!
//! [`compose`] is a pure function of the spin, winder and text state: it
//! decides angles, colours and strings and returns a [`FaceFrame`]. Only
//! [`FaceFrame::draw`] touches a display, through any embedded-graphics
//! `DrawTarget<Color = Rgb565>`.
//!
//! Draw order, back to front:
//! 1. dial background
//! 2. the two mirrored spinner blades
//! 3. the winder blade
//! 4. the hub
//! 5. hour and minute text

mod geometry;
mod palette;
mod surface;

pub use geometry::{Blade, SPINNER_BLADE, WINDER_BLADE};
pub use palette::{ACCENT, BLACK, FacePalette, WHITE};
pub use surface::{DirtySurfaces, SurfaceId, SurfaceSet};

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder, ascii::FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::animation::{SpinState, WinderState};
use crate::text::TimeTextBuffer;

/// Default screen width in pixels
pub const FACE_WIDTH_PX: u32 = 144;

/// Default screen height in pixels
pub const FACE_HEIGHT_PX: u32 = 168;

/// Hub radius in pixels
const HUB_RADIUS_PX: u32 = 8;

/// Distance from the top/bottom edge to the middle of each text line
const TEXT_INSET_PX: i32 = 22;

/// Font for the hour and minute digits
const TIME_FONT: &MonoFont<'static> = &FONT_10X20;

/// Full default screen.
pub fn face_bounds() -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(FACE_WIDTH_PX, FACE_HEIGHT_PX))
}

/// Where each element sits on a given screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    pub bounds: Rectangle,
    pub center: Point,
    pub hour_anchor: Point,
    pub minute_anchor: Point,
    pub hub_radius: u32,
}

impl FaceLayout {
    pub fn new(bounds: Rectangle) -> Self {
        let top = bounds.top_left.y;
        let bottom = top + bounds.size.height as i32;
        let center = Point::new(
            bounds.top_left.x + bounds.size.width as i32 / 2,
            top + bounds.size.height as i32 / 2,
        );

        Self {
            bounds,
            center,
            hour_anchor: Point::new(center.x, top + TEXT_INSET_PX),
            minute_anchor: Point::new(center.x, bottom - TEXT_INSET_PX),
            hub_radius: HUB_RADIUS_PX,
        }
    }
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self::new(face_bounds())
    }
}

/// Rotation and fill of one blade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladePose {
    pub angle_deg: f32,
    pub color: Rgb565,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HubCircle {
    pub center: Point,
    pub radius: u32,
    pub color: Rgb565,
}

/// A line of text with its placement hints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextField<'a> {
    pub text: &'a str,
    pub anchor: Point,
    pub alignment: Alignment,
    pub color: Rgb565,
    pub background: Rgb565,
}

impl TextField<'_> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let character_style = MonoTextStyleBuilder::new()
            .font(TIME_FONT)
            .text_color(self.color)
            .background_color(self.background)
            .build();
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(self.text, self.anchor, character_style, text_style)
            .draw(display)?;
        Ok(())
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame<'a> {
    pub bounds: Rectangle,
    pub center: Point,
    pub background: Rgb565,
    pub spinner: [BladePose; 2],
    pub winder: BladePose,
    pub hub: HubCircle,
    pub hour: TextField<'a>,
    pub minute: TextField<'a>,
}

/// Build the draw instructions for the current state.
///
/// The winder blade turns with the spin as well as with the seconds: its
/// angle is the winder angle plus `winder_offset_deg` plus the eased spin.
pub fn compose<'a>(
    spin: &SpinState,
    winder: &WinderState,
    winder_offset_deg: i32,
    text: &'a TimeTextBuffer,
    layout: &FaceLayout,
    palette: &FacePalette,
) -> FaceFrame<'a> {
    let spinner = spin.blade_angles_deg().map(|angle_deg| BladePose {
        angle_deg,
        color: palette.spinner,
    });

    let winder_angle = (winder.normalized_deg() + winder_offset_deg) as f32 + spin.angle_deg();

    let current = text.current();
    let field = |text: &'a str, anchor: Point| TextField {
        text,
        anchor,
        alignment: Alignment::Center,
        color: palette.text,
        background: palette.text_background,
    };

    FaceFrame {
        bounds: layout.bounds,
        center: layout.center,
        background: palette.background,
        spinner,
        winder: BladePose {
            angle_deg: winder_angle,
            color: palette.winder,
        },
        hub: HubCircle {
            center: layout.center,
            radius: layout.hub_radius,
            color: palette.hub,
        },
        hour: field(current.hour(), layout.hour_anchor),
        minute: field(current.minute(), layout.minute_anchor),
    }
}

impl FaceFrame<'_> {
    /// Paint the whole face.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;

        for blade in &self.spinner {
            SPINNER_BLADE
                .rotated(self.center, blade.angle_deg)
                .into_styled(PrimitiveStyle::with_fill(blade.color))
                .draw(display)?;
        }

        WINDER_BLADE
            .rotated(self.center, self.winder.angle_deg)
            .into_styled(PrimitiveStyle::with_fill(self.winder.color))
            .draw(display)?;

        Circle::with_center(self.hub.center, self.hub.radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(self.hub.color))
            .draw(display)?;

        self.hour.draw(display)?;
        self.minute.draw(display)?;

        Ok(())
    }
}
