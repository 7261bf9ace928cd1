//! Face colours
//!
//! RGB565: R(5 bits), G(6 bits), B(5 bits). From 8-bit RGB use R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::Rgb565;

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Pure black
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Warm orange for the second-hand marker
pub const ACCENT: Rgb565 = Rgb565::new(230 >> 3, 110 >> 2, 40 >> 3);

/// Colours for every element of the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePalette {
    pub background: Rgb565,
    pub spinner: Rgb565,
    pub winder: Rgb565,
    pub hub: Rgb565,
    pub text: Rgb565,
    /// Fill behind the digits so they stay legible over the blades
    pub text_background: Rgb565,
}

impl Default for FacePalette {
    /// Black blades on a white dial with an orange second marker.
    fn default() -> Self {
        Self {
            background: WHITE,
            spinner: BLACK,
            winder: ACCENT,
            hub: BLACK,
            text: WHITE,
            text_background: BLACK,
        }
    }
}
