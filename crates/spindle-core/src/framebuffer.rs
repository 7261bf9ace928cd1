//! RAM framebuffer with changed-pixel tracking.
//!
//! The face is repainted in full whenever any surface is dirty, because the
//! blades, hub and text overlap. Painting into this buffer first means only
//! the pixels that actually changed are pushed to the panel: most sub-ticks
//! move the blades a few degrees and leave the digits alone.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

/// Bounding box of pixels changed since the last flush, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChangedArea {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl ChangedArea {
    fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-allocated `DrawTarget<Color = Rgb565>` the face paints into.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    changed: Option<ChangedArea>,
}

impl FrameBuffer {
    /// Allocate a buffer of `size`, initially black with nothing changed.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            changed: None,
        }
    }

    /// Colour at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Area that the next [`flush`](Self::flush) will send, if any.
    pub fn changed_area(&self) -> Option<Rectangle> {
        self.changed.map(ChangedArea::to_rectangle)
    }

    fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.changed {
                Some(area) => area.include(x, y),
                None => self.changed = Some(ChangedArea::at(x, y)),
            }
        }
    }

    /// Send the changed area to `display` and reset tracking.
    ///
    /// No-op when nothing changed since the previous flush.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(area) = self.changed.take() else {
            return Ok(());
        };

        let rect = area.to_rectangle();
        trace!(
            "Flushing {}x{} changed area at ({}, {})",
            rect.size.width, rect.size.height, area.min_x, area.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let row_len = area.max_x - area.min_x + 1;
        let colors = (area.min_y..=area.max_y).flat_map(move |y| {
            let row_start = y * stride + area.min_x;
            pixels[row_start..row_start + row_len].iter().copied()
        });

        display.fill_contiguous(&rect, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.index_of(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_buffer_has_no_changes() {
        let buffer = FrameBuffer::new(Size::new(16, 8));
        assert_eq!(buffer.changed_area(), None);
        assert_eq!(buffer.pixel(Point::new(15, 7)), Some(Rgb565::BLACK));
        assert_eq!(buffer.pixel(Point::new(16, 0)), None);
        assert_eq!(buffer.pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_changed_area_bounds_changed_pixels_only() {
        let mut buffer = FrameBuffer::new(Size::new(16, 16));
        Rectangle::new(Point::new(2, 3), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut buffer)
            .unwrap();

        assert_eq!(
            buffer.changed_area(),
            Some(Rectangle::new(Point::new(2, 3), Size::new(4, 2)))
        );
    }

    #[test]
    fn test_repainting_same_colour_is_not_a_change() {
        let mut buffer = FrameBuffer::new(Size::new(8, 8));
        buffer.clear(Rgb565::BLACK).unwrap();
        assert_eq!(buffer.changed_area(), None);
    }

    #[test]
    fn test_flush_copies_changed_area_and_resets() {
        let mut buffer = FrameBuffer::new(Size::new(8, 8));
        Pixel(Point::new(5, 6), Rgb565::RED)
            .draw(&mut buffer)
            .unwrap();

        let mut panel = FrameBuffer::new(Size::new(8, 8));
        buffer.flush(&mut panel).unwrap();

        assert_eq!(panel.pixel(Point::new(5, 6)), Some(Rgb565::RED));
        assert_eq!(panel.changed_area(), buffer_area(5, 6));
        assert_eq!(buffer.changed_area(), None);
    }

    #[test]
    fn test_drawing_off_screen_is_clipped() {
        let mut buffer = FrameBuffer::new(Size::new(8, 8));
        Rectangle::new(Point::new(-4, -4), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut buffer)
            .unwrap();

        assert_eq!(
            buffer.changed_area(),
            Some(Rectangle::new(Point::zero(), Size::new(2, 2)))
        );
    }

    fn buffer_area(x: i32, y: i32) -> Option<Rectangle> {
        Some(Rectangle::new(Point::new(x, y), Size::new(1, 1)))
    }
}
