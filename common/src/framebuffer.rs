//! 1bpp framebuffer in SSD1306 page layout.
//!
//! The buffer mirrors the controller's display RAM so a frame can be streamed
//! over I2C without conversion: 8 pages of 128 columns, each byte holding a
//! vertical strip of 8 pixels with the LSB at the top.
//!
//! ```text
//! byte index = x + (y / 8) * SCREEN_WIDTH
//! bit        = y % 8
//! ```
//!
//! [`Framebuffer`] implements `DrawTarget<Color = BinaryColor>`, so programs
//! draw into it through embedded-graphics and the [`gfx`](crate::gfx) helpers.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

use crate::config::{FRAMEBUFFER_SIZE, PAGES, SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Page-organised monochrome framebuffer (1 KiB for 128x64).
#[derive(Clone)]
pub struct Framebuffer {
    buffer: [u8; FRAMEBUFFER_SIZE],
}

impl Framebuffer {
    /// Create a cleared framebuffer.
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAMEBUFFER_SIZE],
        }
    }

    /// Set or clear a single pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        on: bool,
    ) {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return;
        }
        let idx = x as usize + (y as usize >> 3) * WIDTH;
        let bit = 1u8 << (y & 7);
        if on {
            self.buffer[idx] |= bit;
        } else {
            self.buffer[idx] &= !bit;
        }
    }

    /// Read a pixel. Out-of-bounds coordinates read as off.
    #[inline]
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> bool {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return false;
        }
        let idx = x as usize + (y as usize >> 3) * WIDTH;
        self.buffer[idx] & (1u8 << (y & 7)) != 0
    }

    /// Raw display RAM image, ready to be streamed to the controller.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; FRAMEBUFFER_SIZE] { &self.buffer }

    /// One 128-byte page (8 pixel rows), `None` past the last page.
    #[inline]
    pub fn page(
        &self,
        page: usize,
    ) -> Option<&[u8]> {
        self.buffer.get(page * WIDTH..(page + 1) * WIDTH)
    }

    /// Number of lit pixels.
    pub fn lit_pixels(&self) -> u32 { self.buffer.iter().map(|b| b.count_ones()).sum() }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors are supplied row by row for the full (unclipped) area
        let mut colors = colors.into_iter();
        for point in area.points() {
            match colors.next() {
                Some(color) => self.set_pixel(point.x, point.y, color.is_on()),
                None => break,
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let x_start = drawable_area.top_left.x as usize;
        let x_end = x_start + drawable_area.size.width as usize;
        let y_start = drawable_area.top_left.y as usize;
        let y_end = y_start + drawable_area.size.height as usize;

        // Work page by page so full pages are written a byte at a time
        for page in (y_start >> 3)..=((y_end - 1) >> 3) {
            let page_top = page * 8;
            let lo = y_start.max(page_top) - page_top;
            let hi = y_end.min(page_top + 8) - page_top;
            let mask = ((0xFFu16 << lo) & (0xFFu16 >> (8 - hi))) as u8;

            let row = &mut self.buffer[page * WIDTH + x_start..page * WIDTH + x_end];
            if color.is_on() {
                row.iter_mut().for_each(|b| *b |= mask);
            } else {
                row.iter_mut().for_each(|b| *b &= !mask);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

// Compile-time layout check: every page is exactly one display row of bytes
const _: () = assert!(FRAMEBUFFER_SIZE == WIDTH * PAGES);

// =============================================================================
// Tests
// =============================================================================
