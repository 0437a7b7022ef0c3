//! 1-bit frame canvas
//!
//! A [`Frame`] is drawn in the landscape layout the UI is designed for
//! (250×122) and stored packed in the panel's native portrait RAM layout
//! (122×250, 16 bytes per line, MSB first, bit set = white). The mapping
//! between the two is fixed by [`ORIENTATION`].

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use epd_waveshare::graphics::DisplayRotation;

use crate::epd::{BUFFER_LEN, HEIGHT, LINE_BYTES, WIDTH};

/// How the panel is mounted: landscape, long side horizontal
pub const ORIENTATION: DisplayRotation = DisplayRotation::Rotate270;

/// Logical width seen by drawing code
pub const FRAME_WIDTH: u32 = HEIGHT;

/// Logical height seen by drawing code
pub const FRAME_HEIGHT: u32 = WIDTH;

/// Packed 1-bit raster, white when created
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buffer: Box<[u8]>,
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("ink_pixels", &self.ink_pixels())
            .finish_non_exhaustive()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Blank (all white) frame
    pub fn new() -> Self {
        Frame {
            buffer: vec![0xFF; BUFFER_LEN].into_boxed_slice(),
        }
    }

    /// Packed buffer in panel RAM order
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Color at a logical position, `None` outside the frame
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (byte, mask) = locate(point)?;
        Some(if self.buffer[byte] & mask == 0 {
            BinaryColor::On
        } else {
            BinaryColor::Off
        })
    }

    /// Number of black pixels, handy for quick comparisons
    pub fn ink_pixels(&self) -> u32 {
        // Padding bits of each line are never cleared, so counting zero bits is exact.
        self.buffer.iter().map(|b| b.count_zeros()).sum()
    }

    fn set(&mut self, point: Point, color: BinaryColor) {
        let Some((byte, mask)) = locate(point) else {
            return;
        };
        match color {
            BinaryColor::On => self.buffer[byte] &= !mask,
            BinaryColor::Off => self.buffer[byte] |= mask,
        }
    }
}

/// Byte index and bit mask of a logical point
fn locate(point: Point) -> Option<(usize, u8)> {
    if point.x < 0 || point.y < 0 {
        return None;
    }
    let (x, y) = (point.x as u32, point.y as u32);
    if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
        return None;
    }
    let (col, row) = match ORIENTATION {
        DisplayRotation::Rotate0 => (x, y),
        DisplayRotation::Rotate90 => (WIDTH - 1 - y, x),
        DisplayRotation::Rotate180 => (WIDTH - 1 - x, HEIGHT - 1 - y),
        DisplayRotation::Rotate270 => (y, HEIGHT - 1 - x),
    };
    let byte = row as usize * LINE_BYTES + col as usize / 8;
    Some((byte, 0x80 >> (col % 8)))
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point, color);
        }
        Ok(())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(FRAME_WIDTH, FRAME_HEIGHT)
    }
}
