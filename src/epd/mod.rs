//! 2.13" tri-color ePaper driver (Waveshare "2.13inch e-Paper B V4")
//!
//! The panel carries an SSD1680-class controller with two RAM planes: `0x24`
//! holds the black/white layer and `0x26` the red layer. Both are 122 pixels
//! wide and 250 lines tall in the panel's native portrait orientation.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but only does
//! what the demo needs.
//!
//! ### Usage
//! 1. draw onto a [`crate::frame::Frame`] with
//!    [`embedded_graphics`](https://github.com/jamwaffles/embedded-graphics)
//! 1. hand both layer buffers to [`driver::Epd2in13bV4`] through
//!    [`crate::sink::DisplaySink::display`]
//! 1. put the panel to sleep and release the lines when done

pub mod driver;
pub mod interface;
pub mod pins;

mod cmd;
mod flag;

/// Display width, pixels horizontally (native orientation)
pub const WIDTH: u32 = 122;

/// Display height, pixels vertically (native orientation)
pub const HEIGHT: u32 = 250;

/// Bytes per RAM row, each row padded up to whole bytes
pub const LINE_BYTES: usize = (WIDTH as usize).div_ceil(8);

/// Size of one packed layer buffer
pub const BUFFER_LEN: usize = epd_waveshare::buffer_len(WIDTH as usize, HEIGHT as usize);
