//! Frame rendering
//!
//! The static part of the UI is drawn once into a base frame. Every pushed
//! frame is a copy of that base with the bar fill and labels drawn on top.

use embedded_graphics::mono_font::iso_8859_15::{FONT_6X12, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::DemoConfig;
use crate::frame::Frame;
use crate::layout::{self, VolumeIndicator, MARGIN_X, STATUS_Y, TITLE_Y};
use crate::progress::Progress;

/// Ink color, black on the primary layer
const INK: BinaryColor = BinaryColor::On;

fn big_text() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_9X15_BOLD)
        .text_color(INK)
        .build()
}

fn small_text() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X12, INK)
}

/// Draw `item` into `frame`; a [`Frame`] target cannot fail
fn paint<T>(item: &T, frame: &mut Frame)
where
    T: Drawable<Color = BinaryColor>,
{
    match item.draw(frame) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

/// Draw `text` with its top-left corner at `anchor`
fn draw_text(
    frame: &mut Frame,
    text: &str,
    anchor: Point,
    style: MonoTextStyle<'static, BinaryColor>,
) {
    paint(&Text::with_baseline(text, anchor, style, Baseline::Top), frame);
}

fn draw_volume(frame: &mut Frame, vol: &VolumeIndicator) {
    paint(
        &Line::new(Point::new(vol.x, vol.top), Point::new(vol.x, vol.bottom))
            .into_styled(PrimitiveStyle::with_stroke(INK, 1)),
        frame,
    );

    for i in 0..vol.max_steps {
        let style = if vol.is_lit(i) {
            PrimitiveStyle::with_fill(INK)
        } else {
            PrimitiveStyle::with_stroke(INK, 1)
        };
        paint(&vol.tick(i).into_styled(style), frame);
    }
}

/// Produces frames for one demo configuration
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    config: DemoConfig,
    base: Frame,
}

impl FrameRenderer {
    pub fn new(config: &DemoConfig) -> Self {
        FrameRenderer {
            config: config.clone(),
            base: Self::draw_base(config),
        }
    }

    fn draw_base(config: &DemoConfig) -> Frame {
        let mut frame = Frame::new();

        draw_text(&mut frame, config.title, Point::new(MARGIN_X, TITLE_Y), big_text());
        draw_text(
            &mut frame,
            config.song,
            Point::new(MARGIN_X, config.song_y),
            small_text(),
        );

        paint(
            &config
                .bar
                .outline()
                .into_styled(PrimitiveStyle::with_stroke(INK, 1)),
            &mut frame,
        );

        if let Some(caption) = config.caption {
            draw_text(&mut frame, caption, config.bar.caption_anchor(), small_text());
        }
        if let Some(status) = config.status {
            draw_text(&mut frame, status, Point::new(MARGIN_X, STATUS_Y), small_text());
        }
        if let Some(vol) = &config.volume {
            draw_volume(&mut frame, vol);
        }
        if let Some(footer) = config.footer {
            draw_text(&mut frame, footer, layout::footer_anchor(), small_text());
        }

        frame
    }

    /// Static elements only
    pub fn base(&self) -> &Frame {
        &self.base
    }

    /// Red layer, unused by these layouts
    pub fn blank(&self) -> Frame {
        Frame::new()
    }

    /// First pushed frame: the starting bar fill, never a label
    pub fn render_initial(&self) -> Frame {
        let mut frame = self.base.clone();
        self.fill_bar(&mut frame, self.config.initial_progress());
        frame
    }

    /// Base plus bar fill; animated configs also get the percentage label
    pub fn render_progress(&self, progress: Progress) -> Frame {
        let mut frame = self.base.clone();
        self.fill_bar(&mut frame, progress);
        if self.config.animate {
            draw_text(
                &mut frame,
                &progress.label(),
                self.config.bar.label_anchor(),
                small_text(),
            );
        }
        frame
    }

    /// Base plus a full bar and the completion label
    pub fn render_done(&self) -> Frame {
        let mut frame = self.base.clone();
        self.fill_bar(&mut frame, Progress::FULL);
        draw_text(
            &mut frame,
            self.config.done_label,
            layout::footer_anchor(),
            small_text(),
        );
        frame
    }

    fn fill_bar(&self, frame: &mut Frame, progress: Progress) {
        if let Some(fill) = self.config.bar.fill(progress) {
            paint(&fill.into_styled(PrimitiveStyle::with_fill(INK)), frame);
        }
    }
}
