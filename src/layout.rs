//! Pixel geometry of the demo UI
//!
//! All coordinates are in the landscape frame (250×122). Nothing here is
//! validated at runtime; the values are tuned for this one panel.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::progress::Progress;

/// Left margin shared by every text line
pub const MARGIN_X: i32 = 4;

/// Top of the title line
pub const TITLE_Y: i32 = 4;

/// Status (Bluetooth) line
pub const STATUS_Y: i32 = 80;

/// Footer sits this far above the bottom edge
pub const FOOTER_OFFSET: i32 = 14;

/// Progress bar outline
///
/// The outline spans `x..=x + width` and `y..=y + height`, so it is one pixel
/// wider and taller than the nominal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BarGeometry {
    /// Bar spanning the frame width minus `right_gap`
    pub const fn new(y: i32, right_gap: u32, height: u32) -> Self {
        BarGeometry {
            x: MARGIN_X,
            y,
            width: FRAME_WIDTH - right_gap,
            height,
        }
    }

    pub fn outline(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x, self.y),
            Size::new(self.width + 1, self.height + 1),
        )
    }

    /// Filled part for `progress`, `None` when there is nothing to fill
    pub fn fill(&self, progress: Progress) -> Option<Rectangle> {
        let fill = progress.fill_width(self.width);
        if fill == 0 {
            return None;
        }
        Some(Rectangle::new(
            Point::new(self.x, self.y),
            Size::new(fill + 1, self.height + 1),
        ))
    }

    /// Anchor of the line drawn right under the bar
    pub fn caption_anchor(&self) -> Point {
        Point::new(MARGIN_X, self.y + self.height as i32 + 4)
    }

    /// Anchor of the percentage label, right of the bar
    pub fn label_anchor(&self) -> Point {
        Point::new(self.x + self.width as i32 + 2, self.y - 2)
    }
}

/// Vertical volume scale on the right edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeIndicator {
    pub x: i32,
    pub top: i32,
    pub bottom: i32,
    pub max_steps: u32,
    pub level: u32,
}

impl VolumeIndicator {
    /// Scale 12 px from the right edge, 10 px from top and bottom
    pub const fn new(max_steps: u32, level: u32) -> Self {
        VolumeIndicator {
            x: FRAME_WIDTH as i32 - 12,
            top: 10,
            bottom: FRAME_HEIGHT as i32 - 10,
            max_steps,
            level,
        }
    }

    /// Vertical centre of tick `i`, counted from the bottom
    pub fn tick_center(&self, i: u32) -> i32 {
        let span = i64::from(self.bottom - self.top);
        let offset = (2 * i64::from(i) + 1) * span / (2 * i64::from(self.max_steps));
        self.bottom - offset as i32
    }

    /// Tick box: 7 px wide, 5 px tall around its centre
    pub fn tick(&self, i: u32) -> Rectangle {
        let cy = self.tick_center(i);
        Rectangle::with_corners(Point::new(self.x - 3, cy - 2), Point::new(self.x + 3, cy + 2))
    }

    pub fn is_lit(&self, i: u32) -> bool {
        i < self.level
    }
}

/// Anchor of the footer line
pub fn footer_anchor() -> Point {
    Point::new(MARGIN_X, FRAME_HEIGHT as i32 - FOOTER_OFFSET)
}

/// True when `rect` lies fully inside the frame
pub fn fits(rect: &Rectangle) -> bool {
    let frame = Rectangle::new(Point::zero(), Size::new(FRAME_WIDTH, FRAME_HEIGHT));
    match rect.bottom_right() {
        Some(br) => frame.contains(rect.top_left) && frame.contains(br),
        None => frame.contains(rect.top_left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fill_for_forty_percent() {
        let bar = BarGeometry::new(46, 30, 10);
        assert_eq!(bar.width, 220);
        let fill = bar.fill(Progress::percent(40)).unwrap();
        assert_eq!(fill.top_left.x, 4);
        assert_eq!(fill.bottom_right().unwrap().x, 4 + 88);
    }

    #[test]
    fn empty_progress_has_no_fill() {
        let bar = BarGeometry::new(48, 30, 10);
        assert!(bar.fill(Progress::EMPTY).is_none());
    }

    #[test]
    fn full_progress_covers_outline() {
        let bar = BarGeometry::new(48, 30, 10);
        assert_eq!(bar.fill(Progress::FULL), Some(bar.outline()));
    }

    #[test]
    fn volume_ticks_step_up_from_bottom() {
        let vol = VolumeIndicator::new(10, 6);
        assert_eq!(vol.x, 238);
        assert_eq!(vol.tick_center(0), 107);
        assert_eq!(vol.tick_center(9), 16);
        assert!(vol.is_lit(5));
        assert!(!vol.is_lit(6));
        for i in 0..10 {
            assert!(fits(&vol.tick(i)), "tick {i} leaves the frame");
        }
    }

    #[test]
    fn bars_fit_the_frame() {
        assert!(fits(&BarGeometry::new(46, 30, 10).outline()));
        assert!(fits(&BarGeometry::new(46, 40, 8).outline()));
        assert!(!fits(&Rectangle::new(Point::new(240, 0), Size::new(20, 4))));
    }
}
