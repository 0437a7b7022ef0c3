//! Demo presets
//!
//! Every demo is one [`DemoConfig`]. There is no runtime configuration: the
//! binaries pick a preset at compile time.

use core::time::Duration;

use crate::layout::{BarGeometry, VolumeIndicator};
use crate::progress::Progress;

/// Everything that differs between the demos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Used in log lines only
    pub name: &'static str,
    pub title: &'static str,
    /// Second line, e.g. the song name
    pub song: &'static str,
    pub song_y: i32,
    pub bar: BarGeometry,
    /// Line right under the bar
    pub caption: Option<&'static str>,
    pub status: Option<&'static str>,
    pub footer: Option<&'static str>,
    pub volume: Option<VolumeIndicator>,
    /// Full clear before the first frame; skipped by the fast variants
    pub show_clear: bool,
    /// Progress shown when not animating
    pub static_progress: Progress,
    pub animate: bool,
    pub step_count: u32,
    pub total_duration: Duration,
    /// Completion text drawn in the footer slot of the last frame
    pub done_label: &'static str,
    /// How long the last frame stays up before the panel sleeps
    pub hold_duration: Duration,
}

impl DemoConfig {
    /// Player-like layout with a static 40 % bar
    pub const PLAYER: DemoConfig = DemoConfig {
        name: "player",
        title: "Demo: E-ink OK",
        song: "Song: Test Track 01",
        song_y: 26,
        bar: BarGeometry::new(46, 30, 10),
        caption: Some("01:23 / 03:45"),
        status: Some("BT: Not connected (demo)"),
        footer: Some("DietPi display demo"),
        volume: Some(VolumeIndicator::new(10, 6)),
        show_clear: true,
        static_progress: Progress::percent(40),
        animate: false,
        step_count: 0,
        total_duration: Duration::ZERO,
        done_label: "",
        hold_duration: Duration::from_secs(10),
    };

    /// Minimal single refresh without the initial clear
    pub const FAST: DemoConfig = DemoConfig {
        name: "fast",
        title: "Fast demo",
        song: "E-ink initialized",
        song_y: 26,
        bar: BarGeometry::new(46, 40, 8),
        caption: None,
        status: None,
        footer: Some("Fast load test"),
        volume: None,
        show_clear: false,
        static_progress: Progress::percent(60),
        animate: false,
        step_count: 0,
        total_duration: Duration::ZERO,
        done_label: "",
        hold_duration: Duration::from_secs(3),
    };

    /// Bar filling up in 20 steps over 10 seconds
    pub const PROGRESS: DemoConfig = DemoConfig {
        name: "progress",
        title: "Progress demo",
        song: "Bar fills in 10 seconds",
        song_y: 24,
        bar: BarGeometry::new(48, 30, 10),
        caption: Some("Animating..."),
        status: None,
        footer: None,
        volume: Some(VolumeIndicator::new(10, 6)),
        show_clear: false,
        static_progress: Progress::EMPTY,
        animate: true,
        step_count: 20,
        total_duration: Duration::from_secs(10),
        done_label: "Done!",
        hold_duration: Duration::from_secs(3),
    };

    /// Pause after each animation step
    pub fn step_delay(&self) -> Duration {
        if self.step_count == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.step_count
    }

    /// Number of frames a full run pushes
    pub fn expected_pushes(&self) -> usize {
        if self.animate {
            self.step_count as usize + 2
        } else {
            1
        }
    }

    /// Progress of the first pushed frame
    pub fn initial_progress(&self) -> Progress {
        if self.animate {
            Progress::EMPTY
        } else {
            self.static_progress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_preset_cadence() {
        let cfg = DemoConfig::PROGRESS;
        assert_eq!(cfg.step_delay(), Duration::from_millis(500));
        assert_eq!(cfg.expected_pushes(), 22);
        assert_eq!(cfg.initial_progress(), Progress::EMPTY);
    }

    #[test]
    fn static_presets_push_once() {
        assert_eq!(DemoConfig::PLAYER.expected_pushes(), 1);
        assert_eq!(DemoConfig::FAST.expected_pushes(), 1);
        assert_eq!(DemoConfig::PLAYER.initial_progress(), Progress::percent(40));
        assert_eq!(DemoConfig::FAST.step_delay(), Duration::ZERO);
    }

    #[test]
    fn only_the_player_clears_first() {
        assert!(DemoConfig::PLAYER.show_clear);
        assert!(!DemoConfig::FAST.show_clear);
        assert!(!DemoConfig::PROGRESS.show_clear);
    }
}
