//! Progress fraction kept as an exact ratio
//!
//! Fill widths and percentage labels are floors of exact products, so a step
//! like 7/20 always yields 35 % no matter how a float would have rounded.

/// `step / steps`, clamped to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    step: u32,
    steps: u32,
}

impl Progress {
    pub const EMPTY: Progress = Progress { step: 0, steps: 1 };
    pub const FULL: Progress = Progress { step: 1, steps: 1 };

    /// `step` of `steps`; `steps == 0` is treated as complete
    pub const fn new(step: u32, steps: u32) -> Self {
        if steps == 0 {
            return Self::FULL;
        }
        let step = if step > steps { steps } else { step };
        Progress { step, steps }
    }

    /// Whole percent, `percent(40)` is 0.4
    pub const fn percent(pct: u32) -> Self {
        Self::new(pct, 100)
    }

    /// floor(100 · step / steps)
    pub fn percent_value(&self) -> u32 {
        (u64::from(self.step) * 100 / u64::from(self.steps)) as u32
    }

    /// floor(bar_width · step / steps)
    pub fn fill_width(&self, bar_width: u32) -> u32 {
        (u64::from(bar_width) * u64::from(self.step) / u64::from(self.steps)) as u32
    }

    /// Text shown next to the bar, e.g. `"35%"`
    pub fn label(&self) -> String {
        format!("{}%", self.percent_value())
    }

    pub fn is_complete(&self) -> bool {
        self.step == self.steps
    }
}
