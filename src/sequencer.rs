//! Frame sequencer
//!
//! Drives one demo run: `Init → Animating → Done`, then hold and sleep. The
//! only suspension points are the fixed pauses between pushes; the cancel
//! token is checked there. A failed push ends the run, nothing is retried.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::cancel::CancelToken;
use crate::config::DemoConfig;
use crate::error::SequenceError;
use crate::frame::Frame;
use crate::progress::Progress;
use crate::render::FrameRenderer;
use crate::sink::DisplaySink;

/// Longest single sleep between two looks at the cancel token
pub const POLL_SLICE: Duration = Duration::from_millis(50);

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Init,
    Animating { step: u32 },
    Done,
    Cancelled,
    Faulted,
}

impl SequencerState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SequencerState::Done | SequencerState::Cancelled | SequencerState::Faulted
        )
    }
}

/// How a run ended when it did not fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Why `run_inner` stopped early
enum Halt {
    Interrupted,
    Fault(SequenceError),
}

impl From<SequenceError> for Halt {
    fn from(e: SequenceError) -> Self {
        Halt::Fault(e)
    }
}

pub struct Sequencer<'a, S, D> {
    sink: &'a mut S,
    delay: D,
    cancel: CancelToken,
    config: &'a DemoConfig,
    renderer: FrameRenderer,
    red: Frame,
    state: SequencerState,
    pushes: usize,
}

impl<'a, S, D> Sequencer<'a, S, D>
where
    S: DisplaySink,
    D: DelayNs,
{
    pub fn new(sink: &'a mut S, delay: D, config: &'a DemoConfig, cancel: CancelToken) -> Self {
        let renderer = FrameRenderer::new(config);
        let red = renderer.blank();
        Sequencer {
            sink,
            delay,
            cancel,
            config,
            renderer,
            red,
            state: SequencerState::Init,
            pushes: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Frames pushed so far
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Run to the end, an interrupt, or the first fault
    pub fn run(&mut self) -> Result<Outcome, SequenceError> {
        let result = self.finish();
        debug_assert!(self.state.is_terminal(), "run ended in {:?}", self.state);
        result
    }

    fn finish(&mut self) -> Result<Outcome, SequenceError> {
        match self.run_inner() {
            Ok(()) => Ok(Outcome::Completed),
            Err(Halt::Interrupted) => {
                log::warn!(
                    "Demo '{}' interrupted after {} frame(s)",
                    self.config.name,
                    self.pushes
                );
                self.state = SequencerState::Cancelled;
                Ok(Outcome::Cancelled)
            }
            Err(Halt::Fault(e)) => {
                log::error!("Demo '{}' failed in state {:?}: {}", self.config.name, self.state, e);
                self.state = SequencerState::Faulted;
                Err(e)
            }
        }
    }

    fn run_inner(&mut self) -> Result<(), Halt> {
        log::info!("Starting demo '{}'", self.config.name);
        self.state = SequencerState::Init;

        self.sink.init().map_err(SequenceError::Init)?;
        if self.config.show_clear {
            log::info!("Clearing panel");
            self.sink.clear().map_err(SequenceError::Clear)?;
        }
        if self.cancel.is_cancelled() {
            return Err(Halt::Interrupted);
        }

        let first = self.renderer.render_initial();
        self.push(&first)?;

        if self.config.animate {
            let steps = self.config.step_count;
            let pause = self.config.step_delay();
            for step in 1..=steps {
                self.state = SequencerState::Animating { step };
                let progress = Progress::new(step, steps);
                log::debug!("Step {}/{} ({})", step, steps, progress.label());
                let frame = self.renderer.render_progress(progress);
                self.push(&frame)?;
                self.suspend(pause)?;
            }

            self.state = SequencerState::Done;
            let done = self.renderer.render_done();
            self.push(&done)?;
        }
        self.state = SequencerState::Done;

        log::info!("Holding last frame for {:?}", self.config.hold_duration);
        self.suspend(self.config.hold_duration)?;

        log::info!("Putting display into deep sleep mode");
        self.sink.sleep().map_err(SequenceError::Sleep)?;
        Ok(())
    }

    fn push(&mut self, frame: &Frame) -> Result<(), SequenceError> {
        let index = self.pushes;
        self.sink
            .display(frame.buffer(), self.red.buffer())
            .map_err(|source| SequenceError::Push { index, source })?;
        self.pushes += 1;
        Ok(())
    }

    /// Sleep for `total` in slices, giving up as soon as the token is raised
    fn suspend(&mut self, total: Duration) -> Result<(), Halt> {
        let mut remaining = total;
        loop {
            if self.cancel.is_cancelled() {
                return Err(Halt::Interrupted);
            }
            if remaining.is_zero() {
                return Ok(());
            }
            let slice = remaining.min(POLL_SLICE);
            self.delay.delay_us(slice.as_micros() as u32);
            remaining -= slice;
        }
    }
}
