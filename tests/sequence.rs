//! Sequencer runs against a recording sink and a fake clock.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use epd_nowplaying::epd::BUFFER_LEN;
use epd_nowplaying::progress::Progress;
use epd_nowplaying::render::FrameRenderer;
use epd_nowplaying::{
    run, CancelToken, DemoConfig, DisplaySink, HardwareError, Outcome, SequenceError, Sequencer,
    SequencerState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Init,
    Clear,
    Display,
    Sleep,
}

/// Sink that records every call and every pushed layer
#[derive(Default)]
struct RecordingSink {
    calls: Vec<Call>,
    frames: Vec<(Vec<u8>, Vec<u8>)>,
    releases: usize,
    fail_init: bool,
    /// Zero-based push that fails
    fail_push: Option<usize>,
}

impl RecordingSink {
    fn pushes(&self) -> usize {
        self.frames.len()
    }
}

impl DisplaySink for RecordingSink {
    fn init(&mut self) -> Result<(), HardwareError> {
        self.calls.push(Call::Init);
        if self.fail_init {
            return Err(HardwareError::BusyTimeout { waited_ms: 30_000 });
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HardwareError> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn display(&mut self, primary: &[u8], secondary: &[u8]) -> Result<(), HardwareError> {
        self.calls.push(Call::Display);
        if self.fail_push == Some(self.frames.len()) {
            return Err(HardwareError::BufferSize {
                expected: BUFFER_LEN,
                actual: 0,
            });
        }
        self.frames.push((primary.to_vec(), secondary.to_vec()));
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), HardwareError> {
        self.calls.push(Call::Sleep);
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

/// Clock that only adds up requested sleeps
#[derive(Default)]
struct FakeClock {
    total_ns: u64,
    calls: usize,
    /// Raise `cancel` once this much time has "passed"
    cancel_after: Option<(Duration, CancelToken)>,
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
        if let Some((after, token)) = &self.cancel_after {
            if Duration::from_nanos(self.total_ns) >= *after {
                token.cancel();
            }
        }
    }
}

impl FakeClock {
    fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.total_ns)
    }
}

#[test]
fn progress_demo_pushes_22_frames() {
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock::default();
    let outcome = run(&mut sink, &mut clock, &DemoConfig::PROGRESS, &CancelToken::new()).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(sink.pushes(), 22);
    assert_eq!(sink.calls.first(), Some(&Call::Init));
    assert_eq!(sink.calls.last(), Some(&Call::Sleep));
    assert!(!sink.calls.contains(&Call::Clear));
    assert_eq!(sink.releases, 1);
    // 20 pauses of 500 ms, then a 3 s hold
    assert_eq!(clock.elapsed(), Duration::from_secs(13));
}

#[test]
fn steps_are_half_a_second_apart() {
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock::default();
    let config = DemoConfig::PROGRESS;
    let cancel = CancelToken::new();
    let mut seq = Sequencer::new(&mut sink, &mut clock, &config, cancel);
    seq.run().unwrap();
    assert_eq!(seq.state(), SequencerState::Done);
    assert!(seq.state().is_terminal());
    assert_eq!(seq.pushes(), 22);
    drop(seq);
    // 500 ms per step in 50 ms slices, 3 s hold in 50 ms slices
    assert_eq!(clock.calls, 20 * 10 + 60);
}

#[test]
fn frames_follow_the_progress() {
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock::default();
    run(&mut sink, &mut clock, &DemoConfig::PROGRESS, &CancelToken::new()).unwrap();

    let renderer = FrameRenderer::new(&DemoConfig::PROGRESS);
    // no "0%" label before the first step
    assert_eq!(sink.frames[0].0, renderer.base().buffer());
    for i in 1..=20 {
        let expected = renderer.render_progress(Progress::new(i, 20));
        assert_eq!(sink.frames[i as usize].0, expected.buffer(), "step {i}");
    }
    assert_eq!(sink.frames[21].0, renderer.render_done().buffer());
    assert!(sink.frames.iter().all(|(_, red)| red.iter().all(|b| *b == 0xFF)));
}

#[test]
fn two_runs_are_bit_identical() {
    let mut first = RecordingSink::default();
    let mut second = RecordingSink::default();
    run(&mut first, &mut FakeClock::default(), &DemoConfig::PROGRESS, &CancelToken::new()).unwrap();
    run(&mut second, &mut FakeClock::default(), &DemoConfig::PROGRESS, &CancelToken::new()).unwrap();
    assert_eq!(first.frames, second.frames);
}

#[test]
fn player_demo_clears_then_pushes_once() {
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock::default();
    run(&mut sink, &mut clock, &DemoConfig::PLAYER, &CancelToken::new()).unwrap();

    assert_eq!(
        sink.calls,
        vec![Call::Init, Call::Clear, Call::Display, Call::Sleep]
    );
    assert_eq!(clock.elapsed(), Duration::from_secs(10));
    assert_eq!(sink.releases, 1);
}

#[test]
fn fast_demo_skips_the_clear() {
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock::default();
    run(&mut sink, &mut clock, &DemoConfig::FAST, &CancelToken::new()).unwrap();

    assert_eq!(sink.calls, vec![Call::Init, Call::Display, Call::Sleep]);
    assert_eq!(clock.elapsed(), Duration::from_secs(3));
}

#[test]
fn interrupt_stops_at_the_next_pause() {
    let cancel = CancelToken::new();
    let mut sink = RecordingSink::default();
    let mut clock = FakeClock {
        cancel_after: Some((Duration::from_millis(1200), cancel.clone())),
        ..FakeClock::default()
    };
    let outcome = run(&mut sink, &mut clock, &DemoConfig::PROGRESS, &cancel).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    // initial frame plus steps 1..=3; the pause after step 3 is cut short
    assert_eq!(sink.pushes(), 4);
    assert!(!sink.calls.contains(&Call::Sleep));
    assert_eq!(sink.releases, 1);
    assert_eq!(clock.elapsed(), Duration::from_millis(1200));
}

#[test]
fn cancelled_before_start_pushes_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut sink = RecordingSink::default();
    let outcome = run(&mut sink, &mut FakeClock::default(), &DemoConfig::PLAYER, &cancel).unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(sink.pushes(), 0);
    assert_eq!(sink.releases, 1);
}

#[test]
fn failed_push_is_fatal_and_not_retried() {
    let mut sink = RecordingSink {
        fail_push: Some(5),
        ..RecordingSink::default()
    };
    let mut clock = FakeClock::default();
    let config = DemoConfig::PROGRESS;
    let cancel = CancelToken::new();
    let mut seq = Sequencer::new(&mut sink, &mut clock, &config, cancel);
    let err = seq.run().unwrap_err();
    assert!(matches!(err, SequenceError::Push { index: 5, .. }));
    assert_eq!(seq.state(), SequencerState::Faulted);
    assert!(seq.state().is_terminal());
    drop(seq);

    let displays = sink.calls.iter().filter(|c| **c == Call::Display).count();
    assert_eq!(displays, 6);
    assert_eq!(sink.pushes(), 5);
    assert!(!sink.calls.contains(&Call::Sleep));
}

#[test]
fn fault_still_releases_once() {
    let mut sink = RecordingSink {
        fail_push: Some(0),
        ..RecordingSink::default()
    };
    let result = run(&mut sink, &mut FakeClock::default(), &DemoConfig::FAST, &CancelToken::new());
    assert!(result.is_err());
    assert_eq!(sink.releases, 1);
}

#[test]
fn init_failure_is_fatal() {
    let mut sink = RecordingSink {
        fail_init: true,
        ..RecordingSink::default()
    };
    let err = run(&mut sink, &mut FakeClock::default(), &DemoConfig::PLAYER, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(
        err,
        SequenceError::Init(HardwareError::BusyTimeout { .. })
    ));
    assert_eq!(sink.calls, vec![Call::Init]);
    assert_eq!(sink.releases, 1);
}

#[test]
fn only_end_states_are_terminal() {
    assert!(!SequencerState::Init.is_terminal());
    assert!(!SequencerState::Animating { step: 3 }.is_terminal());
    assert!(SequencerState::Cancelled.is_terminal());
}
