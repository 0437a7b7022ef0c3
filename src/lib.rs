//! Now-playing demo for the Waveshare 2.13" tri-color e-ink HAT
//!
//! A demo is a [`config::DemoConfig`] preset. [`run`] renders its frames with
//! [`render::FrameRenderer`], pushes them through a [`sink::DisplaySink`] at a
//! fixed cadence and always releases the hardware on the way out.

pub mod cancel;
pub mod config;
pub mod epd;
pub mod error;
pub mod frame;
pub mod layout;
pub mod progress;
pub mod render;
pub mod sequencer;
pub mod sink;

#[cfg(target_os = "linux")]
pub mod hardware;

use embedded_hal::delay::DelayNs;

pub use crate::cancel::CancelToken;
pub use crate::config::DemoConfig;
pub use crate::error::{HardwareError, SequenceError};
pub use crate::sequencer::{Outcome, Sequencer, SequencerState};
pub use crate::sink::{DisplaySink, SinkGuard};

/// Run one demo on an acquired sink
///
/// The sink is owned by a [`SinkGuard`] for the duration of the run and
/// released exactly once, whether the run completes, is cancelled or faults.
pub fn run<S, D>(
    sink: S,
    delay: D,
    config: &DemoConfig,
    cancel: &CancelToken,
) -> Result<Outcome, SequenceError>
where
    S: DisplaySink,
    D: DelayNs,
{
    let mut guard = SinkGuard::new(sink);
    let result = Sequencer::new(&mut *guard, delay, config, cancel.clone()).run();
    guard.release();
    result
}

/// Entry point shared by the demo binaries
///
/// Installs the logger and interrupt handlers, opens the panel and runs
/// `config`. An interrupt is not an error.
#[cfg(target_os = "linux")]
pub fn launch(config: &DemoConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    init_logger();

    let cancel = CancelToken::new();
    cancel
        .install_signal_handlers()
        .context("installing interrupt handlers")?;

    let panel = hardware::open_panel().context("acquiring the display")?;
    match run(panel, linux_embedded_hal::Delay, config, &cancel)? {
        Outcome::Completed => log::info!("Demo '{}' finished", config.name),
        Outcome::Cancelled => log::info!("Demo '{}' stopped by operator", config.name),
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn launch(config: &DemoConfig) -> anyhow::Result<()> {
    init_logger();
    anyhow::bail!(
        "demo '{}' needs spidev and the GPIO character device (Linux only)",
        config.name
    )
}

/// `log` backend: stdout, `info` unless `RUST_LOG` says otherwise
fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .parse_default_env()
        .init();
}
