//! Error types for the panel and the frame sequencer

use display_interface::DisplayError;
use thiserror::Error;

/// Failure reported by a display sink
#[derive(Debug, Error)]
pub enum HardwareError {
    /// SPI write or pin toggle failed
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),

    /// BUSY stayed high past the timeout
    #[error("panel stayed busy for {waited_ms} ms")]
    BusyTimeout { waited_ms: u32 },

    /// Layer buffer does not match the panel RAM size
    #[error("layer buffer is {actual} bytes, panel expects {expected}")]
    BufferSize { expected: usize, actual: usize },
}

impl From<DisplayError> for HardwareError {
    fn from(e: DisplayError) -> Self {
        HardwareError::Interface(e)
    }
}

/// Fault that ended a sequencer run
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("panel initialisation failed")]
    Init(#[source] HardwareError),

    #[error("panel clear failed")]
    Clear(#[source] HardwareError),

    /// `index` counts pushes from zero, the initial frame included
    #[error("push of frame {index} failed")]
    Push {
        index: usize,
        #[source]
        source: HardwareError,
    },

    #[error("panel refused to enter deep sleep")]
    Sleep(#[source] HardwareError),
}
