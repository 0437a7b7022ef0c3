//! Cooperative cancellation
//!
//! The operator stops a demo with Ctrl-C (or a service manager with SIGTERM).
//! The signal only raises a flag; the sequencer looks at it between steps and
//! winds down on its own, so the panel is never left mid-transfer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::{SIGINT, SIGTERM};

/// Shared stop flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raise this token on SIGINT and SIGTERM
    pub fn install_signal_handlers(&self) -> std::io::Result<()> {
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&self.flag))?;
        }
        log::debug!("Interrupt handlers installed");
        Ok(())
    }
}
