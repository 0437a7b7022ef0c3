//! Display sink abstraction and the guard that owns it
//!
//! A sink takes two packed layer buffers and refreshes the panel. The guard
//! makes sure the hardware lines are handed back on every exit path: normal
//! completion, interrupt, or an error bubbling up through `?`.

use core::ops::{Deref, DerefMut};

use crate::error::HardwareError;

/// Physical display driver as seen by the sequencer
pub trait DisplaySink {
    /// Power up and configure the controller
    fn init(&mut self) -> Result<(), HardwareError>;

    /// Blank both layers with a full refresh
    fn clear(&mut self) -> Result<(), HardwareError>;

    /// Write both layers and refresh
    ///
    /// `primary` is the black/white layer, `secondary` the red layer. Both are
    /// packed in the panel's native orientation.
    fn display(&mut self, primary: &[u8], secondary: &[u8]) -> Result<(), HardwareError>;

    /// Enter low-power deep sleep
    fn sleep(&mut self) -> Result<(), HardwareError>;

    /// Hand the hardware lines back
    ///
    /// Must be idempotent and must not fail: it runs from `Drop`.
    fn release(&mut self);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn init(&mut self) -> Result<(), HardwareError> {
        (**self).init()
    }

    fn clear(&mut self) -> Result<(), HardwareError> {
        (**self).clear()
    }

    fn display(&mut self, primary: &[u8], secondary: &[u8]) -> Result<(), HardwareError> {
        (**self).display(primary, secondary)
    }

    fn sleep(&mut self) -> Result<(), HardwareError> {
        (**self).sleep()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Scoped owner of a sink, releases it exactly once
pub struct SinkGuard<S: DisplaySink> {
    sink: S,
    released: bool,
}

impl<S: DisplaySink> SinkGuard<S> {
    /// Take ownership of an acquired sink
    pub fn new(sink: S) -> Self {
        SinkGuard {
            sink,
            released: false,
        }
    }

    /// Release now instead of waiting for drop
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        log::info!("Releasing display hardware");
        self.sink.release();
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<S: DisplaySink> Deref for SinkGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.sink
    }
}

impl<S: DisplaySink> DerefMut for SinkGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: DisplaySink> Drop for SinkGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        releases: usize,
    }

    impl DisplaySink for CountingSink {
        fn init(&mut self) -> Result<(), HardwareError> {
            Ok(())
        }
        fn clear(&mut self) -> Result<(), HardwareError> {
            Ok(())
        }
        fn display(&mut self, _: &[u8], _: &[u8]) -> Result<(), HardwareError> {
            Ok(())
        }
        fn sleep(&mut self) -> Result<(), HardwareError> {
            Ok(())
        }
        fn release(&mut self) {
            self.releases += 1;
        }
    }

    #[test]
    fn drop_releases_once() {
        let mut sink = CountingSink::default();
        {
            let _guard = SinkGuard::new(&mut sink);
        }
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn explicit_release_is_not_repeated_on_drop() {
        let mut sink = CountingSink::default();
        {
            let mut guard = SinkGuard::new(&mut sink);
            guard.release();
            guard.release();
            assert!(guard.is_released());
        }
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn release_runs_when_unwinding() {
        let mut sink = CountingSink::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SinkGuard::new(&mut sink);
            panic!("fault while drawing");
        }));
        assert!(result.is_err());
        assert_eq!(sink.releases, 1);
    }
}
