//! Bounded, read-only views over shared mutable containers.
//!
//! A [`SubView`] represents `source[offset, length]` without copying it. It
//! answers every non-destructive operation as if it were that slice, rejects
//! destructive ones, and warns (through `tracing`) when the source changed
//! since the view was created.
//!
//! The containers themselves are [`values::Value`]s, operated on through the
//! native operation table in [`ops`].

extern crate alloc;

pub mod api;
pub mod ops;
pub mod source;
pub mod specialization;
pub mod verbosity;
pub mod view;

pub use subview_values as values;

pub use api::error::{ConstructionError, ConstructionErrorKind, InvokeError, OpError};
pub use source::{SharedValue, Source, shared};
pub use specialization::{Specialization, SubArray, SubObject, SubString};
pub use verbosity::Verbosity;
pub use view::{DestructiveGuard, Snapshot, SubView};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_construction() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }

    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut out = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber scoped to the current thread and return
    /// everything it logged, one event per line.
    pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || CaptureWriter(Arc::clone(&sink)))
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.lock().unwrap_or_else(PoisonError::into_inner).clone();
        (result, String::from_utf8_lossy(&bytes).into_owned())
    }
}
