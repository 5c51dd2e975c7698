//! Progress-callback trait for parse events.
//!
//! Inject an [`Arc<dyn ParseProgressCallback>`] via
//! [`crate::config::ParseConfigBuilder::progress_callback`] to follow a parse
//! as it moves through scheme detection and the extraction cascade.
//!
//! # Example
//!
//! ```rust
//! use sgpa_extract::{ParseConfig, ParseProgressCallback, Strategy};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Trail {
//!     tried: Mutex<Vec<Strategy>>,
//! }
//!
//! impl ParseProgressCallback for Trail {
//!     fn on_strategy_attempt(&self, strategy: Strategy) {
//!         self.tried.lock().unwrap().push(strategy);
//!     }
//! }
//!
//! let config = ParseConfig::builder()
//!     .progress_callback(Arc::new(Trail::default()))
//!     .build()
//!     .unwrap();
//! ```

use crate::pipeline::cascade::Strategy;
use crate::scheme::Scheme;
use std::sync::Arc;

/// Called by the parser at each stage of a document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ParseProgressCallback: Send + Sync {
    /// Called once text extraction is done.
    ///
    /// # Arguments
    /// * `pages`: number of pages in the document (0 for plain-text input)
    fn on_parse_start(&self, pages: usize) {
        let _ = pages;
    }

    /// Called with the scheme used for grading, detected or overridden.
    fn on_scheme_detected(&self, scheme: Scheme) {
        let _ = scheme;
    }

    /// Called before each cascade stage runs.
    fn on_strategy_attempt(&self, strategy: Strategy) {
        let _ = strategy;
    }

    /// Called after each cascade stage with how many rows it recovered.
    /// Zero means the stage failed and the next one runs.
    fn on_strategy_result(&self, strategy: Strategy, records: usize) {
        let _ = (strategy, records);
    }

    /// Called once with the number of distinct subjects in the report.
    fn on_parse_complete(&self, subjects: usize) {
        let _ = subjects;
    }
}

/// A no-op implementation, used when no callback is configured.
pub struct NoopProgressCallback;

impl ParseProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ParseConfig`].
pub type ProgressCallback = Arc<dyn ParseProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        attempts: AtomicUsize,
        last_result: Mutex<Option<(Strategy, usize)>>,
        subjects: AtomicUsize,
    }

    impl ParseProgressCallback for TrackingCallback {
        fn on_strategy_attempt(&self, _strategy: Strategy) {
            self.attempts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_strategy_result(&self, strategy: Strategy, records: usize) {
            *self.last_result.lock().unwrap() = Some((strategy, records));
        }

        fn on_parse_complete(&self, subjects: usize) {
            self.subjects.store(subjects, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_parse_start(2);
        cb.on_scheme_detected(Scheme::Y2022);
        cb.on_strategy_attempt(Strategy::Oracle);
        cb.on_strategy_result(Strategy::Oracle, 0);
        cb.on_parse_complete(0);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_strategy_attempt(Strategy::StrictPattern);
        tracker.on_strategy_result(Strategy::StrictPattern, 0);
        tracker.on_strategy_attempt(Strategy::LineHeuristic);
        tracker.on_strategy_result(Strategy::LineHeuristic, 4);
        tracker.on_parse_complete(4);

        assert_eq!(tracker.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(
            *tracker.last_result.lock().unwrap(),
            Some((Strategy::LineHeuristic, 4))
        );
        assert_eq!(tracker.subjects.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_parse_start(1);
        cb.on_parse_complete(3);
    }
}
