//! # Todo Store Testing
//!
//! Testing utilities and helpers for reducers built on `todo-core`.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - proptest strategies for list text
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{ReducerTest, SequentialIdGenerator, assertions};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(SequentialIdGenerator::new())))
//!     .given_state(TodoState::new())
//!     .when_actions([
//!         TodoAction::UpdateDraft { text: "Buy milk".into() },
//!         TodoAction::SubmitDraft,
//!     ])
//!     .then_state(|state| assert_eq!(state.count(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::{Clock, IdGenerator};


pub use reducer_test::{assertions, ReducerTest};

/// Deterministic implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: 1, 2, 3, ...
    ///
    /// ```
    /// use todo_testing::mocks::SequentialIdGenerator;
    /// use todo_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), 1);
    /// assert_eq!(ids.next_id(), 2);
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        last: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Starts at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_after(0)
        }

        /// The first id handed out is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                last: AtomicU64::new(last),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> u64 {
            self.last.fetch_add(1, Ordering::SeqCst) + 1
        }
    }
}

/// Test helpers
pub mod helpers {
    /// Route `tracing` output through the test harness's captured writer
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Non-empty text with no surrounding whitespace
    pub fn item_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ]{0,14}[A-Za-z0-9]|[A-Za-z0-9]"
    }

    /// Texts that are pairwise distinct under case-insensitive comparison
    pub fn distinct_texts(max: usize) -> impl Strategy<Value = Vec<String>> {
        vec(item_text(), 0..=max).prop_map(|texts| {
            let mut seen = HashSet::new();
            texts
                .into_iter()
                .filter(|text| seen.insert(text.to_lowercase()))
                .collect()
        })
    }

    /// Pads `text` with a random mix of spaces and tabs on both sides
    pub fn padded(text: String) -> impl Strategy<Value = String> {
        ("[ \t]{0,3}", "[ \t]{0,3}").prop_map(move |(left, right)| format!("{left}{text}{right}"))
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, SequentialIdGenerator};
