//! Outcome reporters — the audit sink for non-exact decode outcomes.
//!
//! A reporter is a single-method capability invoked synchronously on the
//! decoding thread; a slow reporter serializes with decode throughput, which
//! is an accepted tradeoff. The process-wide slot is optional — absence
//! means silent operation — and is guarded by a lock so installation cannot
//! race with active decoding.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::outcome::FieldOutcome;

/// Receives one event per non-exact decode outcome.
///
/// Implementations are expected to be side-effect-only (log line, metric
/// increment) and non-blocking; the decoder never depends on a return value
/// and never fails when no reporter is installed.
pub trait OutcomeReporter: Send + Sync {
    fn report(&self, outcome: &FieldOutcome);
}

static GLOBAL_REPORTER: RwLock<Option<Arc<dyn OutcomeReporter>>> = RwLock::new(None);

/// Install the process-wide reporter, replacing any previous one.
pub fn set_reporter(reporter: Arc<dyn OutcomeReporter>) {
    let mut slot = GLOBAL_REPORTER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(reporter);
}

/// Remove and return the process-wide reporter, if one was installed.
pub fn clear_reporter() -> Option<Arc<dyn OutcomeReporter>> {
    let mut slot = GLOBAL_REPORTER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    slot.take()
}

/// Report through the process-wide slot; a no-op when empty.
pub(crate) fn report_global(outcome: &FieldOutcome) {
    let slot = GLOBAL_REPORTER
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(reporter) = slot.as_ref() {
        reporter.report(outcome);
    }
}

/// Reporter that forwards outcomes to `tracing`.
///
/// Coercions are routine leniency and log at `debug`; fallbacks mean data
/// was lost or substituted and log at `warn`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl OutcomeReporter for TracingReporter {
    fn report(&self, outcome: &FieldOutcome) {
        match outcome {
            FieldOutcome::Coerced {
                from,
                to,
                path,
                raw_sample,
            } => {
                tracing::debug!(
                    from = from.name(),
                    to = to.name(),
                    path = %path,
                    raw_sample = %raw_sample,
                    "coerced field"
                );
            }
            FieldOutcome::Defaulted {
                expected,
                path,
                reason,
            } => {
                tracing::warn!(
                    expected = expected.name(),
                    path = %path,
                    reason = ?reason,
                    "field fell back to default"
                );
            }
            FieldOutcome::Failed {
                expected,
                path,
                reason,
            } => {
                tracing::warn!(
                    expected = expected.name(),
                    path = %path,
                    reason = ?reason,
                    "optional field failed to decode"
                );
            }
        }
    }
}

/// Reporter that records every outcome in memory.
///
/// Useful in tests and for callers that want strict validation: run a
/// decode pass, then inspect the recorded `Failed`/`Defaulted` outcomes and
/// reject the input if any touched a required field.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    outcomes: Mutex<Vec<FieldOutcome>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn outcomes(&self) -> Vec<FieldOutcome> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return the recorded outcomes.
    pub fn take(&self) -> Vec<FieldOutcome> {
        std::mem::take(
            &mut *self
                .outcomes
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl OutcomeReporter for RecordingReporter {
    fn report(&self, outcome: &FieldOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome.clone());
    }
}
