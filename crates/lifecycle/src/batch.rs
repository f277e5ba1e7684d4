use indexmap::IndexMap;
use tracing::debug;

use searchgov_core::GovernanceRecord;

use crate::action::Action;
use crate::engine::{ActionContext, Transition, TransitionEngine, TransitionError};

/// Per-record outcome inside a batch.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Applied(Transition),
    Skipped(TransitionError),
}

impl RecordOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RecordOutcome::Applied(_))
    }
}

/// Aggregated result of applying one action across many records, keyed by
/// search name in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: IndexMap<String, RecordOutcome>,
    pub applied: usize,
    pub skipped: usize,
}

impl BatchOutcome {
    /// Successful transitions, in input order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.results.values().filter_map(|outcome| match outcome {
            RecordOutcome::Applied(t) => Some(t),
            RecordOutcome::Skipped(_) => None,
        })
    }

    /// Skipped records with their rejections, in input order.
    pub fn rejections(&self) -> impl Iterator<Item = (&str, &TransitionError)> {
        self.results.iter().filter_map(|(name, outcome)| match outcome {
            RecordOutcome::Skipped(e) => Some((name.as_str(), e)),
            RecordOutcome::Applied(_) => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }
}

/// Apply one action to every record in order. A rejected record is skipped
/// and reported; it never aborts the rest of the batch.
pub fn apply_batch(
    engine: &TransitionEngine,
    records: &[GovernanceRecord],
    action: &Action,
    ctx: &ActionContext,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for record in records {
        match engine.apply(record, action, ctx) {
            Ok(t) => {
                outcome.applied += 1;
                outcome
                    .results
                    .insert(record.search_name.clone(), RecordOutcome::Applied(t));
            }
            Err(e) => {
                outcome.skipped += 1;
                outcome
                    .results
                    .insert(record.search_name.clone(), RecordOutcome::Skipped(e));
            }
        }
    }

    debug!(
        action = action.name(),
        total = records.len(),
        applied = outcome.applied,
        skipped = outcome.skipped,
        "batch complete"
    );
    outcome
}
