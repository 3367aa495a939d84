//! 检查轮次报告

use chrono::{DateTime, Local};

use crate::error::FailoverError;

/// Result of reconciling one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Published record already matches the winner
    Unchanged,
    /// A new record was published; `replaced` is the id of the deleted one, if any
    Updated { replaced: Option<String> },
}

/// A per-domain failure caught at the domain boundary.
#[derive(Debug, Clone)]
pub struct DomainFailure {
    pub domain: String,
    pub reason: FailoverError,
    pub at: DateTime<Local>,
}

/// Per-domain entry of a [`PassReport`].
#[derive(Debug, Clone)]
pub enum DomainResult {
    Unchanged,
    Updated { replaced: Option<String> },
    Failed(DomainFailure),
}

impl From<ReconcileOutcome> for DomainResult {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Unchanged => Self::Unchanged,
            ReconcileOutcome::Updated { replaced } => Self::Updated { replaced },
        }
    }
}

/// Summary of one pass over all configured domains, in configuration order.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub results: Vec<(String, DomainResult)>,
}

impl PassReport {
    /// Result recorded for `domain`, if it was part of the pass.
    pub fn result_for(&self, domain: &str) -> Option<&DomainResult> {
        self.results
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, result)| result)
    }

    pub fn failures(&self) -> impl Iterator<Item = &DomainFailure> {
        self.results.iter().filter_map(|(_, result)| match result {
            DomainResult::Failed(failure) => Some(failure),
            _ => None,
        })
    }

    pub fn updated_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| matches!(r, DomainResult::Updated { .. }))
            .count()
    }
}
