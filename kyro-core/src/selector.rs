//! Candidate selection

use crate::error::{FailoverError, FailoverResult};
use crate::types::{Candidate, ProbeOutcome};

/// Pick the winner among healthy candidates: highest ttl, earliest on ties.
///
/// `outcomes` must be in resolver order; that order is the tie-break.
pub fn select_winner(domain: &str, outcomes: Vec<ProbeOutcome>) -> FailoverResult<Candidate> {
    let mut winner: Option<Candidate> = None;
    for outcome in outcomes.into_iter().filter(ProbeOutcome::healthy) {
        // strict: an equal ttl later in the list never displaces the earlier one
        if winner
            .as_ref()
            .is_none_or(|best| outcome.candidate.ttl > best.ttl)
        {
            winner = Some(outcome.candidate);
        }
    }

    winner.ok_or_else(|| FailoverError::NoHealthyCandidate {
        domain: domain.to_string(),
    })
}
