//! 候选记录解析服务

use std::sync::Arc;

use crate::error::{FailoverError, FailoverResult};
use crate::pointer::decode_candidate;
use crate::services::ServiceContext;
use crate::types::{Candidate, CandidateRecord, DomainTarget};

/// Fetches and decodes the candidates published at a domain's failover alias.
pub struct CandidateResolver {
    ctx: Arc<ServiceContext>,
}

impl CandidateResolver {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Candidates in provider order.
    ///
    /// Fails with [`FailoverError::CandidateNotFound`] when the alias holds no address,
    /// alias or pointer record. Pointers that fail to decode are dropped with a warning.
    pub async fn resolve(&self, target: &DomainTarget) -> FailoverResult<Vec<Candidate>> {
        let records = self
            .ctx
            .provider
            .list_all_records(&target.zone_id, &target.failover_alias)
            .await?;

        let raw: Vec<CandidateRecord> = records.into_iter().map(CandidateRecord::from).collect();

        if raw.is_empty() {
            return Err(FailoverError::CandidateNotFound {
                domain: target.subdomain.clone(),
                alias: target.failover_alias.clone(),
            });
        }

        let candidates: Vec<Candidate> = raw
            .into_iter()
            .filter_map(|record| match decode_candidate(record) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    log::warn!("Skipping candidate at {}: {e}", target.failover_alias);
                    None
                }
            })
            .collect();

        log::debug!(
            "{} candidate(s) at {} for {}",
            candidates.len(),
            target.failover_alias,
            target.subdomain
        );
        Ok(candidates)
    }
}
