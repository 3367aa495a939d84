//! 单域名故障转移流程

use std::sync::Arc;

use crate::error::FailoverResult;
use crate::selector::select_winner;
use crate::services::{CandidateResolver, ReachabilityProber, Reconciler, ServiceContext};
use crate::types::{DomainTarget, ReconcileOutcome};

/// Resolve → probe → select → reconcile for one domain.
pub struct FailoverService {
    ctx: Arc<ServiceContext>,
    candidates: CandidateResolver,
    prober: ReachabilityProber,
    reconciler: Reconciler,
}

impl FailoverService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            candidates: CandidateResolver::new(ctx.clone()),
            prober: ReachabilityProber::new(ctx.clone()),
            reconciler: Reconciler::new(ctx.clone()),
            ctx,
        }
    }

    /// Run the whole pipeline for `target`. Errors are left to the caller to record.
    pub async fn process_domain(&self, target: &DomainTarget) -> FailoverResult<ReconcileOutcome> {
        log::info!("Check: {}", target.subdomain);

        let candidates = self.candidates.resolve(target).await?;
        let settings = self.ctx.settings.probe_settings_for(target);
        let outcomes = self.prober.probe_all(candidates, &settings).await;
        let winner = select_winner(&target.subdomain, outcomes)?;
        log::debug!("Winner for {}: {winner}", target.subdomain);

        self.reconciler.reconcile(target, &winner).await
    }
}
