//! 记录对账服务
//!
//! Planning is pure ([`plan_reconcile`]); [`Reconciler`] fetches the published record and
//! applies the plan through the provider.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use kyro_provider::CreateDnsRecordRequest;

use crate::error::FailoverResult;
use crate::services::{ServiceContext, UPDATE_LOG_LEVEL};
use crate::types::{Candidate, DomainTarget, ManagedRecord, ReconcileOutcome};

/// What the reconciler has to do for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// The published record already points at the winner
    NoOp,
    /// Delete the old record (if any), then create the new one
    Apply {
        delete: Option<String>,
        create: CreateDnsRecordRequest,
    },
}

/// Record comment: `LastUpdate@<timestamp>@<node>`.
pub fn annotation(at: &DateTime<FixedOffset>, node: &str) -> String {
    format!("LastUpdate@{}@{node}", at.format("%Y-%m-%dT%H:%M:%S%:z"))
}

/// Decide whether `current` has to be replaced by `winner`.
///
/// Kind and content are compared exactly; ttl and proxied differences alone never
/// trigger a write.
pub fn plan_reconcile(
    target: &DomainTarget,
    winner: &Candidate,
    current: Option<&ManagedRecord>,
    annotation: &str,
) -> ReconcileAction {
    if let Some(current) = current
        && current.kind == winner.kind
        && current.content == winner.content
    {
        return ReconcileAction::NoOp;
    }

    ReconcileAction::Apply {
        delete: current.map(|c| c.id.clone()),
        create: CreateDnsRecordRequest {
            zone_id: target.zone_id.clone(),
            name: target.subdomain.clone(),
            record_type: winner.kind.record_type(),
            value: winner.content.clone(),
            ttl: winner.ttl,
            proxied: winner.proxied,
            comment: Some(annotation.to_string()),
        },
    }
}

/// Publishes the winner at the managed subdomain.
pub struct Reconciler {
    ctx: Arc<ServiceContext>,
}

impl Reconciler {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// The address or alias record currently published at the subdomain.
    ///
    /// Fetched fresh on every call. Names must match exactly; with several matches the
    /// first one is used.
    pub async fn fetch_current(&self, target: &DomainTarget) -> FailoverResult<Option<ManagedRecord>> {
        let records = self
            .ctx
            .provider
            .list_all_records(&target.zone_id, &target.subdomain)
            .await?;

        let matches: Vec<ManagedRecord> = records
            .into_iter()
            .filter(|r| r.name == target.subdomain)
            .filter_map(ManagedRecord::from_dns_record)
            .collect();

        if matches.len() > 1 {
            log::warn!(
                "{} address/alias records published at {}; using the first",
                matches.len(),
                target.subdomain
            );
        }

        Ok(matches.into_iter().next())
    }

    /// Execute a plan: delete first, then create.
    ///
    /// Not transactional: if the create fails after the delete succeeded the subdomain
    /// stays empty until the next pass republishes it.
    pub async fn apply(
        &self,
        target: &DomainTarget,
        action: ReconcileAction,
    ) -> FailoverResult<ReconcileOutcome> {
        let ReconcileAction::Apply { delete, create } = action else {
            return Ok(ReconcileOutcome::Unchanged);
        };

        if let Some(ref record_id) = delete {
            self.ctx
                .provider
                .delete_record(record_id, &target.zone_id)
                .await?;
            log::debug!("Deleted old record {record_id} at {}", target.subdomain);
        }

        let created = self.ctx.provider.create_record(&create).await?;
        log::log!(
            UPDATE_LOG_LEVEL,
            "Updated {}: {} ({})",
            target.subdomain,
            created.value,
            created.record_type
        );

        Ok(ReconcileOutcome::Updated { replaced: delete })
    }

    /// Fetch, plan and apply for one winner.
    pub async fn reconcile(
        &self,
        target: &DomainTarget,
        winner: &Candidate,
    ) -> FailoverResult<ReconcileOutcome> {
        let current = self.fetch_current(target).await?;
        let note = annotation(&Local::now().fixed_offset(), &self.ctx.settings.node);
        let action = plan_reconcile(target, winner, current.as_ref(), &note);

        if action == ReconcileAction::NoOp {
            log::info!(
                "No update needed: {} / {}",
                target.subdomain,
                winner.content
            );
        }
        self.apply(target, action).await
    }
}
