//! 可达性探测服务

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::services::ServiceContext;
use crate::types::{Candidate, Health, ProbeOutcome, ProbeSettings, RecordKind, UnhealthyReason};

/// Fixed pause between failed attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(300);

/// Resolves candidates to an address and checks that it answers.
///
/// Never returns an error: every failure becomes an [`UnhealthyReason`].
pub struct ReachabilityProber {
    ctx: Arc<ServiceContext>,
}

impl ReachabilityProber {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Probe every candidate, at most `max_parallel_probes` at a time.
    ///
    /// Outcomes come back in the order of `candidates` whatever the completion order.
    pub async fn probe_all(
        &self,
        candidates: Vec<Candidate>,
        settings: &ProbeSettings,
    ) -> Vec<ProbeOutcome> {
        let limit = self.ctx.settings.max_parallel_probes.max(1);
        stream::iter(candidates)
            .map(|candidate| self.probe(candidate, settings))
            .buffered(limit)
            .collect()
            .await
    }

    /// Probe one candidate.
    pub async fn probe(&self, candidate: Candidate, settings: &ProbeSettings) -> ProbeOutcome {
        let health = match self.resolve_address(&candidate).await {
            Ok(address) => self.check(address, settings).await,
            Err(reason) => Health::Unhealthy(reason),
        };

        match &health {
            Health::Healthy { address, attempts } => {
                log::debug!("✓ {candidate} UP ({address}, attempt {attempts})");
            }
            Health::Unhealthy(reason) => log::debug!("✗ {candidate} DOWN: {reason}"),
        }

        ProbeOutcome { candidate, health }
    }

    /// First address of the candidate. Resolution failures consume no attempts.
    async fn resolve_address(&self, candidate: &Candidate) -> Result<IpAddr, UnhealthyReason> {
        match candidate.kind {
            RecordKind::Address => candidate
                .content
                .trim()
                .parse::<Ipv4Addr>()
                .map(IpAddr::V4)
                .map_err(|_| {
                    UnhealthyReason::Unresolvable(format!(
                        "invalid IPv4 address {:?}",
                        candidate.content
                    ))
                }),
            RecordKind::Alias => {
                let addrs = self
                    .ctx
                    .resolver
                    .resolve(&candidate.content)
                    .await
                    .map_err(|e| UnhealthyReason::Unresolvable(e.to_string()))?;
                addrs.first().copied().ok_or(UnhealthyReason::NoAddress)
            }
        }
    }

    /// Up to `settings.retries` attempts, each raced against `settings.timeout`,
    /// with [`RETRY_DELAY`] between failures and none after the last one.
    async fn check(&self, address: IpAddr, settings: &ProbeSettings) -> Health {
        let attempts = settings.retries;
        let mut last_error = "no attempts configured".to_string();

        for attempt in 1..=attempts {
            let probe = self
                .ctx
                .transport
                .attempt(settings.method, address, settings.port);

            match tokio::time::timeout(settings.timeout, probe).await {
                Ok(Ok(_elapsed)) => {
                    return Health::Healthy {
                        address,
                        attempts: attempt,
                    };
                }
                Ok(Err(e)) => last_error = e.to_string(),
                Err(_) => {
                    last_error = format!("timed out after {}ms", settings.timeout.as_millis());
                }
            }

            if attempt < attempts {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        Health::Unhealthy(UnhealthyReason::Unreachable {
            address,
            attempts,
            last_error,
        })
    }
}
