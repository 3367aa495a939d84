//! 周期调度服务
//!
//! One pass walks every configured domain in order. A failure (or panic) while
//! processing a domain is recorded against that domain only. Passes never overlap.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Local;
use futures::FutureExt;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::MissedTickBehavior;

use crate::error::FailoverError;
use crate::services::{FailoverService, PASS_LOG_LEVEL, ServiceContext};
use crate::types::{DomainFailure, DomainResult, DomainTarget, PassReport};

/// Drives reconciliation passes over all configured domains.
pub struct Scheduler {
    ctx: Arc<ServiceContext>,
    failover: FailoverService,
    in_flight: Mutex<()>,
}

impl Scheduler {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            failover: FailoverService::new(ctx.clone()),
            ctx,
            in_flight: Mutex::new(()),
        }
    }

    /// Run a pass now, unless one is already running.
    ///
    /// Returns `None` (and logs it) when the trigger was skipped.
    pub async fn trigger(&self) -> Option<PassReport> {
        let Ok(guard) = self.in_flight.try_lock() else {
            log::warn!("A check pass is already running; trigger skipped");
            return None;
        };
        Some(self.pass(guard).await)
    }

    /// Run exactly one pass, waiting for any pass in flight to finish first.
    pub async fn run_once(&self) -> PassReport {
        let guard = self.in_flight.lock().await;
        self.pass(guard).await
    }

    /// Pass immediately, then every `check_interval` until `shutdown` resolves.
    ///
    /// Ticks missed while a pass runs are skipped. A pass in progress when shutdown
    /// is requested is finished first.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let interval = self.ctx.settings.check_interval;
        log::info!(
            "Scheduler started: {} domain(s), interval {}ms",
            self.ctx.settings.domains.len(),
            interval.as_millis()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    log::info!("Scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.trigger().await;
                }
            }
        }
    }

    async fn pass(&self, _guard: MutexGuard<'_, ()>) -> PassReport {
        let started_at = Local::now();
        log::log!(PASS_LOG_LEVEL, "=== Health check start {started_at} ===");

        let mut results = Vec::with_capacity(self.ctx.settings.domains.len());
        for target in &self.ctx.settings.domains {
            let result = self.process_isolated(target).await;
            results.push((target.subdomain.clone(), result));
        }

        let report = PassReport {
            started_at,
            finished_at: Local::now(),
            results,
        };
        log::debug!(
            "=== Health check end: {} updated, {} failed ===",
            report.updated_count(),
            report.failures().count()
        );
        report
    }

    /// Process one domain, turning any error or panic into a [`DomainFailure`].
    async fn process_isolated(&self, target: &DomainTarget) -> DomainResult {
        let outcome = AssertUnwindSafe(self.failover.process_domain(target))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(FailoverError::Panicked(panic_message(&*payload))));

        match outcome {
            Ok(outcome) => outcome.into(),
            Err(reason) => {
                if reason.is_expected() {
                    log::warn!("{}: {reason}", target.subdomain);
                } else {
                    log::error!("{}: {reason}", target.subdomain);
                }
                DomainResult::Failed(DomainFailure {
                    domain: target.subdomain.clone(),
                    reason,
                    at: Local::now(),
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
