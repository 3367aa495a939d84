//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kyro_provider::{
    CreateDnsRecordRequest, DnsProvider, DnsRecord, DnsRecordType, PaginatedResponse,
    ProviderError, RecordQueryParams,
};
use kyro_toolbox::ToolboxError;
use tokio::time::Instant;

use crate::services::ServiceContext;
use crate::traits::{NameResolver, ProbeTransport};
use crate::types::{FailoverSettings, ProbeMethod};

pub fn dns_record(
    zone_id: &str,
    name: &str,
    record_type: DnsRecordType,
    value: &str,
    ttl: u32,
) -> DnsRecord {
    DnsRecord {
        id: format!("{name}/{value}"),
        zone_id: zone_id.to_string(),
        name: name.to_string(),
        record_type,
        value: value.to_string(),
        ttl,
        proxied: false,
        comment: None,
    }
}

// ===== MockProvider =====

/// A write issued against the mock zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderWrite {
    Create(CreateDnsRecordRequest),
    Delete { record_id: String },
}

/// In-memory zone store that records every write.
pub struct MockProvider {
    records: Mutex<Vec<DnsRecord>>,
    writes: Mutex<Vec<ProviderWrite>>,
    failing_zones: Mutex<HashSet<String>>,
    panicking_zones: Mutex<HashSet<String>>,
    list_delay: Mutex<Option<Duration>>,
    names_ignore_case: AtomicBool,
    list_calls: AtomicU32,
    next_id: AtomicU32,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            failing_zones: Mutex::new(HashSet::new()),
            panicking_zones: Mutex::new(HashSet::new()),
            list_delay: Mutex::new(None),
            names_ignore_case: AtomicBool::new(false),
            list_calls: AtomicU32::new(0),
            next_id: AtomicU32::new(1),
        }
    }

    pub fn add(&self, record: DnsRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Listing records of `zone_id` fails with a network error.
    pub fn fail_zone(&self, zone_id: &str) {
        self.failing_zones.lock().unwrap().insert(zone_id.to_string());
    }

    /// Listing records of `zone_id` panics.
    pub fn panic_on_zone(&self, zone_id: &str) {
        self.panicking_zones
            .lock()
            .unwrap()
            .insert(zone_id.to_string());
    }

    /// The name filter of `list_records` ignores ASCII case, as some DNS APIs do.
    pub fn match_names_ignoring_case(&self) {
        self.names_ignore_case.store(true, Ordering::SeqCst);
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    pub fn writes(&self) -> Vec<ProviderWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn records_named(&self, name: &str) -> Vec<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DnsProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> kyro_provider::Result<bool> {
        Ok(true)
    }

    async fn list_records(
        &self,
        zone_id: &str,
        params: &RecordQueryParams,
    ) -> kyro_provider::Result<PaginatedResponse<DnsRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.panicking_zones.lock().unwrap().contains(zone_id) {
            panic!("mock provider panicked listing {zone_id}");
        }
        if self.failing_zones.lock().unwrap().contains(zone_id) {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection reset".to_string(),
            });
        }

        let ignore_case = self.names_ignore_case.load(Ordering::SeqCst);
        let matching: Vec<DnsRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .filter(|r| {
                params.name.as_ref().is_none_or(|n| {
                    if ignore_case {
                        r.name.eq_ignore_ascii_case(n)
                    } else {
                        &r.name == n
                    }
                })
            })
            .filter(|r| params.record_type.is_none_or(|t| r.record_type == t))
            .cloned()
            .collect();

        let total = u32::try_from(matching.len()).unwrap();
        let skip = ((params.page.max(1) - 1) * params.page_size) as usize;
        let items = matching
            .into_iter()
            .skip(skip)
            .take(params.page_size as usize)
            .collect();
        Ok(PaginatedResponse::new(
            items,
            params.page.max(1),
            params.page_size,
            total,
        ))
    }

    async fn create_record(
        &self,
        req: &CreateDnsRecordRequest,
    ) -> kyro_provider::Result<DnsRecord> {
        self.writes
            .lock()
            .unwrap()
            .push(ProviderWrite::Create(req.clone()));

        let record = DnsRecord {
            id: format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            zone_id: req.zone_id.clone(),
            name: req.name.clone(),
            record_type: req.record_type,
            value: req.value.clone(),
            ttl: req.ttl,
            proxied: req.proxied,
            comment: req.comment.clone(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn delete_record(&self, record_id: &str, zone_id: &str) -> kyro_provider::Result<()> {
        self.writes.lock().unwrap().push(ProviderWrite::Delete {
            record_id: record_id.to_string(),
        });

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.id == record_id && r.zone_id == zone_id));
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

// ===== MockResolver =====

/// Host → scripted resolution result. Unknown hosts fail.
pub struct MockResolver {
    answers: Mutex<HashMap<String, Result<Vec<IpAddr>, String>>>,
    calls: AtomicU32,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn answer(&self, host: &str, addrs: &[&str]) {
        let addrs = addrs.iter().map(|a| a.parse().unwrap()).collect();
        self.answers
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(addrs));
    }

    pub fn fail(&self, host: &str) {
        self.answers
            .lock()
            .unwrap()
            .insert(host.to_string(), Err("SERVFAIL".to_string()));
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameResolver for MockResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ToolboxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.lock().unwrap().get(host) {
            Some(Ok(addrs)) => Ok(addrs.clone()),
            Some(Err(e)) => Err(ToolboxError::NetworkError(format!("{host}: {e}"))),
            None => Err(ToolboxError::NetworkError(format!("{host}: NXDOMAIN"))),
        }
    }
}

// ===== MockTransport =====

/// Behaviour of a single scripted probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Succeed,
    Fail,
    /// Never completes; only the prober's timeout ends it
    Hang,
}

/// Per-address attempt scripts. When a script runs out the fallback behaviour
/// (default [`Attempt::Fail`]) applies.
pub struct MockTransport {
    scripts: Mutex<HashMap<IpAddr, VecDeque<Attempt>>>,
    fallback: Mutex<HashMap<IpAddr, Attempt>>,
    log: Mutex<Vec<(IpAddr, ProbeMethod, u16, Instant)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn up(&self, addr: &str) {
        self.fallback
            .lock()
            .unwrap()
            .insert(addr.parse().unwrap(), Attempt::Succeed);
    }

    pub fn down(&self, addr: &str) {
        self.fallback
            .lock()
            .unwrap()
            .insert(addr.parse().unwrap(), Attempt::Fail);
    }

    pub fn script(&self, addr: &str, attempts: &[Attempt]) {
        self.scripts
            .lock()
            .unwrap()
            .insert(addr.parse().unwrap(), attempts.iter().copied().collect());
    }

    /// Instants at which attempts against `addr` started.
    pub fn attempts_for(&self, addr: &str) -> Vec<Instant> {
        let addr: IpAddr = addr.parse().unwrap();
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, ..)| *a == addr)
            .map(|(.., at)| *at)
            .collect()
    }

    /// `(method, port)` of every attempt, in order.
    pub fn attempt_params(&self) -> Vec<(ProbeMethod, u16)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, method, port, _)| (*method, *port))
            .collect()
    }

    pub fn total_attempts(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl ProbeTransport for MockTransport {
    async fn attempt(
        &self,
        method: ProbeMethod,
        address: IpAddr,
        port: u16,
    ) -> Result<Duration, ToolboxError> {
        self.log
            .lock()
            .unwrap()
            .push((address, method, port, Instant::now()));

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&address)
            .and_then(VecDeque::pop_front);
        let behaviour = scripted.unwrap_or_else(|| {
            self.fallback
                .lock()
                .unwrap()
                .get(&address)
                .copied()
                .unwrap_or(Attempt::Fail)
        });

        match behaviour {
            Attempt::Succeed => Ok(Duration::from_millis(1)),
            Attempt::Fail => Err(ToolboxError::NetworkError(format!(
                "connection to {address}:{port} refused"
            ))),
            Attempt::Hang => std::future::pending().await,
        }
    }
}

// ===== 测试上下文 =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub provider: Arc<MockProvider>,
    pub resolver: Arc<MockResolver>,
    pub transport: Arc<MockTransport>,
}

pub fn test_context(provider: MockProvider) -> TestContext {
    test_context_with(FailoverSettings::default(), provider)
}

pub fn test_context_with(settings: FailoverSettings, provider: MockProvider) -> TestContext {
    let provider = Arc::new(provider);
    let resolver = Arc::new(MockResolver::new());
    let transport = Arc::new(MockTransport::new());
    let ctx = Arc::new(ServiceContext::new(
        Arc::new(settings),
        provider.clone(),
        resolver.clone(),
        transport.clone(),
    ));
    TestContext {
        ctx,
        provider,
        resolver,
        transport,
    }
}
