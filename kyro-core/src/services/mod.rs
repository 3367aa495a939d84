//! 业务逻辑服务层

mod candidate;
mod failover;
mod probe;
mod reconcile;
mod scheduler;

pub use candidate::CandidateResolver;
pub use failover::FailoverService;
pub use probe::{RETRY_DELAY, ReachabilityProber};
pub use reconcile::{ReconcileAction, Reconciler, annotation, plan_reconcile};
pub use scheduler::Scheduler;

use std::sync::Arc;

use kyro_provider::DnsProvider;

use crate::traits::{DohResolver, NameResolver, NetworkTransport, ProbeTransport};
use crate::types::FailoverSettings;

/// 记录更新日志的级别，配置 `log_level = 2` 时仍需可见
pub const UPDATE_LOG_LEVEL: log::Level = log::Level::Warn;
/// 每轮健康检查开始日志的级别
pub const PASS_LOG_LEVEL: log::Level = log::Level::Info;

/// 服务上下文 - 持有所有依赖
///
/// 守护进程层创建此上下文并注入 Provider；解析器与探测传输可替换（测试中使用脚本化实现）。
pub struct ServiceContext {
    /// 不可变配置
    pub settings: Arc<FailoverSettings>,
    /// DNS Provider
    pub provider: Arc<dyn DnsProvider>,
    /// 别名候选的名称解析
    pub resolver: Arc<dyn NameResolver>,
    /// 探测传输
    pub transport: Arc<dyn ProbeTransport>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        settings: Arc<FailoverSettings>,
        provider: Arc<dyn DnsProvider>,
        resolver: Arc<dyn NameResolver>,
        transport: Arc<dyn ProbeTransport>,
    ) -> Self {
        Self {
            settings,
            provider,
            resolver,
            transport,
        }
    }

    /// 使用真实网络的上下文：DoH 解析（系统解析器兜底）+ TCP/ICMP 探测
    #[must_use]
    pub fn with_network(settings: Arc<FailoverSettings>, provider: Arc<dyn DnsProvider>) -> Self {
        let resolver = Arc::new(DohResolver::new(settings.doh_endpoint.clone()));
        Self::new(settings, provider, resolver, Arc::new(NetworkTransport))
    }
}
