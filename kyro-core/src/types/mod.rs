//! 类型定义模块

mod probe;
mod record;
mod report;
mod settings;

pub use probe::{Health, ProbeOutcome, UnhealthyReason};
pub use record::{Candidate, CandidateKind, CandidateRecord, ManagedRecord, RecordKind};
pub use report::{DomainFailure, DomainResult, PassReport, ReconcileOutcome};
pub use settings::{
    DEFAULT_DOH_ENDPOINT, DEFAULT_NODE, DomainTarget, FailoverSettings, ProbeMethod,
    ProbeOverrides, ProbeSettings,
};

// Re-export provider 库的公共类型
pub use kyro_provider::{CreateDnsRecordRequest, DnsRecord, DnsRecordType};
