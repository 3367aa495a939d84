//! 候选记录与托管记录

use std::fmt;

use kyro_provider::{DnsRecord, DnsRecordType};

/// Kind of a raw record found at a failover alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// `A`
    Address,
    /// `CNAME`
    Alias,
    /// `TXT` holding `<tag>:<payload>`; must be decoded before use
    Pointer,
}

impl From<DnsRecordType> for CandidateKind {
    fn from(record_type: DnsRecordType) -> Self {
        match record_type {
            DnsRecordType::A => Self::Address,
            DnsRecordType::Cname => Self::Alias,
            DnsRecordType::Txt => Self::Pointer,
        }
    }
}

/// A record at the failover alias, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub kind: CandidateKind,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl From<DnsRecord> for CandidateRecord {
    /// Every record type the provider reports can be a candidate.
    fn from(record: DnsRecord) -> Self {
        Self {
            kind: record.record_type.into(),
            content: record.value,
            ttl: record.ttl,
            proxied: record.proxied,
        }
    }
}

/// Kind of a publishable record. Pointers never reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Address,
    Alias,
}

impl RecordKind {
    pub fn record_type(self) -> DnsRecordType {
        match self {
            Self::Address => DnsRecordType::A,
            Self::Alias => DnsRecordType::Cname,
        }
    }

    pub fn from_record_type(record_type: DnsRecordType) -> Option<Self> {
        match record_type {
            DnsRecordType::A => Some(Self::Address),
            DnsRecordType::Cname => Some(Self::Alias),
            DnsRecordType::Txt => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_type().as_str())
    }
}

/// A decoded candidate, eligible for probing, selection and publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: RecordKind,
    /// IPv4 literal for `Address`, host name for `Alias`
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (ttl {})", self.kind, self.content, self.ttl)
    }
}

/// The record currently published at the managed subdomain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedRecord {
    /// Provider-assigned id
    pub id: String,
    pub kind: RecordKind,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl ManagedRecord {
    /// `None` unless the record is an address or alias record.
    pub fn from_dns_record(record: DnsRecord) -> Option<Self> {
        Some(Self {
            kind: RecordKind::from_record_type(record.record_type)?,
            id: record.id,
            content: record.value,
            ttl: record.ttl,
            proxied: record.proxied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dns_record(record_type: DnsRecordType, value: &str) -> DnsRecord {
        DnsRecord {
            id: "rec-1".to_string(),
            zone_id: "zone".to_string(),
            name: "_ha.www.example.com".to_string(),
            record_type,
            value: value.to_string(),
            ttl: 120,
            proxied: true,
            comment: None,
        }
    }

    #[test]
    fn candidate_kinds_from_provider_types() {
        let kinds: Vec<CandidateKind> = [DnsRecordType::A, DnsRecordType::Cname, DnsRecordType::Txt]
            .into_iter()
            .map(|t| CandidateRecord::from(dns_record(t, "x")).kind)
            .collect();
        assert_eq!(
            kinds,
            [CandidateKind::Address, CandidateKind::Alias, CandidateKind::Pointer]
        );

        let txt = CandidateRecord::from(dns_record(DnsRecordType::Txt, "A:10.0.0.1"));
        assert_eq!(txt.content, "A:10.0.0.1");
        assert!(txt.proxied);
    }

    #[test]
    fn managed_record_ignores_pointer_types() {
        assert!(ManagedRecord::from_dns_record(dns_record(DnsRecordType::Txt, "x")).is_none());

        let managed =
            ManagedRecord::from_dns_record(dns_record(DnsRecordType::Cname, "edge.example.net"));
        let managed = managed.unwrap();
        assert_eq!(managed.kind, RecordKind::Alias);
        assert_eq!(managed.id, "rec-1");
        assert!(managed.proxied);
    }
}
