//! Pointer record decoding
//!
//! A pointer is a `TXT` record at the failover alias whose text is `<tag>:<payload>`,
//! optionally wrapped in quotes. Tag `A` (any case) makes the payload an IPv4 address;
//! any other tag makes it a host name to publish as `CNAME`.
//!
//! ```text
//! "A:10.0.0.5"               -> Address 10.0.0.5
//! CNAME:origin.example.net   -> Alias   origin.example.net
//! ```

use std::net::Ipv4Addr;

use crate::error::DecodeError;
use crate::types::{Candidate, CandidateKind, CandidateRecord, RecordKind};

/// Decoded pointer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Address(Ipv4Addr),
    Alias(String),
}

impl PointerTarget {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Address(_) => RecordKind::Address,
            Self::Alias(_) => RecordKind::Alias,
        }
    }

    /// Record content to publish.
    pub fn content(&self) -> String {
        match self {
            Self::Address(addr) => addr.to_string(),
            Self::Alias(host) => host.clone(),
        }
    }
}

/// Decode pointer text into its target.
pub fn decode_pointer(raw: &str) -> Result<PointerTarget, DecodeError> {
    let text = raw.trim().trim_matches('"');
    let tokens: Vec<&str> = text.split(':').collect();
    let [tag, payload] = tokens.as_slice() else {
        return Err(DecodeError::Malformed {
            raw: raw.to_string(),
            tokens: tokens.len(),
        });
    };

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload {
            raw: raw.to_string(),
        });
    }

    if tag.trim().eq_ignore_ascii_case("A") {
        return payload
            .parse::<Ipv4Addr>()
            .map(PointerTarget::Address)
            .map_err(|_| DecodeError::InvalidAddress {
                payload: payload.to_string(),
            });
    }

    let host = payload.trim_end_matches('.');
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(DecodeError::InvalidHostname {
            payload: payload.to_string(),
        });
    }
    Ok(PointerTarget::Alias(host.to_string()))
}

/// Turn a raw candidate record into a publishable candidate.
///
/// Address and alias records pass through unchanged; pointer records are decoded and
/// keep the ttl and proxied flag of the `TXT` record that carried them.
pub fn decode_candidate(record: CandidateRecord) -> Result<Candidate, DecodeError> {
    let (kind, content) = match record.kind {
        CandidateKind::Address => (RecordKind::Address, record.content),
        CandidateKind::Alias => (RecordKind::Alias, record.content),
        CandidateKind::Pointer => {
            let target = decode_pointer(&record.content)?;
            (target.kind(), target.content())
        }
    };
    Ok(Candidate {
        kind,
        content,
        ttl: record.ttl,
        proxied: record.proxied,
    })
}
