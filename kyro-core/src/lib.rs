//! Kyro Core Library
//!
//! Failover logic for DNS-published services:
//! - Pointer decoding (`A:<ip>` / `CNAME:<host>` TXT payloads)
//! - Candidate resolution from the failover alias
//! - Reachability probing (TCP / ICMP) with retries
//! - Winner selection and record reconciliation
//! - Periodic scheduling with per-domain failure isolation
//!
//! The DNS provider, the name resolver and the probe transport are injected through
//! [`ServiceContext`], so the engine runs unchanged against scripted implementations.

pub mod error;
pub mod pointer;
pub mod selector;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{DecodeError, FailoverError, FailoverResult};
pub use services::{
    FailoverService, PASS_LOG_LEVEL, Scheduler, ServiceContext, UPDATE_LOG_LEVEL,
};
pub use traits::{NameResolver, ProbeTransport};
