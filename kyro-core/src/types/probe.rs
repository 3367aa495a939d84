//! 探测结果类型

use std::fmt;
use std::net::IpAddr;

use super::Candidate;

/// Why a candidate is considered down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnhealthyReason {
    /// The candidate could not be turned into an address
    Unresolvable(String),
    /// Resolution succeeded with an empty address set
    NoAddress,
    /// Every attempt failed or timed out
    Unreachable {
        address: IpAddr,
        attempts: u32,
        last_error: String,
    },
}

impl fmt::Display for UnhealthyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolvable(detail) => write!(f, "unresolvable: {detail}"),
            Self::NoAddress => f.write_str("resolved to no address"),
            Self::Unreachable {
                address,
                attempts,
                last_error,
            } => write!(
                f,
                "{address} unreachable after {attempts} attempt(s): {last_error}"
            ),
        }
    }
}

/// Health of one candidate in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Healthy {
        /// Address that answered
        address: IpAddr,
        /// Attempts used, including the successful one
        attempts: u32,
    },
    Unhealthy(UnhealthyReason),
}

/// 单个候选的探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub candidate: Candidate,
    pub health: Health,
}

impl ProbeOutcome {
    pub fn healthy(&self) -> bool {
        matches!(self.health, Health::Healthy { .. })
    }
}
