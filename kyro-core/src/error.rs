//! Unified error type definition

use thiserror::Error;

// Re-export library error type
pub use kyro_provider::ProviderError;

/// Pointer record decode failure.
///
/// Stays inside candidate resolution: the record is skipped with a warning and never
/// fails the domain on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Content is not exactly `<tag>:<payload>`
    #[error("Malformed pointer {raw:?}: expected `<tag>:<payload>`, found {tokens} token(s)")]
    Malformed { raw: String, tokens: usize },

    /// Payload is empty after trimming
    #[error("Malformed pointer {raw:?}: empty payload")]
    EmptyPayload { raw: String },

    /// Tag is `A` but the payload is not an IPv4 literal
    #[error("Invalid IPv4 address in pointer: {payload:?}")]
    InvalidAddress { payload: String },

    /// Alias payload is not a usable host name
    #[error("Invalid host name in pointer: {payload:?}")]
    InvalidHostname { payload: String },
}

/// Per-domain failover error.
///
/// Every variant is non-fatal: the scheduler records it against the domain and carries
/// on with the next one.
#[derive(Error, Debug, Clone)]
pub enum FailoverError {
    /// The failover alias has no address, alias or pointer records
    #[error("No candidates found at {alias} for {domain}")]
    CandidateNotFound { domain: String, alias: String },

    /// Every candidate failed its reachability probe
    #[error("No healthy candidate for {domain}")]
    NoHealthyCandidate { domain: String },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Processing the domain panicked
    #[error("Domain processing panicked: {0}")]
    Panicked(String),
}

impl FailoverError {
    /// Whether it is expected behavior (nothing healthy, nothing configured at the alias,
    /// etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::CandidateNotFound { .. } | Self::NoHealthyCandidate { .. } => true,
            Self::Provider(e) => e.is_expected(),
            Self::Panicked(_) => false,
        }
    }
}

/// Failover Result type alias
pub type FailoverResult<T> = std::result::Result<T, FailoverError>;
