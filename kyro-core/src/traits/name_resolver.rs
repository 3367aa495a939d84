//! Name resolution Trait

use std::net::IpAddr;

use async_trait::async_trait;
use kyro_toolbox::{ToolboxError, ToolboxService};

/// Resolves alias candidates to addresses.
///
/// Errors never fail a domain; the prober marks the candidate unresolvable.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Addresses for `host`, in answer order. May be empty.
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ToolboxError>;
}

/// DoH lookup with system-resolver fallback.
#[derive(Debug, Clone)]
pub struct DohResolver {
    endpoint: String,
}

impl DohResolver {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NameResolver for DohResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ToolboxError> {
        ToolboxService::resolve_host(&self.endpoint, host).await
    }
}
