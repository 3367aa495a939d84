//! System DNS resolver, used when the DoH lookup fails.

use std::net::IpAddr;
use std::sync::LazyLock;

use hickory_resolver::{TokioResolver, config::ResolverConfig, name_server::TokioConnectionProvider};

use crate::error::{ToolboxError, ToolboxResult};

/// Shared system DNS resolver.
///
/// On Unix/Windows this uses the host system configuration (e.g. `/etc/resolv.conf`).
/// If the system configuration cannot be loaded, it falls back to Hickory's default
/// upstream set (Google Public DNS).
static SYSTEM_RESOLVER: LazyLock<TokioResolver> = LazyLock::new(build_system_resolver);

fn build_system_resolver() -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(builder) => return builder.build(),
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    TokioResolver::builder_with_config(
        ResolverConfig::default(),
        TokioConnectionProvider::default(),
    )
    .build()
}

/// Resolve `host` to every address the system resolver returns, in answer order.
pub(crate) async fn system_lookup(host: &str) -> ToolboxResult<Vec<IpAddr>> {
    let lookup = SYSTEM_RESOLVER
        .lookup_ip(host)
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("System lookup for {host} failed: {e}")))?;
    Ok(lookup.iter().collect())
}
