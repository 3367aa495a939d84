//! # kyro-provider
//!
//! DNS provider abstraction used by the kyro failover engine.
//!
//! The engine only needs a narrow slice of a provider API: enumerate the records of one
//! name inside a zone, create a record, and delete a record by id. [`DnsProvider`]
//! captures exactly that, and [`CloudflareProvider`] implements it against the
//! Cloudflare v4 API.
//!
//! ## Features
//!
//! `rustls` (default) or `native-tls` selects the reqwest TLS backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kyro_provider::{CloudflareProvider, DnsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = CloudflareProvider::new("your-token".to_string());
//!     provider.validate_credentials().await?;
//!
//!     let records = provider
//!         .list_all_records("zone-id", "_ha.www.example.com")
//!         .await?;
//!     for record in &records {
//!         println!("{} {} -> {}", record.name, record.record_type, record.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`ProviderError`]. Network errors, timeouts and HTTP 429 are
//! retried with backoff before they are returned; [`ProviderError::is_expected`]
//! separates configuration problems from outages.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;

pub use error::{ProviderError, Result};

pub use traits::DnsProvider;

pub use types::{
    CreateDnsRecordRequest, DnsRecord, DnsRecordType, PaginatedResponse, RecordQueryParams,
};

pub use providers::CloudflareProvider;
