//! Registration-metadata enrichment for newly seen addresses
//!
//! The lookup service is an external collaborator behind the
//! [`EnrichmentGateway`] trait. One call per address; a failed lookup never
//! aborts the batch — a degraded record carrying only the address keeps the
//! downstream table structure uniform.

mod ipinfo;

pub use ipinfo::IpinfoClient;

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Record field names, in table column order.
pub const FIELD_NAMES: [&str; 4] = ["address", "organization", "country", "hostname"];

/// Fixed-field metadata for one address. Unavailable fields are empty
/// strings, never absent, so every row has the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub address: String,
    pub organization: String,
    pub country: String,
    pub hostname: String,
}

impl EnrichmentRecord {
    /// The record produced when a lookup fails: address only.
    pub fn degraded(address: IpAddr) -> Self {
        Self {
            address: address.to_string(),
            organization: String::new(),
            country: String::new(),
            hostname: String::new(),
        }
    }

    /// Field values in [`FIELD_NAMES`] order.
    pub fn values(&self) -> [&str; 4] {
        [
            &self.address,
            &self.organization,
            &self.country,
            &self.hostname,
        ]
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("lookup timed out")]
    Timeout,

    #[error("unexpected response: {0}")]
    BadResponse(String),
}

/// One metadata lookup per address, rate-limited by the caller.
#[async_trait]
pub trait EnrichmentGateway: Send + Sync {
    async fn lookup(&self, address: IpAddr) -> Result<EnrichmentRecord, LookupError>;
}

/// Result of enriching a batch.
#[derive(Debug)]
pub struct EnrichmentOutcome {
    /// One record per input address, in input order.
    pub records: Vec<EnrichmentRecord>,
    /// How many of those records are degraded.
    pub failed_lookups: usize,
}

/// Look up every address sequentially, spacing calls by `pause`.
///
/// The gateway is invoked exactly once per address regardless of individual
/// failures. The pause is a courtesy delay towards the service's rate
/// limit, so the loop stays strictly sequential.
pub async fn enrich_all(
    gateway: &dyn EnrichmentGateway,
    addresses: &[IpAddr],
    pause: Duration,
) -> EnrichmentOutcome {
    let mut records = Vec::with_capacity(addresses.len());
    let mut failed_lookups = 0;

    for (i, &address) in addresses.iter().enumerate() {
        match gateway.lookup(address).await {
            Ok(record) => {
                debug!(%address, "retrieved registration metadata");
                records.push(record);
            }
            Err(e) => {
                warn!(%address, error = %e, "lookup failed, recording address only");
                records.push(EnrichmentRecord::degraded(address));
                failed_lookups += 1;
            }
        }

        if i + 1 < addresses.len() {
            tokio::time::sleep(pause).await;
        }
    }

    EnrichmentOutcome {
        records,
        failed_lookups,
    }
}
