//! HTTP client for the ipinfo.io lookup service

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{EnrichmentGateway, EnrichmentRecord, LookupError};
use crate::config::EnrichmentConfig;

/// Metadata lookup client backed by the ipinfo.io JSON API.
pub struct IpinfoClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

/// The subset of the service response this crate uses. Absent fields
/// deserialize to empty strings.
#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    #[serde(default)]
    org: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    hostname: String,
}

impl IpinfoClient {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("blockledger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl EnrichmentGateway for IpinfoClient {
    async fn lookup(&self, address: IpAddr) -> Result<EnrichmentRecord, LookupError> {
        let url = format!("{}/{}/json", self.endpoint, address);
        debug!(%address, "querying lookup service");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::BadResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body: IpinfoResponse = response
            .json()
            .await
            .map_err(|e| LookupError::BadResponse(e.to_string()))?;

        Ok(EnrichmentRecord {
            address: address.to_string(),
            organization: body.org,
            country: body.country,
            hostname: body.hostname,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults_to_empty_fields() {
        let body: IpinfoResponse = serde_json::from_str(r#"{"ip": "8.8.8.8"}"#).unwrap();
        assert_eq!(body.org, "");
        assert_eq!(body.country, "");
        assert_eq!(body.hostname, "");
    }

    #[test]
    fn test_response_parses_known_fields() {
        let body: IpinfoResponse = serde_json::from_str(
            r#"{"ip": "8.8.8.8", "org": "AS15169 Google LLC", "country": "US", "hostname": "dns.google"}"#,
        )
        .unwrap();
        assert_eq!(body.org, "AS15169 Google LLC");
        assert_eq!(body.country, "US");
        assert_eq!(body.hostname, "dns.google");
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = EnrichmentConfig {
            endpoint: "https://ipinfo.io/".to_string(),
            ..EnrichmentConfig::default()
        };
        let client = IpinfoClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "https://ipinfo.io");
    }
}
