//! Lead relay client
//!
//! One POST per submission. Any 2xx response is success; every other status
//! and every transport failure is reported uniformly as a relay error. No
//! timeout is imposed beyond the transport's own defaults.

use std::future::Future;

use atile_core::prelude::*;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

use crate::payload::RelayPayload;

/// Production form-relay endpoint
pub const FORM_RELAY_ENDPOINT: &str = "https://formspree.io/f/mzzjzbpk";

/// Delivery of lead payloads to the external relay
///
/// The form controller depends on this trait, never on the HTTP client.
/// Submissions run on spawned tasks, so implementations and their futures
/// must be `Send`.
pub trait LeadRelay: Send + Sync {
    /// Deliver one payload; resolves once the relay has answered
    fn submit(&self, payload: &RelayPayload) -> impl Future<Output = Result<()>> + Send;
}

/// Relay reached over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpLeadRelay {
    client: Client,
    endpoint: Url,
}

impl HttpLeadRelay {
    /// Create a relay client for an endpoint URL.
    ///
    /// Only `http` and `https` endpoints are accepted.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(Client::new(), endpoint)
    }

    /// Create a relay client reusing an existing reqwest client
    pub fn with_client(client: Client, endpoint: &str) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Parse and check a relay endpoint
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|_| Error::relay_endpoint(endpoint))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(Error::relay_endpoint(endpoint)),
    }
}

impl LeadRelay for HttpLeadRelay {
    async fn submit(&self, payload: &RelayPayload) -> Result<()> {
        debug!("Posting lead to relay {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::relay_transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Lead relay answered {}", status);
            return Err(Error::relay_status(status.as_u16()));
        }

        info!("Lead delivered to relay ({})", status);
        Ok(())
    }
}
