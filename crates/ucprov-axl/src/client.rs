//! AXL HTTP client (reqwest-based).

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::auth::AxlCredentials;
use crate::config::AxlTarget;
use crate::envelope::soap_envelope;
use crate::error::{AxlError, AxlResult};
use crate::response::AxlResponse;

/// Authenticated client for one AXL endpoint.
///
/// Wraps `reqwest::Client` with SOAP envelope construction, Basic auth, and
/// AXL response parsing. The credentials are read-only after construction
/// and reused across all calls in a run.
#[derive(Debug, Clone)]
pub struct AxlClient {
    target: AxlTarget,
    credentials: AxlCredentials,
    http_client: Client,
}

impl AxlClient {
    /// Build a client for the given target.
    pub fn new(target: AxlTarget, credentials: AxlCredentials) -> AxlResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(target.request_timeout_secs))
            .danger_accept_invalid_certs(!target.tls_verify)
            .user_agent("ucprov-axl/1.0")
            .build()
            .map_err(|e| AxlError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            target,
            credentials,
            http_client,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(
        target: AxlTarget,
        credentials: AxlCredentials,
        http_client: Client,
    ) -> Self {
        Self {
            target,
            credentials,
            http_client,
        }
    }

    #[must_use]
    pub fn target(&self) -> &AxlTarget {
        &self.target
    }

    /// Send one AXL body fragment and parse the response document.
    ///
    /// Blocks until the transport responds or the fixed timeout elapses; a
    /// timeout surfaces as a transport failure like any other.
    pub async fn execute(&self, body: &str) -> AxlResult<AxlResponse> {
        debug!(endpoint = %self.target.endpoint, "AXL request");

        let response = self
            .http_client
            .post(&self.target.endpoint)
            .header("Authorization", self.credentials.authorization_header())
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(soap_envelope(body))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // AXL embeds fault detail in error-status bodies; prefer the
            // fault string over a bare status code when one parses out.
            if let Err(fault @ AxlError::Fault(_)) = AxlResponse::parse(&text) {
                return Err(fault);
            }
            return Err(AxlError::Http {
                status: status.as_u16(),
                detail: if text.is_empty() {
                    "<no body>".to_string()
                } else {
                    text
                },
            });
        }

        AxlResponse::parse(&text)
    }
}
