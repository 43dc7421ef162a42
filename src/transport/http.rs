use std::collections::HashMap;

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::credentials::AkashMlCredentials;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Adapter over a shared HTTP client bound to one credential set.
///
/// Each call sends exactly one request: no retries, no backoff, no timeout
/// override beyond the client defaults. Failures propagate unchanged.
pub struct HttpTransport {
    client: Client,
    credentials: AkashMlCredentials,
}

impl HttpTransport {
    pub fn new(credentials: AkashMlCredentials) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Wrap an injected client, keeping its pool and timeout settings.
    pub fn with_client(client: Client, credentials: AkashMlCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &AkashMlCredentials {
        &self.credentials
    }

    /// Joins the normalized base URL and an endpoint path with exactly one
    /// `/` between them.
    pub fn join_url(&self, endpoint: &str) -> String {
        let base = self.credentials.normalized_base_url();
        if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        }
    }

    /// Sends one JSON request and decodes the JSON response body.
    ///
    /// Standard JSON headers are always attached; authentication comes from
    /// the bound credential set.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&HashMap<String, String>>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = self.join_url(endpoint);
        debug!(method = %method, url = %url, "sending AkashML request");

        let mut request = self
            .client
            .request(method, &url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        request = self.credentials.authenticate(request);

        if let Some(params) = query {
            request = request.query(params);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                http_status = status.as_u16(),
                url = %url,
                "AkashML request returned an error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(AkashMlCredentials::new("test-key", base_url))
    }

    #[test]
    fn trailing_slash_base_joins_without_doubling() {
        let transport = transport("https://api.example.com/v1/");
        assert_eq!(
            transport.join_url("models"),
            "https://api.example.com/v1/models"
        );
    }

    #[test]
    fn bare_endpoint_gains_a_leading_slash() {
        let transport = transport("https://api.example.com/v1");
        assert_eq!(
            transport.join_url("chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn leading_slash_endpoint_is_not_doubled() {
        let transport = transport("https://api.example.com/v1");
        assert_eq!(
            transport.join_url("/models"),
            "https://api.example.com/v1/models"
        );
    }

    #[test]
    fn empty_base_url_uses_the_default_endpoint() {
        let transport = transport("");
        assert_eq!(
            transport.join_url("/models"),
            format!("{}/models", crate::credentials::DEFAULT_BASE_URL)
        );
    }
}
