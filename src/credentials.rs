use std::fmt;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::transport::TransportError;
use crate::Result;

/// Fallback webroot used when a credential set carries no base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.akashml.com/v1";

/// Host-facing identifier of this credential type.
pub const CREDENTIAL_NAME: &str = "akashMlApi";

pub const CREDENTIAL_DISPLAY_NAME: &str = "AkashML API";

pub const CREDENTIAL_DOCUMENTATION_URL: &str = "https://docs.akashml.com";

/// Credential set for the AkashML API.
///
/// Supplied by the host per workflow run and immutable for the duration of a
/// call. The key is injected as a bearer token; the base URL is prefixed to
/// every endpoint path after trailing slashes are stripped.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AkashMlCredentials {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl AkashMlCredentials {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Base URL with every trailing `/` stripped; an empty value falls back
    /// to [`DEFAULT_BASE_URL`].
    pub fn normalized_base_url(&self) -> &str {
        let base = if self.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.as_str()
        };
        base.trim_end_matches('/')
    }

    /// Attaches `Authorization: Bearer <apiKey>` to an outgoing request.
    pub fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    /// Credential self-test: `GET <baseUrl>/models` must succeed.
    ///
    /// Runs outside the node request path, so failures surface as plain
    /// transport errors rather than operation failures.
    pub async fn verify(&self, client: &Client) -> Result<()> {
        let base = self.normalized_base_url();
        url::Url::parse(base)?;

        let request = client
            .get(format!("{}/models", base))
            .header("Accept", "application/json");
        let response = self
            .authenticate(request)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for AkashMlCredentials {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// The key is a secret; keep it out of Debug output and logs.
impl fmt::Debug for AkashMlCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AkashMlCredentials")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// One field of the credential form rendered by the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialProperty {
    pub name: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    pub password: bool,
    pub default: &'static str,
    pub description: &'static str,
}

static CREDENTIAL_PROPERTIES: [CredentialProperty; 2] = [
    CredentialProperty {
        name: "apiKey",
        display_name: "API Key",
        kind: "string",
        required: true,
        password: true,
        default: "",
        description: "Your AkashML API key",
    },
    CredentialProperty {
        name: "baseUrl",
        display_name: "Base URL",
        kind: "string",
        required: true,
        password: false,
        default: DEFAULT_BASE_URL,
        description: "AkashML webroot including /v1 (OpenAI-compatible)",
    },
];

/// Schema of the credential form, in display order.
pub fn credential_properties() -> &'static [CredentialProperty] {
    &CREDENTIAL_PROPERTIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_hosted_endpoint() {
        let credentials = AkashMlCredentials::default();
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
        assert!(credentials.api_key.is_empty());
    }

    #[test]
    fn normalization_strips_every_trailing_slash() {
        let credentials = AkashMlCredentials::new("key", "https://api.example.com/v1///");
        assert_eq!(credentials.normalized_base_url(), "https://api.example.com/v1");

        let single = AkashMlCredentials::new("key", "https://api.example.com/v1/");
        assert_eq!(single.normalized_base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let credentials = AkashMlCredentials::new("key", "");
        assert_eq!(credentials.normalized_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn debug_masks_the_api_key() {
        let credentials = AkashMlCredentials::new("sk-secret", DEFAULT_BASE_URL);
        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn deserializes_host_field_names() {
        let credentials: AkashMlCredentials = serde_json::from_value(serde_json::json!({
            "apiKey": "sk-test",
            "baseUrl": "https://api.example.com/v1",
        }))
        .unwrap();
        assert_eq!(credentials.api_key, "sk-test");
        assert_eq!(credentials.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn missing_base_url_deserializes_to_default() {
        let credentials: AkashMlCredentials =
            serde_json::from_value(serde_json::json!({ "apiKey": "sk-test" })).unwrap();
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn form_schema_matches_the_credential_fields() {
        let properties = credential_properties();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].name, "apiKey");
        assert!(properties[0].password);
        assert!(properties[0].required);
        assert_eq!(properties[1].name, "baseUrl");
        assert_eq!(properties[1].default, DEFAULT_BASE_URL);
    }
}
