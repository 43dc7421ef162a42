//! Runtime parameters for the chat-completions operation, decoupled from the
//! form schema in [`descriptor`](super::descriptor).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TOP_P: f64 = 0.9;

pub const ROLE_USER: &str = "user";
pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One conversation turn.
///
/// The role is carried verbatim onto the wire. The form offers the three
/// standard roles, but the runtime accepts any string so provider-specific
/// roles keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }
}

/// The host stores the message list nested under `values`, mirroring the
/// multi-value collection field of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCollection {
    #[serde(default)]
    pub values: Vec<ChatMessage>,
}

impl MessageCollection {
    pub fn new(values: Vec<ChatMessage>) -> Self {
        Self { values }
    }
}

impl From<Vec<ChatMessage>> for MessageCollection {
    fn from(values: Vec<ChatMessage>) -> Self {
        Self { values }
    }
}

/// Resolved parameters of one chat-completions record.
///
/// Field names follow the host's storage naming (`maxTokens`, `topP`);
/// [`to_request`](Self::to_request) translates to the provider naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionParams {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: MessageCollection,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_top_p() -> f64 {
    DEFAULT_TOP_P
}

impl Default for ChatCompletionParams {
    fn default() -> Self {
        Self {
            model: String::new(),
            messages: MessageCollection::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl ChatCompletionParams {
    /// Decodes a record's parameter blob. Absent fields take the form
    /// defaults; unknown fields (such as `operation`) are ignored.
    pub fn from_item_json(parameters: &Value) -> Result<Self> {
        Ok(serde_json::from_value(parameters.clone())?)
    }

    /// Gate run before any payload is built or network touched.
    pub fn validate(&self) -> Result<()> {
        if self.messages.values.is_empty() {
            return Err(Error::validation("Please add at least one message."));
        }
        Ok(())
    }

    /// Builds the provider wire payload. The naming translation
    /// (`maxTokens` to `max_tokens`, `topP` to `top_p`) is exact and total.
    pub fn to_request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.messages.values.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }
}

/// Wire payload for `POST /chat/completions`; fields serialize under the
/// provider's snake_case names.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}
