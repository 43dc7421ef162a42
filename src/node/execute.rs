//! The per-item execution loop for the chat-completions operation.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::descriptor::{descriptor, NodeDescriptor};
use super::load_options::{self, ModelOption};
use super::parameters::ChatCompletionParams;
use super::{ExecutionContext, InputItem, OutputItem, WorkflowNode};
use crate::transport::HttpTransport;
use crate::{Error, Result};

pub const OPERATION_CHAT_COMPLETIONS: &str = "chatCompletions";

pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

/// The AkashML chat-completions node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AkashMlNode;

#[async_trait]
impl WorkflowNode for AkashMlNode {
    fn descriptor(&self) -> &'static NodeDescriptor {
        descriptor()
    }

    async fn list_models(&self, context: &ExecutionContext) -> Result<Vec<ModelOption>> {
        let transport = HttpTransport::new(context.credentials.clone());
        load_options::get_models(&transport).await
    }

    /// Processes items strictly in input order, one at a time.
    ///
    /// A record failure either becomes that record's `{ "error": ... }`
    /// output (continue-on-fail) or aborts the batch with the failure
    /// wrapped as a request error. Outputs keep the index of the item that
    /// produced them.
    async fn execute(
        &self,
        items: Vec<InputItem>,
        context: &ExecutionContext,
    ) -> Result<Vec<OutputItem>> {
        let transport = HttpTransport::new(context.credentials.clone());
        let mut output = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            debug!(item = index, "processing workflow item");
            match run_operation(&transport, &item.parameters).await {
                Ok(json) => output.push(OutputItem::new(json, index)),
                Err(err) => {
                    if !context.continue_on_fail {
                        return Err(Error::request(err));
                    }
                    warn!(item = index, error = %err, "item failed, continuing with the rest");
                    output.push(OutputItem::new(json!({ "error": err.to_string() }), index));
                }
            }
        }

        Ok(output)
    }
}

/// Dispatches one record on its `operation` parameter.
async fn run_operation(transport: &HttpTransport, parameters: &Value) -> Result<Value> {
    let operation = parameters
        .get("operation")
        .and_then(Value::as_str)
        .unwrap_or(OPERATION_CHAT_COMPLETIONS);

    if operation == OPERATION_CHAT_COMPLETIONS {
        let params = ChatCompletionParams::from_item_json(parameters)?;
        return run_chat_completions(transport, &params).await;
    }

    Err(Error::unknown_operation(operation))
}

/// Runs one chat completion: validate, post the payload, extract the
/// convenience text, and merge it into the response.
pub async fn run_chat_completions(
    transport: &HttpTransport,
    params: &ChatCompletionParams,
) -> Result<Value> {
    params.validate()?;
    let body = serde_json::to_value(params.to_request())?;
    let response = transport
        .request(Method::POST, CHAT_COMPLETIONS_ENDPOINT, None, Some(&body))
        .await?;
    let text = completion_text(&response);
    Ok(with_text(response, text))
}

/// `choices[0].message.content`, or an empty string when any part of that
/// path is absent. Never fails.
pub fn completion_text(response: &Value) -> String {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Full response object plus the extracted `text` field.
fn with_text(response: Value, text: String) -> Value {
    let mut object = match response {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    object.insert("text".to_string(), Value::String(text));
    Value::Object(object)
}
