//! 工作流节点模块：提供 AkashML 聊天补全节点的声明式描述与逐项执行循环。
//!
//! # Workflow Node Module
//!
//! Everything a workflow host needs to drive the AkashML node: the static
//! form schema, the dynamic model listing, and the sequential per-item
//! execution loop with continue-on-fail isolation.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`AkashMlNode`] | The node itself: schema, model listing, execution |
//! | [`WorkflowNode`] | Fixed capability surface a host drives a node through |
//! | [`ExecutionContext`] | Credentials plus the continue-on-fail flag for one run |
//! | [`InputItem`] / [`OutputItem`] | Records entering and leaving the node |
//! | [`NodeDescriptor`] | Static form schema consumed by the host UI |
//! | [`ChatCompletionParams`] | Plain per-record parameters consumed by the loop |
//!
//! ## Example
//!
//! ```rust
//! use akashml_node::node::{AkashMlNode, WorkflowNode};
//!
//! let node = AkashMlNode;
//! let schema = node.descriptor();
//! assert_eq!(schema.name, "akashMl");
//! assert_eq!(schema.properties.len(), 6);
//! ```

pub mod descriptor;
pub mod execute;
pub mod load_options;
pub mod parameters;

use async_trait::async_trait;
use serde_json::Value;

use crate::credentials::AkashMlCredentials;
use crate::Result;

pub use descriptor::{descriptor, NodeDescriptor};
pub use execute::{AkashMlNode, OPERATION_CHAT_COMPLETIONS};
pub use load_options::{get_models, ModelOption};
pub use parameters::{ChatCompletionParams, ChatCompletionRequest, ChatMessage, MessageCollection};

/// One record entering the node: the payload flowing through the workflow
/// plus the node parameters resolved for that record.
///
/// The chat operation reads only the parameters; the payload rides along so
/// outputs can be correlated back through [`OutputItem::paired_item`].
#[derive(Debug, Clone, Default)]
pub struct InputItem {
    pub json: Value,
    pub parameters: Value,
}

impl InputItem {
    pub fn new(json: Value, parameters: Value) -> Self {
        Self { json, parameters }
    }

    pub fn from_parameters(parameters: Value) -> Self {
        Self {
            json: Value::Null,
            parameters,
        }
    }
}

/// One record leaving the node, tagged with the index of the input item
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputItem {
    pub json: Value,
    pub paired_item: usize,
}

impl OutputItem {
    pub fn new(json: Value, paired_item: usize) -> Self {
        Self { json, paired_item }
    }
}

/// Everything the host supplies for one node run.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub credentials: AkashMlCredentials,
    /// Converts per-record failures into `{ "error": ... }` outputs instead
    /// of aborting the batch.
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    pub fn new(credentials: AkashMlCredentials) -> Self {
        Self {
            credentials,
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

/// Fixed set of capabilities a host invokes on a node.
#[async_trait]
pub trait WorkflowNode: Send + Sync {
    /// Static identity and form schema.
    fn descriptor(&self) -> &'static NodeDescriptor;

    /// Populates the model dropdown. Called at configuration time, outside
    /// the execution path.
    async fn list_models(&self, context: &ExecutionContext) -> Result<Vec<ModelOption>>;

    /// Runs the node over a batch of items, strictly in input order.
    async fn execute(
        &self,
        items: Vec<InputItem>,
        context: &ExecutionContext,
    ) -> Result<Vec<OutputItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_defaults_to_fail_fast() {
        let context = ExecutionContext::new(AkashMlCredentials::default());
        assert!(!context.continue_on_fail);
        assert!(context.with_continue_on_fail(true).continue_on_fail);
    }

    #[test]
    fn input_item_from_parameters_carries_no_payload() {
        let item = InputItem::from_parameters(json!({ "model": "m" }));
        assert_eq!(item.json, Value::Null);
        assert_eq!(item.parameters["model"], json!("m"));
    }
}
