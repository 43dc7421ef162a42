//! # akashml-node
//!
//! AkashML 工作流节点：为可视化工作流宿主提供 OpenAI 兼容的聊天补全能力。
//!
//! Workflow-automation node for the AkashML OpenAI-compatible chat
//! completions API: credential definition, declarative form schema, dynamic
//! model listing, and a sequential per-item execution loop.
//!
//! ## Overview
//!
//! A workflow host wires this crate in through three seams: the credential
//! definition (API key + base URL with bearer injection and a `/models`
//! self-test), the static [`NodeDescriptor`] it renders as a form, and the
//! [`WorkflowNode`] trait it drives at configuration time (model listing)
//! and at run time (the execution loop).
//!
//! ## Key Features
//!
//! - **Explicit node interface**: [`WorkflowNode`] exposes a fixed set of
//!   named capabilities instead of dynamic method lookup
//! - **Schema/runtime split**: the form schema in [`node::descriptor`] and
//!   the plain parameter structs in [`node::parameters`] are separate
//!   artifacts sharing their defaults
//! - **Failure isolation**: continue-on-fail converts a record's failure
//!   into that record's `{ "error": ... }` output instead of aborting the
//!   batch
//! - **Paired outputs**: every output carries the index of the input item
//!   that produced it
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use akashml_node::{AkashMlCredentials, AkashMlNode, ExecutionContext, InputItem, WorkflowNode};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> akashml_node::Result<()> {
//!     let credentials = AkashMlCredentials::new("your-api-key", "https://api.akashml.com/v1");
//!     let context = ExecutionContext::new(credentials).with_continue_on_fail(true);
//!
//!     let items = vec![InputItem::from_parameters(json!({
//!         "operation": "chatCompletions",
//!         "model": "Meta-Llama-3-1-8B-Instruct-FP8",
//!         "messages": { "values": [ { "role": "user", "content": "Hello!" } ] },
//!     }))];
//!
//!     let output = AkashMlNode.execute(items, &context).await?;
//!     println!("{}", output[0].json["text"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`node`] | Form schema, parameters, model listing, execution loop |
//! | [`credentials`] | Credential schema, bearer auth, `/models` self-test |
//! | [`transport`] | One-shot JSON requests against the configured base URL |
//! | [`error`] | Unified error type |

pub mod credentials;
pub mod node;
pub mod transport;

// Re-export main types for convenience
pub use credentials::{
    credential_properties, AkashMlCredentials, CredentialProperty, DEFAULT_BASE_URL,
};
pub use node::{
    descriptor, get_models, AkashMlNode, ChatCompletionParams, ChatCompletionRequest, ChatMessage,
    ExecutionContext, InputItem, MessageCollection, ModelOption, NodeDescriptor, OutputItem,
    WorkflowNode, OPERATION_CHAT_COMPLETIONS,
};
pub use transport::{HttpTransport, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
