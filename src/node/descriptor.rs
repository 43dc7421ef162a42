//! Static configuration schema of the node.
//!
//! This is the surface a host renders as a form. Runtime code never reads
//! defaults from here; the plain structs in
//! [`parameters`](super::parameters) carry their own.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use super::execute::OPERATION_CHAT_COMPLETIONS;
use super::load_options::LOAD_OPTIONS_GET_MODELS;
use super::parameters::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, ROLE_ASSISTANT, ROLE_SYSTEM, ROLE_USER,
};
use crate::credentials::CREDENTIAL_NAME;

/// Node identity and form schema, serialized for the host under its
/// camelCase field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub subtitle: String,
    pub description: String,
    pub defaults: NodeDefaults,
    pub usable_as_tool: bool,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub credentials: Vec<CredentialRef>,
    pub properties: Vec<NodeProperty>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDefaults {
    pub name: String,
}

/// Reference to a credential type the node requires.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRef {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    Options,
    String,
    Number,
    FixedCollection,
}

/// One form field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub default: Value,
    pub required: bool,
    pub no_data_expression: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PropertyOptions>,
}

impl NodeProperty {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        kind: PropertyKind,
        default: Value,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            name: name.into(),
            kind,
            default,
            required: false,
            no_data_expression: false,
            description: None,
            type_options: None,
            display_options: None,
            options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn with_type_options(mut self, options: TypeOptions) -> Self {
        self.type_options = Some(options);
        self
    }

    /// Shows the field only while the named operation is selected.
    pub fn show_for(mut self, operation: &str) -> Self {
        self.display_options = Some(DisplayOptions::show_operation(operation));
        self
    }

    pub fn with_choices(mut self, choices: Vec<PropertyOption>) -> Self {
        self.options = Some(PropertyOptions::Choices(choices));
        self
    }

    pub fn with_collections(mut self, collections: Vec<PropertyCollection>) -> Self {
        self.options = Some(PropertyOptions::Collections(collections));
        self
    }
}

/// Rendering hints attached to a field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_options_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

/// Conditional visibility keyed on other parameter values.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayOptions {
    pub show: HashMap<String, Vec<String>>,
}

impl DisplayOptions {
    pub fn show_operation(operation: &str) -> Self {
        let mut show = HashMap::new();
        show.insert("operation".to_string(), vec![operation.to_string()]);
        Self { show }
    }
}

/// Either dropdown choices or nested collection entries, depending on the
/// field kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyOptions {
    Choices(Vec<PropertyOption>),
    Collections(Vec<PropertyCollection>),
}

/// One dropdown choice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl PropertyOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// A named group of sub-fields inside a multi-value collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCollection {
    pub name: String,
    pub display_name: String,
    pub values: Vec<NodeProperty>,
}

static DESCRIPTOR: once_cell::sync::Lazy<NodeDescriptor> =
    once_cell::sync::Lazy::new(build_descriptor);

/// The node's descriptor, built once.
pub fn descriptor() -> &'static NodeDescriptor {
    &DESCRIPTOR
}

fn build_descriptor() -> NodeDescriptor {
    NodeDescriptor {
        display_name: "AkashML".to_string(),
        name: "akashMl".to_string(),
        icon: "file:akashml.svg".to_string(),
        group: vec!["transform".to_string()],
        version: 1,
        subtitle: "={{$parameter[\"operation\"]}}".to_string(),
        description: "OpenAI-compatible API with AkashML base URL".to_string(),
        defaults: NodeDefaults {
            name: "AkashML".to_string(),
        },
        usable_as_tool: true,
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        credentials: vec![CredentialRef {
            name: CREDENTIAL_NAME.to_string(),
            required: true,
        }],
        properties: build_properties(),
    }
}

fn build_properties() -> Vec<NodeProperty> {
    vec![
        NodeProperty::new(
            "operation",
            "Operation",
            PropertyKind::Options,
            json!(OPERATION_CHAT_COMPLETIONS),
        )
        .no_data_expression()
        .with_choices(vec![PropertyOption::new(
            "Chat Completions",
            OPERATION_CHAT_COMPLETIONS,
        )
        .with_action("Create a chat completion")]),
        NodeProperty::new("model", "Model Name or ID", PropertyKind::Options, json!(""))
            .required()
            .show_for(OPERATION_CHAT_COMPLETIONS)
            .with_type_options(TypeOptions {
                load_options_method: Some(LOAD_OPTIONS_GET_MODELS.to_string()),
                ..TypeOptions::default()
            })
            .describe("The model to use. Choose from the list, or specify an ID."),
        NodeProperty::new(
            "messages",
            "Messages",
            PropertyKind::FixedCollection,
            json!({}),
        )
        .required()
        .show_for(OPERATION_CHAT_COMPLETIONS)
        .with_type_options(TypeOptions {
            multiple_values: Some(true),
            sortable: Some(true),
            ..TypeOptions::default()
        })
        .with_collections(vec![PropertyCollection {
            name: "values".to_string(),
            display_name: "Message".to_string(),
            values: vec![
                NodeProperty::new("role", "Role", PropertyKind::Options, json!(ROLE_USER))
                    .with_choices(vec![
                        PropertyOption::new("User", ROLE_USER),
                        PropertyOption::new("System", ROLE_SYSTEM),
                        PropertyOption::new("Assistant", ROLE_ASSISTANT),
                    ]),
                NodeProperty::new("content", "Content", PropertyKind::String, json!(""))
                    .required()
                    .with_type_options(TypeOptions {
                        rows: Some(4),
                        ..TypeOptions::default()
                    }),
            ],
        }])
        .describe("Messages to send to the model"),
        NodeProperty::new(
            "temperature",
            "Temperature",
            PropertyKind::Number,
            json!(DEFAULT_TEMPERATURE),
        )
        .show_for(OPERATION_CHAT_COMPLETIONS)
        .with_type_options(TypeOptions {
            min_value: Some(0.0),
            max_value: Some(2.0),
            number_precision: Some(2),
            ..TypeOptions::default()
        })
        .describe("Controls randomness: lower is more deterministic"),
        NodeProperty::new(
            "maxTokens",
            "Max Tokens",
            PropertyKind::Number,
            json!(DEFAULT_MAX_TOKENS),
        )
        .show_for(OPERATION_CHAT_COMPLETIONS)
        .with_type_options(TypeOptions {
            min_value: Some(1.0),
            ..TypeOptions::default()
        })
        .describe("The maximum number of tokens to generate"),
        NodeProperty::new("topP", "Top P", PropertyKind::Number, json!(DEFAULT_TOP_P))
            .show_for(OPERATION_CHAT_COMPLETIONS)
            .with_type_options(TypeOptions {
                min_value: Some(0.0),
                max_value: Some(1.0),
                number_precision: Some(3),
                ..TypeOptions::default()
            })
            .describe("Nucleus sampling probability"),
    ]
}
