//! Dynamic option loading for the model dropdown.
//!
//! Invoked by the host at configuration time, outside the execution path.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::transport::HttpTransport;
use crate::Result;

/// Method name the form schema binds the model dropdown to.
pub const LOAD_OPTIONS_GET_MODELS: &str = "getModels";

pub const MODELS_ENDPOINT: &str = "/models";

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub name: String,
    pub value: String,
}

impl ModelOption {
    fn from_id(id: &str) -> Self {
        Self {
            name: id.to_string(),
            value: id.to_string(),
        }
    }
}

/// Fetches the provider's model listing and projects it into dropdown
/// options.
pub async fn get_models(transport: &HttpTransport) -> Result<Vec<ModelOption>> {
    let response = transport
        .request(Method::GET, MODELS_ENDPOINT, None, None)
        .await?;
    let options = models_from_response(&response);
    debug!(models = options.len(), "loaded AkashML model options");
    Ok(options)
}

/// Projects a `{ data: [{ id }, ...] }` listing into options.
///
/// Only entries whose `id` is a non-empty string are kept; anything
/// malformed is dropped silently and a missing `data` field yields an empty
/// list, never an error. Source order is preserved.
pub fn models_from_response(response: &Value) -> Vec<ModelOption> {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("id").and_then(Value::as_str))
                .filter(|id| !id.is_empty())
                .map(ModelOption::from_id)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_nonempty_string_ids_in_order() {
        let options = models_from_response(&json!({
            "data": [
                { "id": "m1" },
                { "id": "" },
                { "id": 42 },
                { "id": "m2" },
            ]
        }));
        assert_eq!(
            options,
            vec![
                ModelOption {
                    name: "m1".to_string(),
                    value: "m1".to_string()
                },
                ModelOption {
                    name: "m2".to_string(),
                    value: "m2".to_string()
                },
            ]
        );
    }

    #[test]
    fn missing_data_yields_an_empty_list() {
        assert!(models_from_response(&json!({})).is_empty());
        assert!(models_from_response(&json!({ "object": "list" })).is_empty());
    }

    #[test]
    fn non_array_data_yields_an_empty_list() {
        assert!(models_from_response(&json!({ "data": "m1" })).is_empty());
        assert!(models_from_response(&json!({ "data": null })).is_empty());
    }

    #[test]
    fn entries_without_an_id_are_dropped() {
        let options = models_from_response(&json!({
            "data": [
                { "object": "model" },
                { "id": null },
                { "id": "kept" },
            ]
        }));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "kept");
    }
}
