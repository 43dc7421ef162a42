//! Model listing and credential verification against a mock AkashML server.

use akashml_node::{
    AkashMlCredentials, AkashMlNode, ExecutionContext, HttpTransport, ModelOption, WorkflowNode,
};
use serde_json::json;

fn credentials(server: &mockito::ServerGuard) -> AkashMlCredentials {
    AkashMlCredentials::new("test-key", server.url())
}

fn context(server: &mockito::ServerGuard) -> ExecutionContext {
    ExecutionContext::new(credentials(server))
}

#[tokio::test]
async fn lists_models_with_usable_string_ids_only() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/models")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[{"id":"Meta-Llama-3-1-8B-Instruct-FP8"},{"id":""},{"id":42},{"id":"DeepSeek-R1"},{"object":"model"}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let models = AkashMlNode.list_models(&context(&server)).await.unwrap();

    mock.assert_async().await;
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Meta-Llama-3-1-8B-Instruct-FP8", "DeepSeek-R1"]);
    assert!(models.iter().all(|m| m.name == m.value));
}

#[tokio::test]
async fn model_listing_tolerates_an_empty_catalog() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let models = AkashMlNode.list_models(&context(&server)).await.unwrap();
    assert_eq!(models, Vec::<ModelOption>::new());
}

#[tokio::test]
async fn model_listing_surfaces_provider_failures() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .with_status(500)
        .with_body("catalog unavailable")
        .create_async()
        .await;

    let err = AkashMlNode
        .list_models(&context(&server))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("catalog unavailable"), "{message}");
}

#[tokio::test]
async fn get_models_goes_through_the_shared_transport() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/models")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"id":"m1"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::new(credentials(&server));
    let models = akashml_node::get_models(&transport).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        models,
        vec![ModelOption {
            name: "m1".to_string(),
            value: "m1".to_string()
        }]
    );
}

#[tokio::test]
async fn credential_verification_probes_the_model_catalog() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/models")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = reqwest::Client::new();
    credentials(&server).verify(&client).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn credential_verification_rejects_a_bad_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .with_status(401)
        .with_body(r#"{"error":"invalid api key"}"#)
        .create_async()
        .await;

    let client = reqwest::Client::new();
    let err = credentials(&server).verify(&client).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("401"), "{message}");
    assert!(message.contains("invalid api key"), "{message}");
}

#[tokio::test]
async fn credential_verification_rejects_a_malformed_base_url() {
    let credentials = AkashMlCredentials::new("test-key", "not a url");
    let client = reqwest::Client::new();
    let err = credentials.verify(&client).await.unwrap_err();
    assert!(err.to_string().starts_with("Invalid base URL"), "{err}");
}

#[tokio::test]
async fn schema_and_listing_agree_on_the_load_options_hook() {
    let descriptor = AkashMlNode.descriptor();
    let schema = serde_json::to_value(descriptor).unwrap();
    assert_eq!(
        schema["properties"][1]["typeOptions"]["loadOptionsMethod"],
        json!("getModels")
    );
}
