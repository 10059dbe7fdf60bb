mod common;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{CAT_REPLY, FakeClient};
use content_improver::api::{ApiState, route_request};
use content_improver::core::config::AppConfig;
use content_improver::core::options::{API_KEY_OPTION, MemoryOptionStore, OptionStore};
use serde_json::{Value, json};

fn state_with(client: FakeClient, store: Arc<MemoryOptionStore>) -> ApiState<FakeClient> {
    ApiState::new(AppConfig::default(), client, store)
}

fn post(body: &str) -> Value {
    json!({
        "rawPath": "/",
        "requestContext": { "http": { "method": "POST" } },
        "headers": { "content-type": "application/x-www-form-urlencoded" },
        "body": body,
        "isBase64Encoded": false
    })
}

fn status_and_body(response: &Value) -> (u64, Value) {
    let status = response["statusCode"].as_u64().unwrap();
    let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_improve_action_returns_success_envelope() {
    let client = FakeClient::replying(CAT_REPLY);
    let state = state_with(client.clone(), Arc::new(MemoryOptionStore::new()));

    let response = route_request(
        &state,
        &post("action=chatgpt_improve_content&post_content=The+cat+sat.&api_key=sk-test"),
    )
    .await;

    let (status, body) = status_and_body(&response);
    assert_eq!(status, 200);
    assert_eq!(response["headers"]["Content-Type"], "application/json");
    assert_eq!(
        body,
        json!({ "success": true, "data": { "improved_text": "The cat sat quietly on the mat." } })
    );
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_missing_post_content_field_is_reported() {
    let client = FakeClient::replying(CAT_REPLY);
    let state = state_with(client.clone(), Arc::new(MemoryOptionStore::new()));

    let response = route_request(&state, &post("action=chatgpt_improve_content&api_key=sk-test")).await;

    let (status, body) = status_and_body(&response);
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": false, "data": { "message": "Post content is missing." } })
    );
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_form_encoded_content_reaches_provider_decoded() {
    let client = FakeClient::replying(CAT_REPLY);
    let state = state_with(client.clone(), Arc::new(MemoryOptionStore::new()));

    route_request(
        &state,
        &post("action=chatgpt_improve_content&post_content=%3Cp%3E1%2B1%3D2%3C%2Fp%3E&api_key=sk-test"),
    )
    .await;

    let (_, body) = client.last_request().unwrap();
    assert_eq!(body["messages"][1]["content"], "Improve this content: <p>1+1=2</p>");
}

#[tokio::test]
async fn test_base64_encoded_body_is_decoded() {
    let client = FakeClient::replying(CAT_REPLY);
    let state = state_with(client.clone(), Arc::new(MemoryOptionStore::new()));

    let encoded = STANDARD.encode("action=chatgpt_improve_content&post_content=Hi&api_key=sk-test");
    let mut payload = post(&encoded);
    payload["isBase64Encoded"] = json!(true);

    let (status, body) = status_and_body(&route_request(&state, &payload).await);
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_non_post_is_rejected() {
    let client = FakeClient::replying(CAT_REPLY);
    let state = state_with(client.clone(), Arc::new(MemoryOptionStore::new()));

    let mut payload = post("action=chatgpt_improve_content&post_content=Hi&api_key=sk-test");
    payload["requestContext"]["http"]["method"] = json!("GET");

    let (status, _) = status_and_body(&route_request(&state, &payload).await);
    assert_eq!(status, 405);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_unknown_action_is_bad_request() {
    let state = state_with(FakeClient::replying(CAT_REPLY), Arc::new(MemoryOptionStore::new()));

    for body in ["action=something_else", "post_content=Hi", ""] {
        let (status, parsed) = status_and_body(&route_request(&state, &post(body)).await);
        assert_eq!(status, 400, "body: {body}");
        assert_eq!(parsed["error"], "Unknown action");
    }
}

#[tokio::test]
async fn test_invalid_utf8_body_is_parse_error() {
    let state = state_with(FakeClient::replying(CAT_REPLY), Arc::new(MemoryOptionStore::new()));

    let (status, parsed) =
        status_and_body(&route_request(&state, &post("action=%FF%FE")).await);
    assert_eq!(status, 400);
    assert!(parsed["error"].as_str().unwrap().starts_with("Parse Error"));
}

const ADMIN_TOKEN: &str = "admin-secret";

fn admin_state(store: Arc<MemoryOptionStore>) -> ApiState<FakeClient> {
    let config = AppConfig {
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..AppConfig::default()
    };
    ApiState::new(config, FakeClient::replying(CAT_REPLY), store)
}

fn post_with_token(body: &str, header: &str, token: &str) -> Value {
    let mut payload = post(body);
    payload["headers"][header] = json!(token);
    payload
}

#[tokio::test]
async fn test_update_settings_with_admin_token_saves_trimmed_key() {
    let store = Arc::new(MemoryOptionStore::new());
    let state = admin_state(store.clone());

    for header in ["X-Admin-Token", "x-admin-token"] {
        store.update_option(API_KEY_OPTION, "").await.unwrap();
        let (status, body) = status_and_body(
            &route_request(
                &state,
                &post_with_token(
                    "action=chatgpt_update_settings&api_key=+sk-live%0A",
                    header,
                    ADMIN_TOKEN,
                ),
            )
            .await,
        );
        assert_eq!(status, 200, "header: {header}");
        assert_eq!(body, json!({ "success": true, "data": { "message": "Settings saved." } }));
        assert_eq!(
            store.get_option(API_KEY_OPTION).await.unwrap().as_deref(),
            Some("sk-live")
        );
    }
}

#[tokio::test]
async fn test_update_settings_without_valid_token_is_forbidden() {
    let store = Arc::new(MemoryOptionStore::new());
    store.update_option(API_KEY_OPTION, "sk-original").await.unwrap();
    let state = admin_state(store.clone());

    let body = "action=chatgpt_update_settings&api_key=sk-attacker";
    for payload in [
        post(body),
        post_with_token(body, "X-Admin-Token", "wrong"),
        post_with_token(body, "X-Admin-Token", "admin-secre"),
        json!({ "body": body }),
    ] {
        let (status, parsed) = status_and_body(&route_request(&state, &payload).await);
        assert_eq!(status, 403);
        assert_eq!(parsed["error"], "Forbidden");
    }

    assert_eq!(
        store.get_option(API_KEY_OPTION).await.unwrap().as_deref(),
        Some("sk-original")
    );
}

#[tokio::test]
async fn test_update_settings_disabled_without_configured_token() {
    let store = Arc::new(MemoryOptionStore::new());
    let state = state_with(FakeClient::replying(CAT_REPLY), store.clone());

    let payload =
        post_with_token("action=chatgpt_update_settings&api_key=sk-live", "X-Admin-Token", "");
    let (status, _) = status_and_body(&route_request(&state, &payload).await);

    assert_eq!(status, 403);
    assert_eq!(store.get_option(API_KEY_OPTION).await.unwrap(), None);
}

#[tokio::test]
async fn test_stored_key_is_never_returned() {
    let store = Arc::new(MemoryOptionStore::new());
    store.update_option(API_KEY_OPTION, "sk-live").await.unwrap();
    let state = admin_state(store);

    for payload in [
        post("action=chatgpt_get_settings"),
        post_with_token("action=chatgpt_get_settings", "X-Admin-Token", ADMIN_TOKEN),
        json!({ "body": "action=chatgpt_get_settings" }),
    ] {
        let response = route_request(&state, &payload).await;
        let (status, parsed) = status_and_body(&response);
        assert_eq!(status, 400);
        assert_eq!(parsed["error"], "Unknown action");
        assert!(!response["body"].as_str().unwrap().contains("sk-live"));
    }
}
