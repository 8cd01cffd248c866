//! `OpenAI` adapter against a mock chat completions API

mod harness;

use axum::http::StatusCode;
use harness::mock_backend::{MockBackend, Reply};
use quill_llm::{LlmError, Message, OpenAiProvider, Provider, ProviderConfig, StatusMapping};
use secrecy::SecretString;
use serde_json::json;

fn config(mock: &MockBackend) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(SecretString::from("sk-test".to_owned())),
        base_url: Some(mock.base_url()),
        ..ProviderConfig::default()
    }
}

fn completion(message: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{"index": 0, "message": message, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

#[tokio::test]
async fn two_tool_calls_in_order() {
    let mock = MockBackend::start(Reply::ok(completion(json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [
            {"id": "call_a", "type": "function", "function": {
                "name": "edit_file",
                "arguments": "{\"file_path\":\"src/lib.rs\",\"old_string\":\"todo!()\",\"new_string\":\"42\",\"replace_all\":true}"
            }},
            {"id": "call_b", "type": "function", "function": {
                "name": "execute_command",
                "arguments": "{\"command\":\"cargo test\",\"working_directory\":\"/repo\"}"
            }}
        ]
    }))))
    .await
    .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let response = provider.send_message(&[Message::user("fix it and test")]).await.unwrap();

    assert_eq!(response.content, "");
    assert_eq!(response.tool_calls.len(), 2);
    assert_eq!(response.tool_calls[0].name, "edit_file");
    assert_eq!(response.tool_calls[0].parameters["replace_all"], true);
    assert_eq!(response.tool_calls[1].name, "execute_command");
    assert_eq!(response.tool_calls[1].parameters["command"], "cargo test");
    assert_eq!(response.usage.unwrap().output_tokens, 5);
}

#[tokio::test]
async fn request_carries_auth_and_body() {
    let mock = MockBackend::start(Reply::ok(completion(json!({"role": "assistant", "content": "ok"}))))
        .await
        .unwrap();

    let provider = OpenAiProvider::new(ProviderConfig {
        organization: Some("org-quill".to_owned()),
        model: Some("gpt-4.1-mini".to_owned()),
        temperature: Some(0.2),
        ..config(&mock)
    })
    .unwrap();

    let text = provider
        .complete(&[Message::system("Be brief."), Message::user("ls"), Message::tool("Cargo.toml")])
        .await
        .unwrap();
    assert_eq!(text, "ok");

    let request = mock.single_request();
    assert_eq!(request.path, "/v1/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    assert_eq!(request.header("openai-organization"), Some("org-quill"));

    let body = &request.body;
    assert_eq!(body["model"], "gpt-4.1-mini");
    assert_eq!(body["temperature"], 0.2);
    assert_eq!(body["top_p"], 1.0);
    assert_eq!(body["max_tokens"], 4096);
    assert_eq!(body["tool_choice"], "auto");
    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(body["tools"][0]["function"]["name"], "read_file");

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages[0], json!({"role": "system", "content": "Be brief."}));
    assert_eq!(messages[1], json!({"role": "user", "content": "ls"}));
    assert_eq!(messages[2]["role"], "tool");
    assert!(messages[2]["tool_call_id"].as_str().unwrap().starts_with("call_"));
}

#[tokio::test]
async fn rate_limit_surfaces_retry_after() {
    let mock = MockBackend::start(
        Reply::json(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}}),
        )
        .with_header("retry-after", "7"),
    )
    .await
    .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    match err {
        LlmError::RateLimited {
            retry_after, message, ..
        } => {
            assert_eq!(retry_after, Some(7));
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("expected rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_names_the_model() {
    let mock = MockBackend::start(Reply::json(
        StatusCode::NOT_FOUND,
        json!({"error": {"message": "The model `gpt-9` does not exist", "type": "invalid_request_error", "code": "model_not_found"}}),
    ))
    .await
    .unwrap();

    let provider = OpenAiProvider::new(ProviderConfig {
        model: Some("gpt-9".to_owned()),
        ..config(&mock)
    })
    .unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    assert!(matches!(&err, LlmError::NotFound { model, .. } if model == "gpt-9"), "{err:?}");
    assert!(err.to_string().contains("gpt-9"));
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    let mock = MockBackend::start(Reply::json(
        StatusCode::UNAUTHORIZED,
        json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
    ))
    .await
    .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    assert!(matches!(err, LlmError::Authentication { .. }), "{err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn status_mapping_is_configurable() {
    let mock = MockBackend::start(Reply::json(
        StatusCode::FORBIDDEN,
        json!({"error": {"message": "key disabled"}}),
    ))
    .await
    .unwrap();

    let provider = OpenAiProvider::new(ProviderConfig {
        status_mapping: Some(StatusMapping {
            authentication: vec![401, 403],
            ..StatusMapping::default()
        }),
        ..config(&mock)
    })
    .unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    assert!(matches!(err, LlmError::Authentication { .. }), "{err:?}");
}

#[tokio::test]
async fn zero_choices_is_protocol_error() {
    let mock = MockBackend::start(Reply::ok(json!({"id": "chatcmpl-empty", "choices": []})))
        .await
        .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    assert!(matches!(err, LlmError::Protocol { .. }), "{err:?}");
}

#[tokio::test]
async fn undecodable_arguments_are_protocol_error() {
    let mock = MockBackend::start(Reply::ok(completion(json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{"id": "call_x", "type": "function", "function": {
            "name": "write_file",
            "arguments": "{\"file_path\": \"a.txt\", \"content\": "
        }}]
    }))))
    .await
    .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("write it")]).await.unwrap_err();

    assert!(matches!(err, LlmError::Protocol { .. }), "{err:?}");
    assert!(err.to_string().contains("write_file"));
}

#[tokio::test]
async fn server_error_without_envelope_keeps_body() {
    let mock = MockBackend::start(Reply::raw(StatusCode::BAD_GATEWAY, "upstream connect error"))
        .await
        .unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    match err {
        LlmError::Upstream { status, message, .. } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream connect error");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_uses_status_reason() {
    let mock = MockBackend::start(Reply::raw(StatusCode::SERVICE_UNAVAILABLE, "")).await.unwrap();

    let provider = OpenAiProvider::new(config(&mock)).unwrap();
    let err = provider.send_message(&[Message::user("hi")]).await.unwrap_err();

    match err {
        LlmError::Upstream { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}
