//! Integration tests for the relay REST API
//!
//! Covers command submission end to end: body extraction, the
//! interpreter call, the response envelope and error mapping.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use scheme_relay::core::config::Config;
use scheme_relay::core::interpreter::{ExecutionMode, Interpreter};
use scheme_relay::core::scheme::EvalError;
use scheme_relay::core::store::KnowledgeStore;
use scheme_relay::core::types::*;
use serde_json::{json, Value};

use crate::common::{
    create_scheme_app, create_test_app, create_test_app_with_config, send, submit_command,
    SpyInterpreter,
};

const MISSING_COMMAND: &str = "Invalid request: required parameter command is missing";

/// Interpreter that dies mid-command
struct PanickingInterpreter;

impl Interpreter for PanickingInterpreter {
    fn evaluate(&self, _store: &KnowledgeStore, _command: &str) -> Result<String, EvalError> {
        panic!("interpreter crashed");
    }
}

fn error_body(body: &[u8]) -> ErrorResponse {
    serde_json::from_slice(body).expect("Error body should be an ErrorResponse")
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _services) = create_test_app(SpyInterpreter::replying(""));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _headers, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_submit_command_success() {
    let spy = SpyInterpreter::replying("3\n");
    let (app, _services) = create_test_app(spy.clone());

    let (status, headers, body) =
        submit_command(&app, "/scheme", json!({"command": "(+ 1 2)"}).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap(),
        "application/json"
    );
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({"response": "3\n"}));

    assert_eq!(spy.calls(), 1);
    assert_eq!(spy.commands(), vec!["(+ 1 2)".to_string()]);
}

#[tokio::test]
async fn test_missing_command_is_rejected() {
    let spy = SpyInterpreter::replying("unused");
    let (app, _services) = create_test_app(spy.clone());

    let bodies = [
        r#"{}"#,
        r#"{"cmd": "(+ 1 2)"}"#,
        r#"{"command": null}"#,
        r#"{"command": 42}"#,
        r#"["(+ 1 2)"]"#,
        r#"not json"#,
        "",
    ];

    for body in bodies {
        let (status, _headers, response) = submit_command(&app, "/scheme", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");

        let error = error_body(&response);
        assert_eq!(error.status_code, 400);
        assert_eq!(error.message, MISSING_COMMAND);
    }

    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_command_passed_through_verbatim() {
    let spy = SpyInterpreter::replying("");
    let (app, _services) = create_test_app(spy.clone());

    let command = "  (display \"tab\\there\")\n\n  ; trailing comment  ";
    let (status, _headers, _body) =
        submit_command(&app, "/scheme", json!({"command": command}).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(spy.commands(), vec![command.to_string()]);
}

#[tokio::test]
async fn test_response_returned_verbatim() {
    let reply = "line one\n\tline two  \n\u{3bb}\n";
    let (app, _services) = create_test_app(SpyInterpreter::replying(reply));

    let (status, _headers, body) =
        submit_command(&app, "/scheme", json!({"command": "x"}).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, reply);
}

#[tokio::test]
async fn test_empty_command_is_forwarded() {
    let spy = SpyInterpreter::replying("");
    let (app, _services) = create_test_app(spy.clone());

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": ""}"#).await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({"response": ""}));
    assert_eq!(spy.commands(), vec![String::new()]);
}

#[tokio::test]
async fn test_repeated_command_runs_every_time() {
    let spy = SpyInterpreter::replying("ok");
    let (app, _services) = create_test_app(spy.clone());

    for _ in 0..2 {
        let (status, _headers, _body) =
            submit_command(&app, "/scheme", r#"{"command": "(tick)"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_interpreter_error_is_server_error() {
    let spy = SpyInterpreter::failing(EvalError::UnboundVariable("undefined-proc".to_string()));
    let (app, _services) = create_test_app(spy.clone());

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(undefined-proc)"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = error_body(&body);
    assert_eq!(error.status_code, 500);
    assert!(error.message.contains("undefined-proc"));
    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_server_keeps_serving_after_interpreter_error() {
    let (app, _services) = create_scheme_app();

    let (status, _headers, _body) =
        submit_command(&app, "/scheme", r#"{"command": "(undefined-proc)"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(+ 1 2)"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "3\n");
}

#[tokio::test]
async fn test_interpreter_panic_is_server_error() {
    let (app, _services) = create_test_app(Arc::new(PanickingInterpreter));

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(boom)"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(&body).status_code, 500);
}

#[tokio::test]
async fn test_inline_mode_panic_is_server_error() {
    let mut config = Config::default();
    config.relay.execution = ExecutionMode::Inline;
    let (app, _services) = create_test_app_with_config(config, Arc::new(PanickingInterpreter));

    let (status, _headers, _body) =
        submit_command(&app, "/scheme", r#"{"command": "(boom)"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = Config::default();
    config.relay.max_body_bytes = 64;
    let spy = SpyInterpreter::replying("unused");
    let (app, _services) = create_test_app_with_config(config, spy.clone());

    let command = "x".repeat(256);
    let (status, _headers, body) =
        submit_command(&app, "/scheme", json!({"command": command}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_body(&body).message, MISSING_COMMAND);
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_custom_mount_path() {
    let mut config = Config::default();
    config.relay.mount_path = "/api/v1.1/scheme".to_string();
    let spy = SpyInterpreter::replying("ok");
    let (app, _services) = create_test_app_with_config(config, spy.clone());

    let (status, _headers, _body) =
        submit_command(&app, "/api/v1.1/scheme", r#"{"command": "x"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _headers, _body) = submit_command(&app, "/scheme", r#"{"command": "x"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_get_on_endpoint_not_allowed() {
    let spy = SpyInterpreter::replying("unused");
    let (app, _services) = create_test_app(spy.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/scheme")
        .body(Body::empty())
        .unwrap();
    let (status, _headers, _body) = send(&app, request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_store_persists_across_requests() {
    let (app, services) = create_scheme_app();

    let (status, _headers, body) = submit_command(
        &app,
        "/scheme",
        r#"{"command": "(ConceptNode \"cat\")"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "(ConceptNode \"cat\")\n");

    let (_status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(define answer 42)"}"#).await;
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "");

    let (_status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(+ answer (cog-count-atoms))"}"#).await;
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "43\n");

    assert_eq!(services.store.node_count(), 1);
    assert!(services.store.get_node("ConceptNode", "cat").is_some());
}

#[tokio::test]
async fn test_attention_boundary_scenario() {
    let (app, services) = create_scheme_app();

    let (status, _headers, body) = submit_command(
        &app,
        "/scheme",
        r#"{"command": "(cog-set-af-boundary! 100)"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "100\n");
    assert_eq!(services.store.af_boundary(), 100);
}

#[tokio::test]
async fn test_deeply_nested_value_is_server_error() {
    let (app, _services) = create_scheme_app();

    let (status, _headers, _body) =
        submit_command(&app, "/scheme", r#"{"command": "(define x '())"}"#).await;
    assert_eq!(status, StatusCode::OK);

    let command = "(define x (list x))".repeat(40_000);
    let (status, _headers, body) =
        submit_command(&app, "/scheme", json!({"command": command}).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_body(&body).message.contains("Nesting deeper than"));

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(null? x)"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "#f\n");
}

#[tokio::test]
async fn test_concurrent_requests() {
    let (app, services) = create_scheme_app();

    let mut handles = Vec::new();
    for i in 0..16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let command = format!("(ConceptNode \"concept-{i}\")");
            submit_command(&app, "/scheme", json!({"command": command}).to_string()).await
        }));
    }

    for handle in handles {
        let (status, _headers, _body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(services.store.node_count(), 16);
}

#[tokio::test]
async fn test_inline_mode_serves_commands() {
    let mut config = Config::default();
    config.relay.execution = ExecutionMode::Inline;
    let spy = SpyInterpreter::replying("3\n");
    let (app, _services) = create_test_app_with_config(config, spy.clone());

    let (status, _headers, body) =
        submit_command(&app, "/scheme", r#"{"command": "(+ 1 2)"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let response: CommandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.response, "3\n");
    assert_eq!(spy.calls(), 1);
}
