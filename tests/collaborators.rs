//! HTTP middleware and subprocess piping through the public API.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tierlog::http::{request_log_middleware, RequestLogState};
use tierlog::LogLevel;
use tower::ServiceExt;

mod common;
use common::capture_logger;

#[tokio::test]
async fn middleware_emits_request_record() {
    let (logger, console, _) = capture_logger(LogLevel::Info);
    let app = Router::new()
        .route("/users/{id}", get(|| async { StatusCode::CREATED }))
        .layer(middleware::from_fn_with_state(
            RequestLogState::new(logger.clone()),
            request_log_middleware,
        ));

    let response = app
        .oneshot(Request::get("/users/9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let text = console.plain_text();
    assert!(text.contains("REQ: 201 GET /users/9"), "{text}");
}

#[tokio::test]
async fn request_records_hidden_above_info() {
    let (logger, console, _) = capture_logger(LogLevel::Warn);
    let app = Router::new()
        .route("/", get(|| async { "hi" }))
        .layer(middleware::from_fn_with_state(
            RequestLogState::new(logger.clone()),
            request_log_middleware,
        ));

    app.oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(console.text().is_empty());
    assert_eq!(logger.buffered_lines(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn subprocess_output_is_forwarded_before_wait_returns() {
    use tierlog::process::spawn_logged;
    use tokio::process::Command;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("job.log");
    let (logger, _, _) = capture_logger(LogLevel::Info);
    logger.init_file_logging(&path).unwrap();

    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg("for i in 1 2 3 4 5; do echo line $i; done; echo trouble 1>&2");
    let (mut child, pipe) = spawn_logged(Arc::clone(&logger), command, "worker").unwrap();
    child.wait().await.unwrap();
    pipe.wait().await;

    let written = std::fs::read_to_string(&path).unwrap();
    for i in 1..=5 {
        assert!(written.contains(&format!("INFO: [worker] line {i}")), "{written}");
    }
    assert!(written.contains("WARN: [worker] trouble"));

    let stdout_order: Vec<&str> = written
        .lines()
        .filter(|l| l.contains("INFO: [worker]"))
        .collect();
    assert!(stdout_order[0].ends_with("line 1"));
    assert!(stdout_order[4].ends_with("line 5"));
}
