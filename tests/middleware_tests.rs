//! Tests for the shipped middleware: metrics, timeout, and request tracing.

use std::time::Duration;

use http::Method;
use janus::middleware::{timeout, trace_requests, MetricsMiddleware};
use janus::{Response, Router};

#[tokio::test]
async fn metrics_middleware_counts_requests_and_errors() {
    let metrics = MetricsMiddleware::new();

    let mut router = Router::new();
    router.middleware_callback(metrics.callback());
    router
        .route(Method::GET, "/ok", |req, _next| async move {
            req.context.set_response(Response::json(200, serde_json::Value::Null));
            Ok(())
        })
        .expect("register");
    router
        .route(Method::GET, "/boom", |_req, _next| async move {
            Err(anyhow::anyhow!("boom"))
        })
        .expect("register");

    router.dispatch("GET", "/ok").await.expect("ok");
    router.dispatch("GET", "/ok").await.expect("ok");
    assert!(router.dispatch("GET", "/boom").await.is_err());

    assert_eq!(metrics.request_count(), 3);
    assert_eq!(metrics.error_count(), 1);
}

#[tokio::test]
async fn timeout_middleware_converts_a_stall_into_a_504() {
    let mut router = Router::new();
    router.middleware_callback(timeout(Duration::from_millis(20)));
    router
        .route(Method::GET, "/slow", |_req, _next| async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .expect("register");

    let outcome = router
        .dispatch("GET", "/slow")
        .await
        .expect("dispatch")
        .expect("outcome");
    assert_eq!(outcome.status, 504);
}

#[tokio::test]
async fn timeout_middleware_passes_a_fast_response_through() {
    let mut router = Router::new();
    router.middleware_callback(timeout(Duration::from_secs(5)));
    router
        .route(Method::GET, "/fast", |req, _next| async move {
            req.context.set_response(Response::json(200, serde_json::Value::Null));
            Ok(())
        })
        .expect("register");

    let outcome = router.dispatch("GET", "/fast").await.expect("dispatch");
    assert_eq!(outcome.map(|r| r.status), Some(200));
}

#[tokio::test]
async fn trace_middleware_is_transparent_to_the_outcome() {
    let mut router = Router::new();
    router.middleware_callback(trace_requests());
    router
        .route(Method::GET, "/todos/:id", |req, _next| async move {
            req.context.set_response(Response::json(200, serde_json::Value::Null));
            Ok(())
        })
        .expect("register");

    let outcome = router
        .dispatch("GET", "/todos/1")
        .await
        .expect("dispatch");
    assert_eq!(outcome.map(|r| r.status), Some(200));

    // errors still surface through the span wrapper
    let mut router = Router::new();
    router.middleware_callback(trace_requests());
    router
        .route(Method::GET, "/boom", |_req, _next| async move {
            Err(anyhow::anyhow!("boom"))
        })
        .expect("register");
    assert!(router.dispatch("GET", "/boom").await.is_err());
}
