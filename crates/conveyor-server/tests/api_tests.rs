use application::{ActuationDispatcher, ActuationPolicy, ConveyorDriver};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use conveyor_server::{api, setup_app_state};
use domain::{Command, PinLevel, PinMap};
use infrastructure::gpio::{GpioOp, MockGpioProvider};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app(provider: &MockGpioProvider) -> (Router, ActuationDispatcher) {
    let driver = ConveyorDriver::new(
        Arc::new(provider.clone()),
        PinMap::default(),
        Duration::from_secs(2),
    );
    let dispatcher = ActuationDispatcher::new(Arc::new(driver), ActuationPolicy::Concurrent);
    let app = api::create_router(setup_app_state(dispatcher.clone()));
    (app, dispatcher)
}

fn json_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/conveyor")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_accepted_acknowledged_and_drives_forward() {
    let provider = MockGpioProvider::new();
    let (app, dispatcher) = test_app(&provider);
    let mut reports = dispatcher.subscribe();

    let response = app
        .oneshot(json_request(r#"{"result":"accepted"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Conveyor command 'accepted' received and processing." })
    );

    let report = reports.recv().await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.command, Command::Accepted);

    let ops = provider.ops();
    assert!(ops.contains(&GpioOp::SetLevel(17, PinLevel::High)));
    assert!(!ops.contains(&GpioOp::SetLevel(27, PinLevel::High)));
    assert_eq!(ops.last(), Some(&GpioOp::ReleaseAll));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_acknowledged_and_drives_backward() {
    let provider = MockGpioProvider::new();
    let (app, dispatcher) = test_app(&provider);
    let mut reports = dispatcher.subscribe();

    let response = app
        .oneshot(json_request(r#"{"result":"rejected"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("'rejected'"));

    reports.recv().await.unwrap();
    let ops = provider.ops();
    assert!(ops.contains(&GpioOp::SetLevel(27, PinLevel::High)));
    assert!(!ops.contains(&GpioOp::SetLevel(17, PinLevel::High)));
}

#[tokio::test(start_paused = true)]
async fn test_response_precedes_actuation() {
    let provider = MockGpioProvider::new();
    let (app, _dispatcher) = test_app(&provider);

    let response = app
        .oneshot(json_request(r#"{"result":"accepted"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // The pulse has not been released yet when the response is in hand
    assert!(!provider.ops().contains(&GpioOp::ReleaseAll));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_results_rejected_without_dispatch() {
    let provider = MockGpioProvider::new();
    let (app, _dispatcher) = test_app(&provider);

    let bodies = [
        r#"{}"#,
        r#"{"result":""}"#,
        r#"{"result":"maybe"}"#,
        r#"{"result":"Accepted"}"#,
        r#"{"result":1}"#,
        r#"{"result":null}"#,
        r#"{"result":["accepted"]}"#,
        r#"["accepted"]"#,
        r#"not json"#,
    ];

    for body in bodies {
        let response = app.clone().oneshot(json_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid result. Must be 'accepted' or 'rejected'." })
        );
    }

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(provider.sessions_opened(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_content_type_rejected() {
    let provider = MockGpioProvider::new();
    let (app, _dispatcher) = test_app(&provider);

    let request = Request::builder()
        .method("POST")
        .uri("/conveyor")
        .body(Body::from(r#"{"result":"accepted"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.sessions_opened(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_requests_pulse_twice() {
    let provider = MockGpioProvider::new();
    let (app, dispatcher) = test_app(&provider);
    let mut reports = dispatcher.subscribe();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(r#"{"result":"accepted"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(reports.recv().await.unwrap().is_success());
    }

    let highs = provider
        .ops()
        .into_iter()
        .filter(|op| *op == GpioOp::SetLevel(17, PinLevel::High))
        .count();
    assert_eq!(highs, 2);
    assert_eq!(provider.peak_active_lines(), 1);
}

#[tokio::test]
async fn test_health_reports_backend() {
    let provider = MockGpioProvider::new();
    let (app, _dispatcher) = test_app(&provider);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ok", "backend": "mock" })
    );
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let provider = MockGpioProvider::new();
    let (app, _dispatcher) = test_app(&provider);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/conveyor")
        .header(header::ORIGIN, "https://scanner.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
