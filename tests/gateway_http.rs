// tests/gateway_http.rs

use mockito::Matcher;
use rungraph::errors::RungraphError;
use rungraph::gateway::{HttpSchedulerService, RequestOptions, ScheduleRequest, SchedulerService};
use rungraph_test_utils::builders::{StoreBuilder, event, periodic};
use rungraph_test_utils::{init_tracing, with_timeout};
use serde_json::json;

fn sample_request() -> ScheduleRequest {
    let store = StoreBuilder::new()
        .runnable_with("A", periodic(2, 50), &[])
        .runnable_with("B", event(3), &["A"])
        .build();
    ScheduleRequest::from_store(
        &store,
        RequestOptions {
            num_cores: 2,
            simulation_time: 400,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn submit_posts_request_and_parses_multi_response() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/schedule")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "numCores": 2,
            "simulationTime": 400,
            "runnables": { "B": { "deps": ["A"], "type": "event" } }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": {
                "fcfs": {"totalExecutionTime": 5, "executionLog": [], "ganttChart": null},
                "criticality": {"totalExecutionTime": 6, "executionLog": [], "ganttChart": null}
            }}"#,
        )
        .create_async()
        .await;

    let service = HttpSchedulerService::new(server.url());
    let results = with_timeout(service.submit(&sample_request())).await.unwrap();

    mock.assert_async().await;
    let keys: Vec<&str> = results.algorithm_keys().collect();
    assert_eq!(keys, vec!["fcfs", "criticality"]);
}

#[tokio::test]
async fn server_error_surfaces_service_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/schedule")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "No runnables provided"}"#)
        .create_async()
        .await;

    let service = HttpSchedulerService::new(format!("{}/", server.url()));
    match with_timeout(service.submit(&sample_request())).await {
        Err(RungraphError::Service(msg)) => {
            assert!(msg.contains("400"));
            assert!(msg.contains("No runnables provided"));
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_http_error() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let service = HttpSchedulerService::new("http://127.0.0.1:9");
    let result = with_timeout(service.submit(&sample_request())).await;
    assert!(matches!(result, Err(RungraphError::Http(_))));
}

#[tokio::test]
async fn health_reports_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status": "healthy"}"#)
        .create_async()
        .await;

    let service = HttpSchedulerService::new(server.url());
    let status = with_timeout(service.health()).await.unwrap();

    assert!(status.is_healthy());
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let service = HttpSchedulerService::new("http://localhost:5001/");
    assert_eq!(service.base_url(), "http://localhost:5001");
}
