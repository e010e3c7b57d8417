use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    requested_paths: Arc<Mutex<Vec<String>>>,
}

async fn list_events(State(state): State<ServerState>) -> Json<Value> {
    state.requested_paths.lock().await.push("/api/v1/events/".into());
    Json(json!({
        "events": [
            {"id": 3, "name": "Grand Prix 3", "date": "2024-07-29"},
            {"id": 1, "name": "Grand Prix 1", "date": "2024-07-01"},
            {"id": 2, "name": "Grand Prix 2", "date": "2024-07-15"}
        ]
    }))
}

async fn event_detail(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    state
        .requested_paths
        .lock()
        .await
        .push(format!("/api/v1/events/{date}"));
    if date == "2024-07-01" {
        Ok(Json(json!({ "event": { "name": "Grand Prix 1", "date": date } })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn list_standings() -> Json<Value> {
    Json(json!({
        "standings": [
            {"position": 1, "driver": "Driver 1", "points": 100},
            {"position": 2, "driver": "Driver 2", "points": 85}
        ]
    }))
}

async fn driver_standing(Path(driver_id): Path<i64>) -> Json<Value> {
    Json(json!({ "driver_id": driver_id, "position": 1, "points": 100 }))
}

async fn root_info() -> Json<Value> {
    Json(json!({ "message": "Race Standings API", "version": "1.0.0" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn spawn(app: Router) -> std::io::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_results_server() -> std::io::Result<(String, ServerState)> {
    let state = ServerState::default();
    let app = Router::new()
        .route("/", get(root_info))
        .route("/health", get(health))
        .route("/api/v1/events/", get(list_events))
        .route("/api/v1/events/:date", get(event_detail))
        .route("/api/v1/standings/", get(list_standings))
        .route("/api/v1/standings/:driver_id", get(driver_standing))
        .with_state(state.clone());
    let url = spawn(app).await?;
    Ok((url, state))
}

#[tokio::test]
async fn fetch_events_keeps_source_order() {
    let (server_url, _) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let events = source.fetch_events().await.expect("events");
    let dates: Vec<_> = events.iter().map(|event| event.date.as_str()).collect();
    assert_eq!(dates, ["2024-07-29", "2024-07-01", "2024-07-15"]);
    assert_eq!(events[0].id, shared::domain::EventId(3));
}

#[tokio::test]
async fn fetch_event_looks_up_by_date() {
    let (server_url, state) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&format!("{server_url}/")).expect("source");

    let detail = source.fetch_event("2024-07-01").await.expect("detail");
    assert_eq!(detail.name, "Grand Prix 1");
    assert_eq!(
        state.requested_paths.lock().await.as_slice(),
        ["/api/v1/events/2024-07-01".to_string()]
    );
}

#[tokio::test]
async fn missing_event_surfaces_generic_status_failure() {
    let (server_url, _) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let err = source.fetch_event("1999-01-01").await.expect_err("404");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.resource(), Some(Resource::EventDetails));
    assert_eq!(err.to_string(), "Failed to fetch event details");
}

#[tokio::test]
async fn empty_event_date_is_rejected_without_a_request() {
    let (server_url, state) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let err = source.fetch_event("  ").await.expect_err("empty key");
    assert!(matches!(err, FetchError::EmptyEventKey));
    assert!(state.requested_paths.lock().await.is_empty());
}

#[tokio::test]
async fn event_date_with_url_syntax_is_sent_as_one_segment() {
    let (server_url, state) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let keys = ["../standings", "2024-07-01#x", "2024-07-01?x=1", "07/01/2024"];
    for key in keys {
        let err = source.fetch_event(key).await.expect_err(key);
        assert_eq!(err.status(), Some(404), "{key}");
    }

    let expected: Vec<String> = keys
        .iter()
        .map(|key| format!("/api/v1/events/{key}"))
        .collect();
    assert_eq!(*state.requested_paths.lock().await, expected);
}

#[test]
fn event_endpoint_percent_encodes_the_date() {
    let source = HttpResultsSource::new("http://results.example.com/rally/").expect("source");

    let url = source.event_endpoint("07/01/2024").expect("url");
    assert_eq!(url.path(), "/rally/api/v1/events/07%2F01%2F2024");

    let url = source.event_endpoint("2024-07-01?x=1#top").expect("url");
    assert_eq!(url.path(), "/rally/api/v1/events/2024-07-01%3Fx=1%23top");
    assert_eq!(url.query(), None);
    assert_eq!(url.fragment(), None);
}

#[tokio::test]
async fn dot_segment_dates_are_rejected_without_a_request() {
    let (server_url, state) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    for key in [".", " .. "] {
        let err = source.fetch_event(key).await.expect_err(key);
        assert!(matches!(err, FetchError::InvalidEventKey(_)), "{key}");
    }
    assert!(state.requested_paths.lock().await.is_empty());
}

#[tokio::test]
async fn server_error_on_events_reads_failed_to_fetch_events() {
    let app = Router::new().route(
        "/api/v1/events/",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let server_url = spawn(app).await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let err = source.fetch_events().await.expect_err("500");
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "Failed to fetch events");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let app = Router::new().route(
        "/api/v1/events/",
        get(|| async { Json(json!({ "items": [] })) }),
    );
    let server_url = spawn(app).await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let err = source.fetch_events().await.expect_err("decode");
    assert!(matches!(
        err,
        FetchError::Decode {
            resource: Resource::Events,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Failed to fetch events");
}

#[tokio::test]
async fn standings_and_driver_standing_decode() {
    let (server_url, _) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let standings = source.fetch_standings().await.expect("standings");
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[1].driver, "Driver 2");
    assert_eq!(standings[1].points, 85);

    let single = source
        .fetch_driver_standing(DriverId(7))
        .await
        .expect("driver standing");
    assert_eq!(single.driver_id, DriverId(7));
    assert_eq!(single.position, 1);
}

#[tokio::test]
async fn api_info_and_health_endpoints() {
    let (server_url, _) = spawn_results_server().await.expect("spawn server");
    let source = HttpResultsSource::new(&server_url).expect("source");

    let info = source.api_info().await.expect("info");
    assert_eq!(info.message, "Race Standings API");
    assert!(source.health().await.expect("health").is_healthy());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source = HttpResultsSource::with_timeout(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("source");
    let err = source.fetch_standings().await.expect_err("refused");
    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(err.user_message(), "Failed to fetch standings");
}

#[test]
fn base_url_normalization_keeps_prefix_and_drops_trailing_slash() {
    assert_eq!(
        normalize_base_url("https://results.example.com/rally/").expect("url"),
        "https://results.example.com/rally"
    );
    assert_eq!(
        normalize_base_url("").expect("default"),
        DEFAULT_API_BASE_URL
    );
}

#[test]
fn base_url_rejects_garbage_and_non_http_schemes() {
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(FetchError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://results.example.com"),
        Err(FetchError::UnsupportedScheme { scheme, .. }) if scheme == "ftp"
    ));
}
