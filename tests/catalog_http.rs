//! HTTP-level tests of `DishClient` and the controller against an
//! in-process catalog server.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use dish_explorer::api::{DishClient, DishSource};
use dish_explorer::config::ExplorerConfig;
use dish_explorer::domain::EventBus;
use dish_explorer::error::ExplorerError;
use dish_explorer::service::{ControllerSettings, SearchController};

/// Raw query string and `Authorization` header of every request seen.
#[derive(Debug, Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
}

impl Recorder {
    fn queries(&self) -> Vec<Option<String>> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    fn auth_headers(&self) -> Vec<Option<String>> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, a)| a.clone())
            .collect()
    }

    fn record(&self, query: Option<String>, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((query, auth));
    }
}

/// 23 dishes, served 10 per page according to `skip`.
async fn list_dishes(
    State(recorder): State<Recorder>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    recorder.record(query.clone(), &headers);
    let skip = query
        .as_deref()
        .and_then(|q| q.split('&').find_map(|kv| kv.strip_prefix("skip=")))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let dishes: Vec<_> = (skip..(skip + 10).min(23))
        .map(|i| {
            json!({
                "_id": format!("id-{i}"),
                "name": format!("dish {i}"),
                "diet": "vegetarian",
                "prep_time": 20,
                "ingredients": ["rice", "lentils"],
                "course": "main course"
            })
        })
        .collect();
    axum::Json(json!({
        "success": true,
        "data": { "dishes": dishes, "totalCount": 23 }
    }))
}

async fn suggest(
    State(recorder): State<Recorder>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    recorder.record(query, &headers);
    axum::Json(json!({ "data": ["gulab jamun", "gajar halwa"] }))
}

async fn failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn unwrapped() -> impl IntoResponse {
    axum::Json(json!({ "dishes": [], "totalCount": 0 }))
}

async fn spawn_catalog() -> std::io::Result<(SocketAddr, Recorder)> {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/api/dish", get(list_dishes))
        .route("/api/dish/suggestions", get(suggest))
        .route("/broken/dish", get(failing))
        .route("/bare/dish", get(unwrapped))
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((addr, recorder))
}

fn client_for(base_url: String) -> DishClient {
    let config = ExplorerConfig {
        base_url,
        ..ExplorerConfig::default()
    };
    assert_ok!(DishClient::new(&config))
}

#[tokio::test]
async fn name_search_forces_skip_zero_and_sends_token() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/api"));

    let page = assert_ok!(client.fetch_list(20, "soup", "").await);

    assert_eq!(page.total_count, 23);
    assert_eq!(page.dishes.len(), 10);
    assert_eq!(recorder.queries(), vec![Some("skip=0&name=soup".to_string())]);
    assert_eq!(
        recorder.auth_headers(),
        vec![Some("your-auth-token-here".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn ingredients_reach_server_comma_joined() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/api"));

    assert_ok!(client.fetch_list(0, "", "  tomato   onion ").await);
    assert_ok!(client.fetch_list(10, "curry", "potato peas").await);

    assert_eq!(
        recorder.queries(),
        vec![
            Some("skip=0&ingredients=tomato,onion".to_string()),
            Some("skip=0&name=curry&ingredients=potato,peas".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn first_unfiltered_page_sends_no_query() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/api"));

    let first = assert_ok!(client.fetch_list(0, "", "").await);
    let third = assert_ok!(client.fetch_list(20, "", "").await);

    assert_eq!(first.dishes.len(), 10);
    assert_eq!(third.dishes.len(), 3);
    assert_eq!(recorder.queries(), vec![None, Some("skip=20".to_string())]);
    Ok(())
}

#[tokio::test]
async fn raw_name_is_encoded_by_url_parser() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/api"));

    assert_ok!(client.fetch_list(0, "malai kofta", "").await);

    assert_eq!(
        recorder.queries(),
        vec![Some("skip=0&name=malai%20kofta".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_reported() -> std::io::Result<()> {
    let (addr, _) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/broken"));

    let err = assert_err!(client.fetch_list(0, "", "").await);

    let ExplorerError::Status { status, body } = err else {
        panic!("expected status error");
    };
    assert_eq!(status, 500);
    assert_eq!(body, "database unavailable");
    Ok(())
}

#[tokio::test]
async fn payload_without_envelope_is_malformed() -> std::io::Result<()> {
    let (addr, _) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/bare"));

    let err = assert_err!(client.fetch_list(0, "", "").await);

    assert_eq!(err.kind(), "malformed_envelope");
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_transport_error() -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    let client = client_for(format!("http://{addr}/api"));

    let err = assert_err!(client.fetch_list(0, "", "").await);

    assert_eq!(err.kind(), "transport");
    Ok(())
}

#[tokio::test]
async fn suggestions_are_unwrapped() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = client_for(format!("http://{addr}/api"));

    let suggestions = assert_ok!(client.fetch_suggestions("ga").await);

    assert_eq!(suggestions, vec!["gulab jamun", "gajar halwa"]);
    assert_eq!(recorder.queries(), vec![Some("name=ga".to_string())]);
    Ok(())
}

#[tokio::test]
async fn controller_pages_through_live_catalog() -> std::io::Result<()> {
    let (addr, recorder) = spawn_catalog().await?;
    let client = Arc::new(client_for(format!("http://{addr}/api")));
    let controller =
        SearchController::new(client, ControllerSettings::default(), EventBus::new(32));

    controller.mount().await;
    controller.settle().await;
    assert!(controller.next_page().await);
    controller.settle().await;
    assert!(controller.next_page().await);
    controller.settle().await;
    assert!(!controller.next_page().await);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.state.page, 3);
    assert_eq!(snapshot.total_pages, 3);
    assert_eq!(snapshot.state.results.dishes.len(), 3);
    assert!(!snapshot.state.loading);
    assert_eq!(
        recorder.queries(),
        vec![None, Some("skip=10".to_string()), Some("skip=20".to_string())]
    );
    Ok(())
}
