//! Local stub of the upstream service, shared by the integration tests.
//!
//! The stub is an axum app bound to `127.0.0.1:0`. Blocking tests run it on
//! a background thread with its own runtime; async tests spawn it onto the
//! test's runtime.

#![allow(dead_code)]

use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tagscope::config::Config;
use tagscope::query::BoundingBox;

pub const MIAMI_TAG: &str = r#"{"geo":[25.8,-80.2],"rank":83,"tagExists":true,"results":[{"tag":"miamibeach","rank":74,"geo":[25.8,-80.2],"media_count":4329283,"relevance":99,"absRelevance":0.006}]}"#;
pub const MISSING_TAG: &str = r#"{"tag":"random_tag_that_does_not_exist","tagExists":false,"results":[]}"#;
pub const MIAMI_GRAPH: &str = r#"{"edges":[{"a":"miami","b":"liv","id":"miami#liv","weight":0.44775669978922017}],"exists":true,"nodes":[{"id":"miami","relevance":1.0,"weight":1.0,"x":0.4495344797287565,"y":0.40752168227901403},{"id":"liv","relevance":0.5417327185029007,"weight":0.4523809523809524,"x":0.20431805750484297,"y":0.6194782200730474}],"query":"miami","root_pos":[0.4495344797287565,0.40752168227901403]}"#;
pub const MIAMI_MAPS: &str = r#"{"count":3,"tags":[{"centroid":[25.80,-80.20],"tag":"igersmiami","weight":10},{"centroid":[25.81,-80.21],"tag":"miami","weight":49},{"centroid":[25.82,-80.22],"tag":"brickell","weight":3}]}"#;
pub const EMPTY_MAPS: &str = r#"{"count":0,"tags":[]}"#;

/// Request path and `api-token` of every hit on the stub.
#[derive(Clone, Default)]
pub struct Seen(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl Seen {
    fn record(&self, path: String, headers: &HeaderMap) {
        let token = headers
            .get("api-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.0.lock().unwrap().push((path, token));
    }

    pub fn all(&self) -> Vec<(String, Option<String>)> {
        self.0.lock().unwrap().clone()
    }
}

fn json(body: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

async fn tag_route(
    State(seen): State<Seen>,
    Path(hashtag): Path<String>,
    headers: HeaderMap,
) -> Response {
    seen.record(format!("/tag/{}", hashtag), &headers);
    match hashtag.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "garbled" => json("<html>maintenance</html>"),
        "random_tag_that_does_not_exist" => json(MISSING_TAG),
        _ => json(MIAMI_TAG),
    }
}

async fn graph_route(
    State(seen): State<Seen>,
    Path(hashtag): Path<String>,
    headers: HeaderMap,
) -> Response {
    seen.record(format!("/graph/{}", hashtag), &headers);
    json(MIAMI_GRAPH)
}

async fn local_route(
    State(seen): State<Seen>,
    UrlQuery(params): UrlQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let bbox = params.get("bbox").cloned().unwrap_or_default();
    let zoom = params.get("zoom").cloned().unwrap_or_default();
    seen.record(format!("/local/?bbox={}&zoom={}", bbox, zoom), &headers);
    if bbox == "0,0,1,1" {
        json(EMPTY_MAPS)
    } else {
        json(MIAMI_MAPS)
    }
}

fn stub_router(seen: Seen) -> Router {
    Router::new()
        .route("/tag/{hashtag}", get(tag_route))
        .route("/graph/{hashtag}", get(graph_route))
        .route("/local/", get(local_route))
        .with_state(seen)
}

/// Run the stub on its own thread, for tests using the blocking client.
pub fn spawn_stub_thread() -> (Config, Seen) {
    let seen = Seen::default();
    let server_seen = seen.clone();
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, stub_router(server_seen)).await.unwrap();
        });
    });

    let addr = rx.recv().unwrap();
    (Config::with_base_url(format!("http://{}", addr)), seen)
}

/// Spawn the stub onto the current runtime, for async tests.
pub async fn spawn_stub_task() -> (Config, Seen) {
    let seen = Seen::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = stub_router(seen.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (Config::with_base_url(format!("http://{}", addr)), seen)
}

pub fn miami_bbox() -> BoundingBox {
    BoundingBox::new(
        -80.48712034709753,
        25.750749758162012,
        -79.82794065959753,
        25.854604964203453,
    )
}
