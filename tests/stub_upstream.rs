//! End-to-end tests of both clients against the local upstream stub.

mod common;

use common::{miami_bbox, spawn_stub_task, spawn_stub_thread};
use tagscope::client::{AsyncClient, Client};
use tagscope::query::{BoundingBox, Query};
use tagscope::token::{derive_token, DEFAULT_USER_AGENT};

// ─── Blocking ───────────────────────────────────────────────────────

#[test]
fn blocking_tag_end_to_end() {
    let (cfg, seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let result = client.tag("miami").unwrap();
    assert_eq!(result.geo, Some([25.8, -80.2]));
    assert_eq!(result.rank, Some(83));
    assert_eq!(result.exists, Some(true));
    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].tag, "miamibeach");
    assert_eq!(result.top_ranked().unwrap().rank, 74);

    let hits = seen.all();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, "/tag/miami");
    assert_eq!(
        hits[0].1.as_deref(),
        Some(derive_token(DEFAULT_USER_AGENT, Some("miami")).as_str())
    );
}

#[test]
fn blocking_nonexistent_tag_is_not_an_error() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let result = client.tag("random_tag_that_does_not_exist").unwrap();
    assert_eq!(result.exists, Some(false));
    assert!(result.results.is_empty());
    assert_eq!(result.geo, None);
    assert_eq!(result.rank, None);
}

#[test]
fn blocking_empty_maps_end_to_end() {
    let (cfg, seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let result = client.maps(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), 12).unwrap();
    assert_eq!(result.count, Some(0));
    assert!(result.tags.is_empty());

    let hits = seen.all();
    assert_eq!(hits[0].0, "/local/?bbox=0,0,1,1&zoom=12");
    assert_eq!(hits[0].1.as_deref(), Some("test"));
}

#[test]
fn blocking_maps_heaviest_tag() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let result = client.maps(&miami_bbox(), 12).unwrap();
    assert_eq!(result.count, Some(3));
    assert_eq!(result.heaviest().unwrap().weight, 49);
}

#[test]
fn blocking_graph_preserves_values() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let graph = client.graph("miami").unwrap();
    assert_eq!(graph.exists, Some(true));
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.nodes[1].x, 0.20431805750484297);
    assert_eq!(graph.edges[0].id, "miami#liv");
}

#[test]
fn blocking_http_500_is_transport_error() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let err = client.tag("broken").unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.http_status(), Some(500));
}

#[test]
fn blocking_garbled_body_is_parse_error() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let err = client.tag("garbled").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn blocking_raw_document() {
    let (cfg, seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let doc = client.raw(&Query::Tag("miami".into())).unwrap();
    assert_eq!(doc["tagExists"], true);
    assert_eq!(doc["results"][0]["absRelevance"], 0.006);
    assert_eq!(seen.all()[0].0, "/tag/miami");

    let err = client.raw(&Query::Tag("broken".into())).unwrap_err();
    assert_eq!(err.http_status(), Some(500));
}

#[test]
fn blocking_results_keep_queried_input() {
    let (cfg, _seen) = spawn_stub_thread();
    let client = Client::new(&cfg).unwrap();

    let tag = client.tag("miami").unwrap();
    assert_eq!(tag.hashtag, "miami");
    assert_eq!(
        tag.to_string(),
        "Tag(hashtag=miami, exists=true, rank=83, results_len=1)"
    );

    let maps = client.maps(&miami_bbox(), 12).unwrap();
    assert_eq!(maps.bbox, miami_bbox());
    assert_eq!(maps.zoom, 12);
}

// ─── Async ──────────────────────────────────────────────────────────

#[tokio::test]
async fn async_tag_end_to_end() {
    let (cfg, seen) = spawn_stub_task().await;
    let client = AsyncClient::new(&cfg).unwrap();

    let result = client.tag("miami").await.unwrap();
    assert_eq!(result.rank, Some(83));
    assert_eq!(result.results[0].media_count, 4329283);
    assert_eq!(seen.all()[0].0, "/tag/miami");
}

#[tokio::test]
async fn async_http_500_rejects() {
    let (cfg, _seen) = spawn_stub_task().await;
    let client = AsyncClient::new(&cfg).unwrap();

    let err = client.tag("broken").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.http_status(), Some(500));
}

#[tokio::test]
async fn async_empty_maps() {
    let (cfg, seen) = spawn_stub_task().await;
    let client = AsyncClient::new(&cfg).unwrap();

    let result = client.maps(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), 12).await.unwrap();
    assert_eq!(result.count, Some(0));
    assert!(result.tags.is_empty());
    assert_eq!(seen.all()[0].1.as_deref(), Some("test"));
}

#[tokio::test]
async fn async_raw_document() {
    let (cfg, seen) = spawn_stub_task().await;
    let client = AsyncClient::new(&cfg).unwrap();

    let doc = client.raw(&Query::Graph("miami".into())).await.unwrap();
    assert_eq!(doc["query"], "miami");
    assert_eq!(doc["edges"][0]["id"], "miami#liv");
    assert_eq!(seen.all()[0].0, "/graph/miami");
}

// ─── Both modes ─────────────────────────────────────────────────────

#[test]
fn blocking_and_async_results_are_identical() {
    let (cfg, _seen) = spawn_stub_thread();

    let blocking = Client::new(&cfg).unwrap();
    let tag = blocking.tag("miami").unwrap();
    let graph = blocking.graph("miami").unwrap();
    let maps = blocking.maps(&miami_bbox(), 12).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let (async_tag, async_graph, async_maps) = runtime.block_on(async {
        let client = AsyncClient::new(&cfg).unwrap();
        (
            client.tag("miami").await.unwrap(),
            client.graph("miami").await.unwrap(),
            client.maps(&miami_bbox(), 12).await.unwrap(),
        )
    });

    assert_eq!(tag, async_tag);
    assert_eq!(graph, async_graph);
    assert_eq!(maps, async_maps);
    assert_eq!(
        serde_json::to_string(&tag).unwrap(),
        serde_json::to_string(&async_tag).unwrap()
    );
}
