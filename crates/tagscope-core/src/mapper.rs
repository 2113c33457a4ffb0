//! Response mapper.
//!
//! Decodes raw response text into a generic JSON tree and projects it into
//! the result shape of the query that produced it. The mapper is told the
//! query; it never guesses a shape from the payload. The queried hashtag or
//! bounding box is copied onto the result record.
//!
//! Mapping rules:
//! - Malformed text, or a field present with the wrong type, fails with
//!   [`Error::Parse`](crate::Error::Parse).
//! - Missing (or `null`) top-level scalars become `None`.
//! - Missing, `null` or empty sub-collections become an empty `Vec`.
//! - Item order is upstream order; nothing is sorted here.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    GraphEdge, GraphNode, GraphResult, MapsResult, MapsTagItem, QueryResult, TagResult,
    TagResultItem,
};
use crate::query::{BoundingBox, Query};

#[derive(Deserialize)]
struct TagPayload {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    geo: Option<[f64; 2]>,
    #[serde(default)]
    rank: Option<i64>,
    #[serde(default, rename = "tagExists")]
    tag_exists: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    results: Vec<TagResultItem>,
}

#[derive(Deserialize)]
struct GraphPayload {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    exists: Option<bool>,
    #[serde(default)]
    root_pos: Option<[f64; 2]>,
    #[serde(default, deserialize_with = "null_as_empty")]
    nodes: Vec<GraphNode>,
    #[serde(default, deserialize_with = "null_as_empty")]
    edges: Vec<GraphEdge>,
}

#[derive(Deserialize)]
struct MapsPayload {
    #[serde(default)]
    count: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    tags: Vec<MapsTagItem>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode raw response text into a JSON tree.
pub fn decode(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

pub fn map_tag(doc: Value, hashtag: &str) -> Result<TagResult> {
    let payload: TagPayload = serde_json::from_value(doc)?;
    Ok(TagResult {
        hashtag: hashtag.to_string(),
        tag: payload.tag,
        geo: payload.geo,
        rank: payload.rank,
        exists: payload.tag_exists,
        results: payload.results,
    })
}

pub fn map_graph(doc: Value, hashtag: &str) -> Result<GraphResult> {
    let payload: GraphPayload = serde_json::from_value(doc)?;
    Ok(GraphResult {
        hashtag: hashtag.to_string(),
        query: payload.query,
        exists: payload.exists,
        root_pos: payload.root_pos,
        nodes: payload.nodes,
        edges: payload.edges,
    })
}

pub fn map_maps(doc: Value, bbox: BoundingBox, zoom: i32) -> Result<MapsResult> {
    let payload: MapsPayload = serde_json::from_value(doc)?;
    Ok(MapsResult {
        bbox,
        zoom,
        count: payload.count,
        tags: payload.tags,
    })
}

/// Project an already decoded document into the shape for `query`.
pub fn map(doc: Value, query: &Query) -> Result<QueryResult> {
    Ok(match query {
        Query::Tag(hashtag) => QueryResult::Tag(map_tag(doc, hashtag)?),
        Query::Graph(hashtag) => QueryResult::Graph(map_graph(doc, hashtag)?),
        Query::Maps { bbox, zoom } => QueryResult::Maps(map_maps(doc, *bbox, *zoom)?),
    })
}

/// Decode `text` and project it into the shape for `query`.
pub fn parse(text: &str, query: &Query) -> Result<QueryResult> {
    map(decode(text)?, query)
}
