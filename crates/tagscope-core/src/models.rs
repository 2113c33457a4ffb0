//! Typed result records.
//!
//! Every record is built fresh by the [`mapper`](crate::mapper) for one call
//! and never mutated afterwards. Each top-level record keeps the input it
//! was queried with (hashtag, or bounding box and zoom). Top-level fields upstream may omit are
//! `Option`s: `None` means "absent from the payload", which is different
//! from a present `false` or `0`. Sub-collections are always a `Vec`, empty
//! when absent, and keep upstream order.
//!
//! Items that have a natural ranking expose it as a named comparator
//! ([`TagResultItem::cmp_rank`], [`MapsTagItem::cmp_weight`]) for use with
//! `max_by`, `min_by` and `sort_by`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::BoundingBox;

// ============ Tag ============

/// Statistics for a single hashtag (`/tag/{hashtag}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagResult {
    /// Hashtag the query was made for.
    pub hashtag: String,
    /// Hashtag echoed back by upstream.
    pub tag: Option<String>,
    pub geo: Option<[f64; 2]>,
    pub rank: Option<i64>,
    pub exists: Option<bool>,
    pub results: Vec<TagResultItem>,
}

impl TagResult {
    /// Related tag with the greatest rank, by [`TagResultItem::cmp_rank`].
    pub fn top_ranked(&self) -> Option<&TagResultItem> {
        self.results.iter().max_by(|a, b| a.cmp_rank(b))
    }
}

impl fmt::Display for TagResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag(hashtag={}, exists={}, rank={}, results_len={})",
            self.hashtag,
            display_opt(&self.exists),
            display_opt(&self.rank),
            self.results.len()
        )
    }
}

/// A hashtag related to the queried one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResultItem {
    pub tag: String,
    pub rank: i64,
    pub geo: [f64; 2],
    pub media_count: i64,
    pub relevance: i64,
    #[serde(rename = "absRelevance")]
    pub abs_relevance: f64,
}

impl TagResultItem {
    /// Orders by rank ascending, so the greater rank is the maximum.
    ///
    /// ```rust
    /// # use tagscope_core::models::TagResultItem;
    /// let item = |rank| TagResultItem {
    ///     tag: format!("t{}", rank),
    ///     rank,
    ///     geo: [0.0, 0.0],
    ///     media_count: 0,
    ///     relevance: 0,
    ///     abs_relevance: 0.0,
    /// };
    /// let items = vec![item(74), item(83), item(1)];
    /// let best = items.iter().max_by(|a, b| a.cmp_rank(b)).unwrap();
    /// assert_eq!(best.rank, 83);
    /// ```
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    pub fn outranks(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Greater
    }
}

impl fmt::Display for TagResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result(tag={}, rank={}, geo={:?}, media_count={}, relevance={}, abs_relevance={})",
            self.tag, self.rank, self.geo, self.media_count, self.relevance, self.abs_relevance
        )
    }
}

// ============ Graph ============

/// Relationship graph around a hashtag (`/graph/{hashtag}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphResult {
    /// Hashtag the query was made for.
    pub hashtag: String,
    /// Hashtag echoed back by upstream.
    pub query: Option<String>,
    pub exists: Option<bool>,
    pub root_pos: Option<[f64; 2]>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphResult {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges with `id` on either end, in upstream order.
    pub fn neighbours<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.a == id || e.b == id)
    }
}

impl fmt::Display for GraphResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(hashtag={}, exists={}, root_pos={}, nodes_len={}, edges_len={})",
            self.hashtag,
            display_opt(&self.exists),
            self.root_pos
                .map(|p| format!("{:?}", p))
                .unwrap_or_else(|| "None".to_string()),
            self.nodes.len(),
            self.edges.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Hashtag name.
    pub id: String,
    pub relevance: f64,
    pub weight: f64,
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(id={}, relevance={}, weight={}, x={}, y={})",
            self.id, self.relevance, self.weight, self.x, self.y
        )
    }
}

/// Connection between two nodes. `id` is upstream's `"a#b"` key, kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub a: String,
    pub b: String,
    pub id: String,
    pub weight: f64,
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge(a={}, b={}, id={}, weight={})",
            self.a, self.b, self.id, self.weight
        )
    }
}

// ============ Maps ============

/// Hashtags clustered inside a bounding box (`/local/`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapsResult {
    /// Region the query was made for.
    pub bbox: BoundingBox,
    pub zoom: i32,
    pub count: Option<i64>,
    pub tags: Vec<MapsTagItem>,
}

impl MapsResult {
    /// Tag with the greatest weight, by [`MapsTagItem::cmp_weight`].
    pub fn heaviest(&self) -> Option<&MapsTagItem> {
        self.tags.iter().max_by(|a, b| a.cmp_weight(b))
    }
}

impl fmt::Display for MapsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Maps(x1={}, y1={}, x2={}, y2={}, zoom={}, count={}, tags_len={})",
            self.bbox.x1,
            self.bbox.y1,
            self.bbox.x2,
            self.bbox.y2,
            self.zoom,
            display_opt(&self.count),
            self.tags.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapsTagItem {
    pub centroid: [f64; 2],
    pub tag: String,
    pub weight: i64,
}

impl MapsTagItem {
    /// Orders by weight ascending, so the greater weight is the maximum.
    pub fn cmp_weight(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight)
    }
}

impl fmt::Display for MapsTagItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MapTag(tag={}, centroid={:?}, weight={})",
            self.tag, self.centroid, self.weight
        )
    }
}

/// Any of the three result shapes, for callers dispatching on [`Query`](crate::query::Query).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Tag(TagResult),
    Graph(GraphResult),
    Maps(MapsResult),
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Tag(r) => r.fmt(f),
            QueryResult::Graph(r) => r.fmt(f),
            QueryResult::Maps(r) => r.fmt(f),
        }
    }
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}
