//! Queries and request construction.
//!
//! [`Endpoint`] turns a [`Query`] into a [`Request`]: the target URL plus
//! the fixed protocol headers with the derived `api-token`. Nothing here
//! touches the network; transports take the finished [`Request`].
//!
//! | Query | Path | Token subject |
//! |-------|------|---------------|
//! | [`Query::Tag`] | `/tag/{hashtag}` | hashtag |
//! | [`Query::Graph`] | `/graph/{hashtag}` | hashtag |
//! | [`Query::Maps`] | `/local/?bbox={x1},{y1},{x2},{y2}&zoom={zoom}` | none (`"test"`) |
//!
//! Hashtags are substituted into the path as-is, without percent-encoding.

use std::fmt;

use serde::Serialize;

use crate::token::{derive_token, DEFAULT_USER_AGENT};

pub const DEFAULT_BASE_URL: &str = "https://apidisplaypurposes.com";

/// Geographic query region for map queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// One of the three upstream lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Tag(String),
    Graph(String),
    /// Bounding box plus zoom. Upstream expects zoom in `2..=16`; not checked here.
    Maps { bbox: BoundingBox, zoom: i32 },
}

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Tag(_) => QueryKind::Tag,
            Query::Graph(_) => QueryKind::Graph,
            Query::Maps { .. } => QueryKind::Maps,
        }
    }

    /// Value the `api-token` is derived from.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Query::Tag(hashtag) | Query::Graph(hashtag) => Some(hashtag.as_str()),
            Query::Maps { .. } => None,
        }
    }
}

/// Result shape a query produces; selects the mapper projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Tag,
    Graph,
    Maps,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Tag => "tag",
            QueryKind::Graph => "graph",
            QueryKind::Maps => "maps",
        }
    }
}

/// A fully built GET request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub kind: QueryKind,
    pub url: String,
    /// Header name/value pairs in send order.
    pub headers: Vec<(&'static str, String)>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Upstream location and client identity used to build requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    base_url: String,
    user_agent: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            user_agent: user_agent.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn url(&self, query: &Query) -> String {
        match query {
            Query::Tag(hashtag) => format!("{}/tag/{}", self.base_url, hashtag),
            Query::Graph(hashtag) => format!("{}/graph/{}", self.base_url, hashtag),
            Query::Maps { bbox, zoom } => {
                format!("{}/local/?bbox={}&zoom={}", self.base_url, bbox, zoom)
            }
        }
    }

    /// Fixed protocol headers with `api-token` derived for `subject`.
    pub fn headers(&self, subject: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("authority", "apidisplaypurposes.com".to_string()),
            ("user-agent", self.user_agent.clone()),
            ("dnt", "1".to_string()),
            ("api-token", derive_token(&self.user_agent, subject)),
            ("accept", "*/*".to_string()),
            ("origin", "https://displaypurposes.com".to_string()),
            ("sec-fetch-site", "cross-site".to_string()),
            ("sec-fetch-mode", "cors".to_string()),
            ("sec-fetch-dest", "empty".to_string()),
            ("referer", "https://displaypurposes.com/".to_string()),
            ("accept-language", "en-US,en;q=0.9".to_string()),
        ]
    }

    pub fn request(&self, query: &Query) -> Request {
        Request {
            kind: query.kind(),
            url: self.url(query),
            headers: self.headers(query.subject()),
        }
    }
}
