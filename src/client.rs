//! High-level clients: the public surface of Tagscope.
//!
//! [`Client`] offers the blocking form of the three lookups and
//! [`AsyncClient`] the suspendable form. Each call goes through the same
//! pipeline:
//!
//! ```text
//! Query ──▶ Endpoint::request ──▶ transport.execute ──▶ post_process ──▶ mapper
//!          (url + headers + token)   (GET, raw text)      (JSON tree)     (typed record)
//! ```
//!
//! Token derivation, URL construction and mapping never suspend; in the
//! async client the only await point is the transport call. Errors from
//! any step are returned unchanged.
//!
//! ```rust,no_run
//! use tagscope::client::{AsyncClient, Client};
//! use tagscope::config::Config;
//!
//! # fn blocking() -> anyhow::Result<()> {
//! let client = Client::new(&Config::minimal())?;
//! let miami = client.tag("miami")?;
//! println!("{}", miami);
//! # Ok(())
//! # }
//! # async fn suspendable() -> anyhow::Result<()> {
//! let client = AsyncClient::new(&Config::minimal())?;
//! let graph = client.graph("miami").await?;
//! println!("{}", graph);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use tagscope_core::mapper;
use tagscope_core::models::{GraphResult, MapsResult, QueryResult, TagResult};
use tagscope_core::query::{BoundingBox, Endpoint, Query};
use tagscope_core::Result;
use tracing::debug;

use crate::config::Config;
use crate::transport::{AsyncTransport, BlockingTransport, ReqwestAsync, ReqwestBlocking};

// ============ Blocking ============

/// Blocking client. Calls return once the upstream response is mapped.
pub struct Client<T: BlockingTransport = ReqwestBlocking> {
    endpoint: Endpoint,
    transport: T,
}

impl Client<ReqwestBlocking> {
    /// Build a client with the reqwest blocking transport.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            config.endpoint(),
            ReqwestBlocking::new(&config.http)?,
        ))
    }
}

impl<T: BlockingTransport> Client<T> {
    pub fn with_transport(endpoint: Endpoint, transport: T) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn fetch(&self, query: &Query) -> Result<Value> {
        let request = self.endpoint.request(query);
        debug!(kind = request.kind.as_str(), "dispatching blocking query");
        let raw = self.transport.execute(&request)?;
        self.transport.post_process(raw)
    }

    /// Statistics and related tags for `hashtag`.
    pub fn tag(&self, hashtag: &str) -> Result<TagResult> {
        mapper::map_tag(self.fetch(&Query::Tag(hashtag.to_string()))?, hashtag)
    }

    /// Relationship graph around `hashtag`.
    pub fn graph(&self, hashtag: &str) -> Result<GraphResult> {
        mapper::map_graph(self.fetch(&Query::Graph(hashtag.to_string()))?, hashtag)
    }

    /// Hashtags clustered inside `bbox` at `zoom` (upstream accepts 2 to 16).
    pub fn maps(&self, bbox: &BoundingBox, zoom: i32) -> Result<MapsResult> {
        mapper::map_maps(self.fetch(&Query::Maps { bbox: *bbox, zoom })?, *bbox, zoom)
    }

    pub fn execute(&self, query: &Query) -> Result<QueryResult> {
        mapper::map(self.fetch(query)?, query)
    }

    /// Post-processed response document for `query`, without typed mapping.
    pub fn raw(&self, query: &Query) -> Result<Value> {
        self.fetch(query)
    }
}

// ============ Async ============

/// Suspendable client. Each call suspends once, at the network I/O.
pub struct AsyncClient<T: AsyncTransport = ReqwestAsync> {
    endpoint: Endpoint,
    transport: T,
}

impl AsyncClient<ReqwestAsync> {
    /// Build a client with the async reqwest transport.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            config.endpoint(),
            ReqwestAsync::new(&config.http)?,
        ))
    }
}

impl<T: AsyncTransport> AsyncClient<T> {
    pub fn with_transport(endpoint: Endpoint, transport: T) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch(&self, query: &Query) -> Result<Value> {
        let request = self.endpoint.request(query);
        debug!(kind = request.kind.as_str(), "dispatching async query");
        let raw = self.transport.execute(&request).await?;
        self.transport.post_process(raw)
    }

    pub async fn tag(&self, hashtag: &str) -> Result<TagResult> {
        mapper::map_tag(self.fetch(&Query::Tag(hashtag.to_string())).await?, hashtag)
    }

    pub async fn graph(&self, hashtag: &str) -> Result<GraphResult> {
        mapper::map_graph(self.fetch(&Query::Graph(hashtag.to_string())).await?, hashtag)
    }

    pub async fn maps(&self, bbox: &BoundingBox, zoom: i32) -> Result<MapsResult> {
        let query = Query::Maps { bbox: *bbox, zoom };
        mapper::map_maps(self.fetch(&query).await?, *bbox, zoom)
    }

    pub async fn execute(&self, query: &Query) -> Result<QueryResult> {
        mapper::map(self.fetch(query).await?, query)
    }

    /// Post-processed response document for `query`, without typed mapping.
    pub async fn raw(&self, query: &Query) -> Result<Value> {
        self.fetch(query).await
    }
}
