//! # Tagscope
//!
//! A client for the displaypurposes.com hashtag analytics service.
//!
//! Three read-only lookups are exposed, each in a blocking and an async
//! form:
//!
//! | Lookup | Upstream path | Result |
//! |--------|---------------|--------|
//! | tag | `/tag/{hashtag}` | [`TagResult`](models::TagResult) |
//! | graph | `/graph/{hashtag}` | [`GraphResult`](models::GraphResult) |
//! | maps | `/local/?bbox=..&zoom=..` | [`MapsResult`](models::MapsResult) |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │ Client /     │──▶│  Endpoint   │──▶│  Transport  │──▶│  Mapper  │
//! │ AsyncClient  │   │ url + token │   │ GET (reqwest│   │  typed   │
//! └──────────────┘   └─────────────┘   │ blocking or │   │ records  │
//!                                      │ async)      │   └──────────┘
//!                                      └─────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Blocking and async clients |
//! | [`transport`] | Transport traits and reqwest implementations |
//! | [`config`] | TOML configuration |
//! | [`token`] | `api-token` derivation (re-exported from core) |
//! | [`query`] | Queries and request construction (re-exported from core) |
//! | [`models`] | Typed result records (re-exported from core) |
//! | [`mapper`] | Response mapping (re-exported from core) |

pub mod client;
pub mod config;
pub mod transport;

pub use tagscope_core::{error, mapper, models, query, token, Error, Result};
