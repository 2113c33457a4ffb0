//! # Tagscope Core
//!
//! Runtime-free logic for the Tagscope hashtag analytics client: the
//! `api-token` derivation, request construction for the three upstream
//! endpoints, the typed result records, and the response mapper.
//!
//! This crate performs no I/O. The blocking and async transports, the
//! configuration layer and the CLI live in the `tagscope` crate.

pub mod error;
pub mod mapper;
pub mod models;
pub mod query;
pub mod token;

pub use error::{Error, Result};
