//! Image search API client.
//!
//! This module provides the typed client for the paginated search endpoint:
//! - [`SearchClient`] - reqwest-backed client with shared networking policy
//! - [`SearchResponse`], [`ImageHit`], [`ImageUrls`] - wire types
//! - [`SearchError`] - structured request failures

mod client;
mod error;
mod models;

pub use client::SearchClient;
pub(crate) use client::USER_AGENT;
pub use error::{SEARCH_FAILED_MESSAGE, SearchError};
pub use models::{ImageHit, ImageUrls, SearchResponse};
