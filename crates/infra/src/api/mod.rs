//! REST adapter for the SObject API
//!
//! # Architecture
//!
//! - Uses the crate's `HttpClient` (no direct reqwest client construction)
//! - Bearer authentication through an `AccessTokenProvider`
//! - Timeout on every request, no automatic retry
//! - Non-2xx statuses classified into `ApiError` categories

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use client::{RestTransport, RestTransportBuilder, RestTransportConfig};
pub use errors::{ApiError, ApiErrorCategory};
