//! # ForceLink Core
//!
//! Pure client logic - no HTTP code.
//!
//! This crate contains:
//! - The `Transport` port implemented by the infra crate
//! - The lazily populated schema registry and describe cache
//! - Batch partitioning, validation and result reconciliation
//! - `SObjectService`: bulk drivers and single-record operations
//!
//! ## Architecture Principles
//! - Only depends on `forcelink-domain`
//! - All I/O goes through the `Transport` trait
//! - Batches are sent sequentially, in input order

pub mod batch;
pub mod ports;
pub mod schema;
pub mod service;

pub use ports::{QueryParams, Transport};
pub use schema::{SObjectMap, SchemaRegistry};
pub use service::SObjectService;
