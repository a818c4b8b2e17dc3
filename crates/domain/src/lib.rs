//! # ForceLink Domain
//!
//! Domain types shared by the ForceLink crates.
//!
//! This crate contains:
//! - The `SObject` capability trait and record wire types
//! - Schema metadata and composite request/response envelopes
//! - Error types and the `Result` alias
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other ForceLink crates
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
