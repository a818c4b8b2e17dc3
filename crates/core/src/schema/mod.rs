//! Schema registry and describe cache

pub mod registry;

pub use registry::{SObjectMap, SchemaRegistry};
