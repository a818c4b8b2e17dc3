//! Batched multi-record mutations
//!
//! Building blocks used by the bulk drivers in [`crate::service`]:
//! partitioning, pre-flight validation and result reconciliation.

pub mod partition;
pub mod reconcile;
pub mod validation;

pub use partition::{batch_count, partition};
pub use reconcile::{FailureAccumulator, UNKNOWN_RECORD_KEY};
pub use validation::{ensure_each_registered, ensure_homogeneous, ensure_registered};
