//! Contiguous, order-preserving batch partitioning

use std::slice::Chunks;

use forcelink_domain::{ForceError, Result};

/// Split `items` into slices of at most `max_batch_size`.
///
/// Every slice has exactly `max_batch_size` items except possibly the last.
/// Nothing is padded or dropped; an empty input yields no batches.
///
/// # Errors
/// Returns `ForceError::Config` if `max_batch_size` is zero.
pub fn partition<T>(items: &[T], max_batch_size: usize) -> Result<Chunks<'_, T>> {
    if max_batch_size == 0 {
        return Err(ForceError::Config("batch size must be greater than zero".into()));
    }
    Ok(items.chunks(max_batch_size))
}

/// Number of batches `partition` yields for `len` items.
pub fn batch_count(len: usize, max_batch_size: usize) -> usize {
    if max_batch_size == 0 {
        return 0;
    }
    len.div_ceil(max_batch_size)
}
