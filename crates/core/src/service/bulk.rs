//! Bulk insert, update and delete drivers
//!
//! Batches are sent one after another, in input order. Insert stops at the
//! first batch the server reports errors for; update and delete keep going
//! and return every failure once all batches were attempted. Transport
//! errors abort all three immediately.

use forcelink_domain::{
    BatchFailure, BatchOperation, CollectionResult, CreatedRecord, ForceError, InsertMultipleRequest,
    InsertMultipleResponse, Result, SObject, UpdateMultipleRequest,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{batch_transport, SObjectService};
use crate::batch::{self, reconcile, FailureAccumulator};
use crate::ports::{decode, encode};

impl SObjectService {
    /// Create records of one type in batches of at most `insert` records.
    ///
    /// Every record should carry an `attributes` block with its type and a
    /// reference id unique within the call. Requires API v45.0 or later.
    ///
    /// # Returns
    ///
    /// The created ids, each matched to its input position by reference id.
    /// Empty input returns immediately without any request.
    ///
    /// # Errors
    ///
    /// - `ForceError::Validation` if the records do not share one type
    /// - `ForceError::TypeNotFound` if that type is not registered
    /// - `ForceError::BatchTransport` if a batch request fails
    /// - `ForceError::Batch` naming the reference ids of the first batch the
    ///   server reported errors for; later batches are not sent
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn insert_multiple<T>(&self, records: &[T]) -> Result<Vec<CreatedRecord>>
    where
        T: SObject + Serialize + Sync,
    {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let so_type = batch::ensure_homogeneous(records)?;
        let sobjects = self.registry.sobjects().await?;
        batch::ensure_registered(&sobjects, so_type)?;

        let uri = self.tree_uri(so_type);
        let limit = self.limits.insert;
        let total = batch::batch_count(records.len(), limit);
        let mut created = Vec::with_capacity(records.len());

        for (batch_idx, chunk) in batch::partition(records, limit)?.enumerate() {
            let body = encode(&InsertMultipleRequest { records: chunk })?;
            let index = match body.get("records") {
                Some(Value::Array(submitted)) => reconcile::reference_index(submitted, batch_idx * limit),
                _ => Default::default(),
            };

            debug!(batch = batch_idx, total, size = chunk.len(), "Sending insert batch");
            let value = self.transport.post(&uri, &[], body).await.map_err(batch_transport("post", batch_idx))?;
            let response: InsertMultipleResponse = decode(value).map_err(batch_transport("post", batch_idx))?;

            if let Some(failures) = reconcile::insert_failures(&response, batch_idx) {
                warn!(batch = batch_idx, failed = failures.len(), "Insert batch reported errors, aborting");
                return Err(ForceError::Batch(BatchFailure::new(BatchOperation::Insert, batch_idx + 1, failures)));
            }

            created.extend(reconcile::correlate_created(&response.results, &index));
        }

        info!(so_type, created = created.len(), batches = total, "Bulk insert successful");
        Ok(created)
    }

    /// Update records, of any registered types, in batches of at most `update`.
    ///
    /// Every record needs its `id` and an `attributes` block with its type.
    /// `all_or_none` asks the server to roll back a whole batch when one of
    /// its records fails; it does not stop later batches from being sent.
    /// Requires API v43.0 or later.
    ///
    /// # Errors
    ///
    /// - `ForceError::TypeNotFound` for the first unregistered record type
    /// - `ForceError::BatchTransport` if a batch request fails
    /// - `ForceError::Batch` listing every failed id across all batches
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn update_multiple<T>(&self, records: &[T], all_or_none: bool) -> Result<()>
    where
        T: SObject + Serialize + Sync,
    {
        if records.is_empty() {
            return Ok(());
        }

        let sobjects = self.registry.sobjects().await?;
        batch::ensure_each_registered(&sobjects, records)?;

        let uri = self.collection_uri();
        let total = batch::batch_count(records.len(), self.limits.update);
        let mut outcome = FailureAccumulator::new(BatchOperation::Update);

        for (batch_idx, chunk) in batch::partition(records, self.limits.update)?.enumerate() {
            let body = encode(&UpdateMultipleRequest { all_or_none, records: chunk })?;

            debug!(batch = batch_idx, total, size = chunk.len(), "Sending update batch");
            let value = self.transport.patch(&uri, &[], body).await.map_err(batch_transport("patch", batch_idx))?;
            let results: Vec<CollectionResult> = decode(value).map_err(batch_transport("patch", batch_idx))?;

            let failed = outcome.record(batch_idx, &results);
            if failed > 0 {
                warn!(batch = batch_idx, failed, "Update batch reported failures");
            }
        }

        log_outcome(BatchOperation::Update, records.len(), total, outcome.failure_count());
        outcome.finish()
    }

    /// Delete records by id in batches of at most `delete` ids.
    ///
    /// `all_or_none` adds `allOrNone=true` to every batch request. Requires
    /// API v43.0 or later.
    ///
    /// # Errors
    ///
    /// - `ForceError::BatchTransport` if a batch request fails
    /// - `ForceError::Batch` listing every failed id across all batches
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_multiple<S>(&self, ids: &[S], all_or_none: bool) -> Result<()>
    where
        S: AsRef<str> + Sync,
    {
        if ids.is_empty() {
            return Ok(());
        }

        let uri = self.collection_uri();
        let total = batch::batch_count(ids.len(), self.limits.delete);
        let mut outcome = FailureAccumulator::new(BatchOperation::Delete);

        for (batch_idx, chunk) in batch::partition(ids, self.limits.delete)?.enumerate() {
            let joined = chunk.iter().map(|id| id.as_ref()).collect::<Vec<&str>>().join(",");
            let mut params = vec![("ids".to_string(), joined)];
            if all_or_none {
                params.push(("allOrNone".to_string(), "true".to_string()));
            }

            debug!(batch = batch_idx, total, size = chunk.len(), "Sending delete batch");
            let value = self
                .transport
                .delete_with_response(&uri, &params)
                .await
                .map_err(batch_transport("delete", batch_idx))?;
            let results: Vec<CollectionResult> = decode(value).map_err(batch_transport("delete", batch_idx))?;

            let failed = outcome.record(batch_idx, &results);
            if failed > 0 {
                warn!(batch = batch_idx, failed, "Delete batch reported failures");
            }
        }

        log_outcome(BatchOperation::Delete, ids.len(), total, outcome.failure_count());
        outcome.finish()
    }
}

fn log_outcome(operation: BatchOperation, count: usize, batches: usize, failed: usize) {
    if failed > 0 {
        warn!(%operation, count, batches, failed, "Bulk operation completed with errors");
    } else {
        info!(%operation, count, batches, "Bulk operation successful");
    }
}
