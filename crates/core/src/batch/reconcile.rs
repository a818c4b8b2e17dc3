//! Reconciliation of per-record batch results
//!
//! Results are matched to their inputs by id or reference id, never by
//! position: the server does not promise to answer in request order.

use std::collections::HashMap;

use forcelink_domain::{
    BatchFailure, BatchOperation, CollectionResult, CreatedRecord, ForceError, InsertMultipleResponse,
    InsertResult, RecordFailure, Result,
};
use serde_json::Value;

/// Key used for a failed record the server returned without an id.
pub const UNKNOWN_RECORD_KEY: &str = "<unknown>";

/// Failures of one composite tree response, or `None` if it succeeded.
///
/// When `hasErrors` is set the whole batch is considered failed and every
/// reference id in the result list is reported.
pub fn insert_failures(response: &InsertMultipleResponse, batch: usize) -> Option<Vec<RecordFailure>> {
    if !response.has_errors {
        return None;
    }

    Some(
        response
            .results
            .iter()
            .map(|result| RecordFailure {
                key: result.reference_id.clone(),
                batch,
                errors: result.errors.clone(),
            })
            .collect(),
    )
}

/// Failed entries of one collection (update/delete) response.
pub fn collection_failures(results: &[CollectionResult], batch: usize) -> Vec<RecordFailure> {
    results
        .iter()
        .filter(|result| !result.success)
        .map(|result| RecordFailure {
            key: result
                .id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| UNKNOWN_RECORD_KEY.to_string()),
            batch,
            errors: result.errors.clone(),
        })
        .collect()
}

/// Map each submitted reference id to its position in the caller's input.
///
/// `records` is the serialized batch; `offset` is the input index of its
/// first record. Records without `attributes.referenceId` are skipped.
pub fn reference_index(records: &[Value], offset: usize) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            record
                .pointer("/attributes/referenceId")
                .and_then(Value::as_str)
                .filter(|reference| !reference.is_empty())
                .map(|reference| (reference.to_string(), offset + i))
        })
        .collect()
}

/// Pair created ids with the input records that produced them.
pub fn correlate_created(results: &[InsertResult], index: &HashMap<String, usize>) -> Vec<CreatedRecord> {
    results
        .iter()
        .map(|result| CreatedRecord {
            reference_id: result.reference_id.clone(),
            id: result.id.clone(),
            input_index: index.get(&result.reference_id).copied(),
        })
        .collect()
}

/// Cross-batch failure accumulator for the continue-on-failure drivers.
#[derive(Debug)]
pub struct FailureAccumulator {
    operation: BatchOperation,
    batches_attempted: usize,
    failures: Vec<RecordFailure>,
}

impl FailureAccumulator {
    pub fn new(operation: BatchOperation) -> Self {
        Self { operation, batches_attempted: 0, failures: Vec::new() }
    }

    /// Record one batch's results; returns how many records failed in it.
    pub fn record(&mut self, batch: usize, results: &[CollectionResult]) -> usize {
        self.batches_attempted += 1;
        let failures = collection_failures(results, batch);
        let count = failures.len();
        self.failures.extend(failures);
        count
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// `Ok(())` if nothing failed, otherwise one aggregated error.
    ///
    /// # Errors
    /// `ForceError::Batch` carrying every recorded failure.
    pub fn finish(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ForceError::Batch(BatchFailure::new(self.operation, self.batches_attempted, self.failures)))
        }
    }
}

#[cfg(test)]
mod tests {
    use forcelink_domain::ApiErrorEntry;
    use serde_json::json;

    use super::*;

    fn ok(id: &str) -> CollectionResult {
        CollectionResult { id: Some(id.into()), success: true, errors: vec![] }
    }

    fn failed(id: Option<&str>, code: &str) -> CollectionResult {
        CollectionResult {
            id: id.map(str::to_string),
            success: false,
            errors: vec![ApiErrorEntry { status_code: code.into(), message: String::new(), fields: vec![] }],
        }
    }

    #[test]
    fn successful_insert_has_no_failures() {
        let response = InsertMultipleResponse {
            has_errors: false,
            results: vec![InsertResult { id: "001".into(), reference_id: "r1".into(), errors: vec![] }],
        };
        assert!(insert_failures(&response, 0).is_none());
    }

    #[test]
    fn failed_insert_reports_every_reference_id() {
        let response = InsertMultipleResponse {
            has_errors: true,
            results: vec![
                InsertResult { id: String::new(), reference_id: "r7".into(), errors: vec![] },
                InsertResult { id: String::new(), reference_id: "r9".into(), errors: vec![] },
            ],
        };

        let failures = insert_failures(&response, 3).unwrap();
        let keys: Vec<&str> = failures.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["r7", "r9"]);
        assert!(failures.iter().all(|f| f.batch == 3));
    }

    #[test]
    fn collection_failures_skip_successes_and_label_missing_ids() {
        let results = vec![ok("001A"), failed(Some("001B"), "ENTITY_IS_DELETED"), failed(None, "MALFORMED_ID")];
        let failures = collection_failures(&results, 0);

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].key, "001B");
        assert_eq!(failures[1].key, UNKNOWN_RECORD_KEY);
    }

    #[test]
    fn correlation_uses_reference_ids_not_positions() {
        let submitted = vec![
            json!({"attributes": {"type": "X", "referenceId": "r1"}}),
            json!({"attributes": {"type": "X", "referenceId": "r2"}}),
            json!({"attributes": {"type": "X"}}),
        ];
        let index = reference_index(&submitted, 200);

        // Server answers out of order.
        let results = vec![
            InsertResult { id: "002".into(), reference_id: "r2".into(), errors: vec![] },
            InsertResult { id: "001".into(), reference_id: "r1".into(), errors: vec![] },
        ];
        let created = correlate_created(&results, &index);

        assert_eq!(created[0].input_index, Some(201));
        assert_eq!(created[1].input_index, Some(200));
        assert_eq!(created[1].id, "001");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn accumulator_collects_across_batches() {
        let mut acc = FailureAccumulator::new(BatchOperation::Update);
        assert_eq!(acc.record(0, &[failed(Some("001A"), "X")]), 1);
        assert_eq!(acc.record(1, &[ok("001B")]), 0);
        assert_eq!(acc.record(2, &[failed(Some("001C"), "Y")]), 1);
        assert_eq!(acc.failure_count(), 2);

        let err = acc.finish().unwrap_err();
        let failure = err.batch_failure().unwrap();
        assert_eq!(failure.keys(), vec!["001A", "001C"]);
        assert_eq!(failure.batches_attempted, 3);
    }

    #[test]
    fn accumulator_without_failures_succeeds() {
        let mut acc = FailureAccumulator::new(BatchOperation::Delete);
        acc.record(0, &[ok("001A")]);
        assert!(acc.finish().is_ok());
    }
}
