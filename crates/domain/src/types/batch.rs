//! Wire envelopes for the composite bulk endpoints

use serde::{Deserialize, Serialize};

use crate::errors::ApiErrorEntry;

/// Body of `POST .../composite/tree/<type>`.
#[derive(Debug, Serialize)]
pub struct InsertMultipleRequest<'a, T> {
    pub records: &'a [T],
}

/// Body of `PATCH .../composite/sobjects`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMultipleRequest<'a, T> {
    pub all_or_none: bool,
    pub records: &'a [T],
}

/// Response of the composite tree insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertMultipleResponse {
    pub has_errors: bool,
    #[serde(default)]
    pub results: Vec<InsertResult>,
}

/// One entry of a composite tree response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    #[serde(default)]
    pub id: String,
    pub reference_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorEntry>,
}

/// One entry of a composite sobjects collection response (update/delete).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

/// A record created by a bulk insert, matched back to its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub reference_id: String,
    pub id: String,
    /// Position of the originating record in the caller's input, when its
    /// reference id was found among the submitted records.
    pub input_index: Option<usize>,
}
