//! Domain types and models

pub mod batch;
pub mod metadata;
pub mod sobject;

pub use batch::{
    CollectionResult, CreatedRecord, InsertMultipleRequest, InsertMultipleResponse, InsertResult,
    UpdateMultipleRequest,
};
pub use metadata::{SObjectDescription, SObjectField, SObjectMetaData, SObjectsListing};
pub use sobject::{DynamicSObject, SObject, SObjectAttributes, SObjectResponse};
