//! Client constants
//!
//! Server-imposed ceilings and URL template keys shared by every crate.

// Composite API ceilings (records or ids per request)
pub const SOBJECT_CREATE_BATCH_SIZE: usize = 200;
pub const SOBJECT_UPDATE_BATCH_SIZE: usize = 200;
pub const SOBJECT_DELETE_BATCH_SIZE: usize = 200;

// Keys into `SObjectMetaData::urls`
pub const SOBJECT_URL_KEY: &str = "sobject";
pub const DESCRIBE_URL_KEY: &str = "describe";
pub const ROW_TEMPLATE_URL_KEY: &str = "rowTemplate";

/// Placeholder substituted with the record id in `rowTemplate` URLs.
pub const ID_PLACEHOLDER: &str = "{ID}";

/// Field type that cannot be projected in a query.
pub const LOCATION_FIELD_TYPE: &str = "location";

pub const DEFAULT_API_VERSION: &str = "v45.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
