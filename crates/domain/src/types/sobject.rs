//! SObject capability and record wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ApiErrorEntry;

/// Capability every standard and custom object must expose.
///
/// Bulk and single-record operations are generic over this trait. The type
/// name drives schema lookup and homogeneity checks; the external id name
/// builds upsert and lookup URIs.
///
/// ```
/// use forcelink_domain::{SObject, SObjectAttributes};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct CustomObject {
///     #[serde(rename = "Name")]
///     name: String,
///     attributes: SObjectAttributes,
/// }
///
/// impl SObject for CustomObject {
///     fn api_name(&self) -> &str {
///         "CustomObject__c"
///     }
///
///     fn external_id_api_name(&self) -> &str {
///         "ExternalId__c"
///     }
/// }
///
/// let record = CustomObject {
///     name: "object 1".into(),
///     attributes: SObjectAttributes::with_reference_id("CustomObject__c", "1"),
/// };
/// assert_eq!(record.api_name(), "CustomObject__c");
/// ```
pub trait SObject {
    /// Schema type name (e.g. "Account", "CustomObject__c").
    fn api_name(&self) -> &str;

    /// Field used as the external identifier for upsert and lookup.
    fn external_id_api_name(&self) -> &str;
}

impl<T: SObject + ?Sized> SObject for &T {
    fn api_name(&self) -> &str {
        (**self).api_name()
    }

    fn external_id_api_name(&self) -> &str {
        (**self).external_id_api_name()
    }
}

impl<T: SObject + ?Sized> SObject for Box<T> {
    fn api_name(&self) -> &str {
        (**self).api_name()
    }

    fn external_id_api_name(&self) -> &str {
        (**self).external_id_api_name()
    }
}

/// `attributes` block carried by every record in composite requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectAttributes {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub sobject_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl SObjectAttributes {
    pub fn new(sobject_type: impl Into<String>) -> Self {
        Self { sobject_type: sobject_type.into(), ..Default::default() }
    }

    pub fn with_reference_id(sobject_type: impl Into<String>, reference_id: impl Into<String>) -> Self {
        Self {
            sobject_type: sobject_type.into(),
            reference_id: reference_id.into(),
            ..Default::default()
        }
    }
}

/// Schema-less record: an attributes block plus arbitrary JSON fields.
///
/// Useful for heterogeneous update batches where one static type per call
/// does not fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicSObject {
    pub attributes: SObjectAttributes,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    external_id_field: String,
}

impl DynamicSObject {
    pub fn new(sobject_type: impl Into<String>) -> Self {
        Self { attributes: SObjectAttributes::new(sobject_type), ..Default::default() }
    }

    #[must_use]
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.attributes.reference_id = reference_id.into();
        self
    }

    /// Set the system id (`id`) used by composite updates.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_field("id", Value::String(id.into()))
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_external_id_field(mut self, name: impl Into<String>) -> Self {
        self.external_id_field = name.into();
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").or_else(|| self.fields.get("Id")).and_then(Value::as_str)
    }
}

impl SObject for DynamicSObject {
    fn api_name(&self) -> &str {
        &self.attributes.sobject_type
    }

    fn external_id_api_name(&self) -> &str {
        if self.external_id_field.is_empty() {
            "Id"
        } else {
            &self.external_id_field
        }
    }
}

/// Response received after a single-record insert or upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SObjectResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
    #[serde(default)]
    pub success: bool,
    /// Present on upsert: whether the record was created rather than updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
}
