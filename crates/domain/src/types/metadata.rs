//! Schema metadata returned by the discovery and describe endpoints

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::LOCATION_FIELD_TYPE;

/// Entry of the global sobjects listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectMetaData {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub queryable: bool,
    /// URL templates keyed by `sobject`, `describe`, `rowTemplate`, ...
    #[serde(default)]
    pub urls: HashMap<String, String>,
}

impl SObjectMetaData {
    /// Metadata with the standard URL templates for `name` under `api_version`.
    pub fn with_standard_urls(name: impl Into<String>, api_version: &str) -> Self {
        let name = name.into();
        let base = format!("/services/data/{api_version}/sobjects/{name}");
        let urls = HashMap::from([
            ("sobject".to_string(), base.clone()),
            ("describe".to_string(), format!("{base}/describe")),
            ("rowTemplate".to_string(), format!("{base}/{{ID}}")),
        ]);
        Self { label: name.clone(), name, urls, ..Default::default() }
    }

    pub fn url(&self, key: &str) -> Option<&str> {
        self.urls.get(key).map(String::as_str)
    }
}

/// Body of `GET /services/data/<v>/sobjects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectsListing {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub max_batch_size: Option<u32>,
    pub sobjects: Vec<SObjectMetaData>,
}

/// One field of a describe result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub external_id: bool,
    #[serde(default)]
    pub length: u32,
}

/// Body of `GET <describe url>`, plus the derived `all_fields` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectDescription {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub fields: Vec<SObjectField>,
    #[serde(default)]
    pub urls: HashMap<String, String>,
    /// Comma separated names of every selectable field, for `SELECT *` style queries.
    #[serde(skip)]
    pub all_fields: String,
}

impl SObjectDescription {
    /// Fill `all_fields` from `fields`, skipping geolocation fields.
    pub fn compute_all_fields(&mut self) {
        self.all_fields = self
            .fields
            .iter()
            .filter(|field| field.field_type != LOCATION_FIELD_TYPE)
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: &str) -> SObjectField {
        SObjectField { name: name.into(), field_type: field_type.into(), ..Default::default() }
    }

    #[test]
    fn all_fields_skips_location_fields() {
        let mut description = SObjectDescription {
            name: "Account".into(),
            fields: vec![
                field("Location__c", "location"),
                field("Id", "id"),
                field("Name", "string"),
                field("Billing__c", "location"),
                field("Phone", "phone"),
            ],
            ..Default::default()
        };

        description.compute_all_fields();

        assert_eq!(description.all_fields, "Id, Name, Phone");
    }

    #[test]
    fn all_fields_empty_without_fields() {
        let mut description = SObjectDescription::default();
        description.compute_all_fields();
        assert!(description.all_fields.is_empty());
    }

    #[test]
    fn standard_urls_include_row_template() {
        let meta = SObjectMetaData::with_standard_urls("Account", "v45.0");
        assert_eq!(meta.url("rowTemplate"), Some("/services/data/v45.0/sobjects/Account/{ID}"));
        assert_eq!(meta.url("describe"), Some("/services/data/v45.0/sobjects/Account/describe"));
    }
}
