//! Pre-flight checks run before any batch is dispatched

use forcelink_domain::{ForceError, Result, SObject};

use crate::schema::SObjectMap;

/// Ensure every record shares the first record's type name.
///
/// Returns the shared type name. The check is type-level: the error does
/// not point at a specific record.
///
/// # Errors
/// `ForceError::Validation` on an empty input or on mixed type names.
pub fn ensure_homogeneous<T: SObject>(records: &[T]) -> Result<&str> {
    let Some(first) = records.first() else {
        return Err(ForceError::Validation("at least one object is required".into()));
    };

    let so_type = first.api_name();
    if records.iter().any(|record| record.api_name() != so_type) {
        return Err(ForceError::Validation("all objects should have the same type (APIName)".into()));
    }

    Ok(so_type)
}

/// Ensure `api_name` is present in the registry.
///
/// # Errors
/// `ForceError::TypeNotFound` if it is not.
pub fn ensure_registered(sobjects: &SObjectMap, api_name: &str) -> Result<()> {
    if sobjects.contains_key(api_name) {
        Ok(())
    } else {
        Err(ForceError::TypeNotFound(api_name.to_string()))
    }
}

/// Ensure each record's own type is registered. Mixed types are allowed.
///
/// # Errors
/// `ForceError::TypeNotFound` naming the first unknown type.
pub fn ensure_each_registered<T: SObject>(sobjects: &SObjectMap, records: &[T]) -> Result<()> {
    records.iter().try_for_each(|record| ensure_registered(sobjects, record.api_name()))
}

#[cfg(test)]
mod tests {
    use forcelink_domain::{DynamicSObject, SObjectMetaData};

    use super::*;

    fn registry(names: &[&str]) -> SObjectMap {
        names
            .iter()
            .map(|name| (name.to_string(), SObjectMetaData::with_standard_urls(*name, "v45.0")))
            .collect()
    }

    #[test]
    fn homogeneous_records_return_shared_type() {
        let records = vec![DynamicSObject::new("Account"), DynamicSObject::new("Account")];
        assert_eq!(ensure_homogeneous(&records).unwrap(), "Account");
    }

    #[test]
    fn mixed_types_are_rejected() {
        let records = vec![DynamicSObject::new("Account"), DynamicSObject::new("Contact")];
        let err = ensure_homogeneous(&records).unwrap_err();
        assert_eq!(err, ForceError::Validation("all objects should have the same type (APIName)".into()));
    }

    #[test]
    fn empty_input_is_rejected() {
        let records: Vec<DynamicSObject> = Vec::new();
        assert!(ensure_homogeneous(&records).unwrap_err().is_validation());
    }

    #[test]
    fn unknown_type_is_reported() {
        let sobjects = registry(&["Account"]);
        assert!(ensure_registered(&sobjects, "Account").is_ok());
        assert_eq!(
            ensure_registered(&sobjects, "Widget__c").unwrap_err(),
            ForceError::TypeNotFound("Widget__c".into())
        );
    }

    #[test]
    fn weak_check_allows_mixed_registered_types() {
        let sobjects = registry(&["Account", "Contact"]);
        let mixed = vec![DynamicSObject::new("Account"), DynamicSObject::new("Contact")];
        assert!(ensure_each_registered(&sobjects, &mixed).is_ok());

        let with_unknown = vec![DynamicSObject::new("Account"), DynamicSObject::new("Lead")];
        assert_eq!(
            ensure_each_registered(&sobjects, &with_unknown).unwrap_err(),
            ForceError::TypeNotFound("Lead".into())
        );
    }
}
