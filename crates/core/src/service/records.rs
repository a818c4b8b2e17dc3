//! Single-record CRUD pass-through
//!
//! URIs come from the schema registry; transport errors are returned as-is.

use forcelink_domain::constants::SOBJECT_URL_KEY;
use forcelink_domain::{Result, SObject, SObjectResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::SObjectService;
use crate::ports::{decode, encode};

fn field_params(fields: &[&str]) -> Vec<(String, String)> {
    if fields.is_empty() {
        Vec::new()
    } else {
        vec![("fields".to_string(), fields.join(","))]
    }
}

/// Upserts that update an existing record answer 204 with no body.
fn decode_response(value: Value) -> Result<SObjectResponse> {
    if value.is_null() {
        return Ok(SObjectResponse { success: true, created: Some(false), ..Default::default() });
    }
    decode(value)
}

impl SObjectService {
    /// Fetch record `id` into `out`, optionally restricted to `fields`.
    ///
    /// The type is taken from `out`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport or decode error.
    #[instrument(skip(self, out), fields(so_type = out.api_name()))]
    pub async fn get_sobject<T>(&self, id: &str, fields: &[&str], out: &mut T) -> Result<()>
    where
        T: SObject + DeserializeOwned,
    {
        let uri = self.registry.row_url(out.api_name(), id).await?;
        let value = self.transport.get(&uri, &field_params(fields)).await?;
        *out = decode(value)?;
        Ok(())
    }

    /// Create one record.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport or decode error.
    #[instrument(skip(self, record), fields(so_type = record.api_name()))]
    pub async fn insert_sobject<T>(&self, record: &T) -> Result<SObjectResponse>
    where
        T: SObject + Serialize + Sync,
    {
        let uri = self.registry.url(record.api_name(), SOBJECT_URL_KEY).await?;
        let value = self.transport.post(&uri, &[], encode(record)?).await?;
        decode(value)
    }

    /// Update record `id` with the fields of `record`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport error.
    #[instrument(skip(self, record), fields(so_type = record.api_name()))]
    pub async fn update_sobject<T>(&self, id: &str, record: &T) -> Result<()>
    where
        T: SObject + Serialize + Sync,
    {
        let uri = self.registry.row_url(record.api_name(), id).await?;
        self.transport.patch(&uri, &[], encode(record)?).await?;
        Ok(())
    }

    /// Delete record `id` of `record`'s type.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport error.
    #[instrument(skip(self, record), fields(so_type = record.api_name()))]
    pub async fn delete_sobject<T>(&self, id: &str, record: &T) -> Result<()>
    where
        T: SObject + Sync + ?Sized,
    {
        let uri = self.registry.row_url(record.api_name(), id).await?;
        self.transport.delete(&uri, &[]).await
    }

    /// Fetch the record whose external id field equals `id` into `out`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport or decode error.
    #[instrument(skip(self, out), fields(so_type = out.api_name()))]
    pub async fn get_sobject_by_external_id<T>(&self, id: &str, fields: &[&str], out: &mut T) -> Result<()>
    where
        T: SObject + DeserializeOwned,
    {
        let uri = self.registry.external_id_url(out.api_name(), out.external_id_api_name(), id).await?;
        let value = self.transport.get(&uri, &field_params(fields)).await?;
        *out = decode(value)?;
        Ok(())
    }

    /// Create or update the record whose external id field equals `id`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport or decode error.
    #[instrument(skip(self, record), fields(so_type = record.api_name()))]
    pub async fn upsert_sobject_by_external_id<T>(&self, id: &str, record: &T) -> Result<SObjectResponse>
    where
        T: SObject + Serialize + Sync,
    {
        let uri =
            self.registry.external_id_url(record.api_name(), record.external_id_api_name(), id).await?;
        let value = self.transport.patch(&uri, &[], encode(record)?).await?;
        decode_response(value)
    }

    /// Delete the record whose external id field equals `id`.
    ///
    /// # Errors
    /// `ForceError::TypeNotFound` for unregistered types, otherwise the
    /// transport error.
    #[instrument(skip(self, record), fields(so_type = record.api_name()))]
    pub async fn delete_sobject_by_external_id<T>(&self, id: &str, record: &T) -> Result<()>
    where
        T: SObject + Sync + ?Sized,
    {
        let uri =
            self.registry.external_id_url(record.api_name(), record.external_id_api_name(), id).await?;
        self.transport.delete(&uri, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_params_join_with_commas() {
        assert!(field_params(&[]).is_empty());
        assert_eq!(
            field_params(&["Id", "Name"]),
            vec![("fields".to_string(), "Id,Name".to_string())]
        );
    }

    #[test]
    fn empty_upsert_response_means_updated() {
        let response = decode_response(Value::Null).unwrap();
        assert!(response.success);
        assert_eq!(response.created, Some(false));

        let created = decode_response(json!({"id": "001", "success": true, "errors": [], "created": true}))
            .unwrap();
        assert_eq!(created.id, "001");
        assert_eq!(created.created, Some(true));
    }
}
