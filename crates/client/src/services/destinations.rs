//! Destination CRUD, search and gallery endpoints.

use reqwest::multipart::Form;
use voyage_core::models::{Destination, DestinationSearch, DestinationUpsert};
use voyage_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::files::LocalFile;

#[derive(Debug, Clone)]
pub struct DestinationService {
    api: ApiClient,
}

impl DestinationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Destination>, ApiError> {
        self.api.get_data_or_default("/destinations").await
    }

    pub async fn get(&self, id: DbId) -> Result<Destination, ApiError> {
        self.api.get_data(&format!("/destinations/{id}")).await
    }

    /// Unset filters are left out of the query string.
    pub async fn search(&self, filters: &DestinationSearch) -> Result<Vec<Destination>, ApiError> {
        self.api
            .get_data_with_query("/destinations/search", filters)
            .await
    }

    pub async fn create(&self, payload: &DestinationUpsert) -> Result<Destination, ApiError> {
        self.api.post_data("/destinations", payload).await
    }

    pub async fn update(
        &self,
        id: DbId,
        payload: &DestinationUpsert,
    ) -> Result<Destination, ApiError> {
        self.api
            .put_data(&format!("/destinations/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ApiError> {
        self.api.delete(&format!("/destinations/{id}")).await
    }

    pub async fn upload_images(
        &self,
        id: DbId,
        files: &[LocalFile],
    ) -> Result<Destination, ApiError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.to_part()?);
        }
        self.api
            .post_multipart_data(&format!("/destinations/{id}/images"), form)
            .await
    }

    pub async fn delete_image(&self, id: DbId, index: usize) -> Result<Destination, ApiError> {
        self.api
            .delete_data(&format!("/destinations/{id}/images/{index}"))
            .await
    }
}
