use voyage_core::models::{Pack, PackUpsert};
use voyage_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Travel pack CRUD. Packs reference their images by URL, so there are no
/// upload endpoints.
#[derive(Debug, Clone)]
pub struct PackService {
    api: ApiClient,
}

impl PackService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Pack>, ApiError> {
        self.api.get_data_or_default("/packs").await
    }

    pub async fn get(&self, id: DbId) -> Result<Pack, ApiError> {
        self.api.get_data(&format!("/packs/{id}")).await
    }

    pub async fn create(&self, payload: &PackUpsert) -> Result<Pack, ApiError> {
        self.api.post_data("/packs", payload).await
    }

    pub async fn update(&self, id: DbId, payload: &PackUpsert) -> Result<Pack, ApiError> {
        self.api.put_data(&format!("/packs/{id}"), payload).await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ApiError> {
        self.api.delete(&format!("/packs/{id}")).await
    }
}
