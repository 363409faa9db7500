//! Hotel CRUD and image endpoints.

use reqwest::multipart::Form;
use voyage_core::models::{Hotel, HotelUpsert};
use voyage_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::files::LocalFile;

#[derive(Debug, Clone)]
pub struct HotelService {
    api: ApiClient,
}

impl HotelService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Hotel>, ApiError> {
        self.api.get_data_or_default("/hotels").await
    }

    pub async fn get(&self, id: DbId) -> Result<Hotel, ApiError> {
        self.api.get_data(&format!("/hotels/{id}")).await
    }

    pub async fn create(&self, payload: &HotelUpsert) -> Result<Hotel, ApiError> {
        self.api.post_data("/hotels", payload).await
    }

    pub async fn update(&self, id: DbId, payload: &HotelUpsert) -> Result<Hotel, ApiError> {
        self.api.put_data(&format!("/hotels/{id}"), payload).await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), ApiError> {
        self.api.delete(&format!("/hotels/{id}")).await
    }

    /// Append images to the gallery (repeated multipart field `files`).
    pub async fn upload_images(&self, id: DbId, files: &[LocalFile]) -> Result<Hotel, ApiError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.to_part()?);
        }
        self.api
            .post_multipart_data(&format!("/hotels/{id}/images"), form)
            .await
    }

    /// Remove the gallery image at `index`.
    pub async fn delete_image(&self, id: DbId, index: usize) -> Result<Hotel, ApiError> {
        self.api
            .delete_data(&format!("/hotels/{id}/images/{index}"))
            .await
    }

    /// Set a room's image (multipart field `file`).
    pub async fn upload_room_image(
        &self,
        id: DbId,
        room_id: DbId,
        file: &LocalFile,
    ) -> Result<Hotel, ApiError> {
        let form = Form::new().part("file", file.to_part()?);
        self.api
            .post_multipart_data(&format!("/hotels/{id}/rooms/{room_id}/image"), form)
            .await
    }

    pub async fn delete_room_image(&self, id: DbId, room_id: DbId) -> Result<Hotel, ApiError> {
        self.api
            .delete_data(&format!("/hotels/{id}/rooms/{room_id}/image"))
            .await
    }
}
