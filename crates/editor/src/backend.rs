//! The editor's view of a resource endpoint.
//!
//! [`EntityBackend`] is the seam between the editor pipeline and HTTP. The
//! client services implement it below; tests substitute a recording fake.

use async_trait::async_trait;
use voyage_client::services::{DestinationService, HotelService, PackService, ProfileService};
use voyage_client::{ApiError, LocalFile};
use voyage_core::drafts::{DestinationDraft, Draft, HotelDraft, PackDraft};
use voyage_core::models::{AdminProfile, Destination, Hotel, Pack, ProfileUpdate};
use voyage_core::types::DbId;

/// Server representation edited through `B`.
pub type EntityOf<B> = <<B as EntityBackend>::Draft as Draft>::Entity;
/// Create/update body sent by `B`.
pub type PayloadOf<B> = <<B as EntityBackend>::Draft as Draft>::Payload;

#[async_trait]
pub trait EntityBackend: Send + Sync {
    type Draft: Draft;

    async fn fetch(&self, id: DbId) -> Result<EntityOf<Self>, ApiError>;

    async fn create(&self, payload: &PayloadOf<Self>) -> Result<EntityOf<Self>, ApiError>;

    async fn update(&self, id: DbId, payload: &PayloadOf<Self>)
        -> Result<EntityOf<Self>, ApiError>;

    /// Upload primary images in one request.
    async fn upload_images(
        &self,
        _id: DbId,
        _files: &[LocalFile],
    ) -> Result<EntityOf<Self>, ApiError> {
        Err(ApiError::Unsupported("image upload"))
    }

    async fn delete_image(&self, _id: DbId, _index: usize) -> Result<EntityOf<Self>, ApiError> {
        Err(ApiError::Unsupported("image delete"))
    }

    async fn upload_item_image(
        &self,
        _id: DbId,
        _item_id: DbId,
        _file: &LocalFile,
    ) -> Result<EntityOf<Self>, ApiError> {
        Err(ApiError::Unsupported("sub-item image upload"))
    }

    async fn delete_item_image(
        &self,
        _id: DbId,
        _item_id: DbId,
    ) -> Result<EntityOf<Self>, ApiError> {
        Err(ApiError::Unsupported("sub-item image delete"))
    }
}

#[async_trait]
impl EntityBackend for HotelService {
    type Draft = HotelDraft;

    async fn fetch(&self, id: DbId) -> Result<Hotel, ApiError> {
        self.get(id).await
    }

    async fn create(&self, payload: &PayloadOf<Self>) -> Result<Hotel, ApiError> {
        HotelService::create(self, payload).await
    }

    async fn update(&self, id: DbId, payload: &PayloadOf<Self>) -> Result<Hotel, ApiError> {
        HotelService::update(self, id, payload).await
    }

    async fn upload_images(&self, id: DbId, files: &[LocalFile]) -> Result<Hotel, ApiError> {
        HotelService::upload_images(self, id, files).await
    }

    async fn delete_image(&self, id: DbId, index: usize) -> Result<Hotel, ApiError> {
        HotelService::delete_image(self, id, index).await
    }

    async fn upload_item_image(
        &self,
        id: DbId,
        room_id: DbId,
        file: &LocalFile,
    ) -> Result<Hotel, ApiError> {
        self.upload_room_image(id, room_id, file).await
    }

    async fn delete_item_image(&self, id: DbId, room_id: DbId) -> Result<Hotel, ApiError> {
        self.delete_room_image(id, room_id).await
    }
}

#[async_trait]
impl EntityBackend for DestinationService {
    type Draft = DestinationDraft;

    async fn fetch(&self, id: DbId) -> Result<Destination, ApiError> {
        self.get(id).await
    }

    async fn create(&self, payload: &PayloadOf<Self>) -> Result<Destination, ApiError> {
        DestinationService::create(self, payload).await
    }

    async fn update(&self, id: DbId, payload: &PayloadOf<Self>) -> Result<Destination, ApiError> {
        DestinationService::update(self, id, payload).await
    }

    async fn upload_images(&self, id: DbId, files: &[LocalFile]) -> Result<Destination, ApiError> {
        DestinationService::upload_images(self, id, files).await
    }

    async fn delete_image(&self, id: DbId, index: usize) -> Result<Destination, ApiError> {
        DestinationService::delete_image(self, id, index).await
    }
}

#[async_trait]
impl EntityBackend for PackService {
    type Draft = PackDraft;

    async fn fetch(&self, id: DbId) -> Result<Pack, ApiError> {
        self.get(id).await
    }

    async fn create(&self, payload: &PayloadOf<Self>) -> Result<Pack, ApiError> {
        PackService::create(self, payload).await
    }

    async fn update(&self, id: DbId, payload: &PayloadOf<Self>) -> Result<Pack, ApiError> {
        PackService::update(self, id, payload).await
    }
}

/// Seam for the profile editor.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    async fn fetch(&self) -> Result<AdminProfile, ApiError>;

    async fn update(&self, update: &ProfileUpdate) -> Result<AdminProfile, ApiError>;

    async fn upload_image(&self, file: &LocalFile) -> Result<AdminProfile, ApiError>;
}

#[async_trait]
impl ProfileBackend for ProfileService {
    async fn fetch(&self) -> Result<AdminProfile, ApiError> {
        self.get().await
    }

    async fn update(&self, update: &ProfileUpdate) -> Result<AdminProfile, ApiError> {
        ProfileService::update(self, update).await
    }

    async fn upload_image(&self, file: &LocalFile) -> Result<AdminProfile, ApiError> {
        ProfileService::upload_image(self, file).await
    }
}
