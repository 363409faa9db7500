//! Recording fakes for the editor backends.
//!
//! Each fake keeps the entity it would have stored, answers like the real
//! backend (server-assigned ids, image URLs), and records every call so
//! tests can assert exactly which requests a workflow issued.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Barrier;
use voyage_client::{ApiError, LocalFile};
use voyage_core::drafts::{DestinationDraft, HotelDraft, PackDraft};
use voyage_core::models::{
    AdminProfile, Destination, DestinationUpsert, Hotel, HotelUpsert, Pack, PackUpsert,
    ProfileUpdate, Room,
};
use voyage_core::types::DbId;
use voyage_editor::{EntityBackend, ProfileBackend};

pub const NEW_HOTEL_ID: DbId = 100;
pub const NEW_DESTINATION_ID: DbId = 200;
pub const NEW_PACK_ID: DbId = 300;
/// Rooms created by the fake are numbered from here.
pub const FIRST_ROOM_ID: DbId = 501;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch(DbId),
    Create(serde_json::Value),
    Update(DbId, serde_json::Value),
    UploadImages { id: DbId, files: Vec<String> },
    DeleteImage { id: DbId, index: usize },
    UploadItemImage { id: DbId, item_id: DbId, file: String },
    DeleteItemImage { id: DbId, item_id: DbId },
    FetchProfile,
    UpdateProfile(serde_json::Value),
    UploadProfileImage(String),
}

impl Call {
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            Call::UploadImages { .. } | Call::UploadItemImage { .. } | Call::UploadProfileImage(_)
        )
    }
}

/// Failures to inject.
#[derive(Debug, Default, Clone)]
pub struct Faults {
    /// Status returned by every fetch.
    pub fetch_status: Option<u16>,
    /// Fail create and update.
    pub save: bool,
    pub primary_upload: bool,
    /// Sub-item ids whose upload fails.
    pub item_uploads: Vec<DbId>,
    /// Answer a create without an id.
    pub create_without_id: bool,
    /// Fail image and sub-item image deletes.
    pub delete: bool,
    /// Every sub-item upload waits here until the whole batch has arrived.
    pub item_upload_gate: Option<Arc<Barrier>>,
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Api {
        status: 503,
        message: message.to_string(),
    }
}

fn not_found() -> ApiError {
    ApiError::Api {
        status: 404,
        message: "Not found".into(),
    }
}

pub fn image(name: &str) -> LocalFile {
    LocalFile::new(name, "image/jpeg", name.as_bytes().to_vec())
}

fn payload_json<T: serde::Serialize>(payload: &T) -> serde_json::Value {
    serde_json::to_value(payload).unwrap()
}

#[derive(Debug)]
struct Shared<E> {
    stored: Option<E>,
    calls: Vec<Call>,
    faults: Faults,
    next_room: DbId,
}

impl<E> Default for Shared<E> {
    fn default() -> Self {
        Self {
            stored: None,
            calls: Vec::new(),
            faults: Faults::default(),
            next_room: FIRST_ROOM_ID,
        }
    }
}

/// State handle shared between a test and the fake it hands to an editor.
#[derive(Debug)]
pub struct Fake<E> {
    inner: Arc<Mutex<Shared<E>>>,
}

impl<E> Clone for Fake<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Default for Fake<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared::default())),
        }
    }
}

impl<E: Clone> Fake<E> {
    pub fn with(entity: E) -> Self {
        let fake = Self::default();
        fake.lock().stored = Some(entity);
        fake
    }

    fn lock(&self) -> MutexGuard<'_, Shared<E>> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn upload_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_upload).collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn faults(&self, change: impl FnOnce(&mut Faults)) {
        change(&mut self.lock().faults);
    }

    pub fn stored(&self) -> Option<E> {
        self.lock().stored.clone()
    }

    fn fetch_stored(&self, id: DbId) -> Result<E, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Fetch(id));
        if let Some(status) = shared.faults.fetch_status {
            return Err(ApiError::Api {
                status,
                message: "Backend unavailable".into(),
            });
        }
        shared.stored.clone().ok_or_else(not_found)
    }
}

// ---------------------------------------------------------------------------
// Hotels
// ---------------------------------------------------------------------------

pub type FakeHotels = Fake<Hotel>;

pub fn hotel_with_rooms(id: DbId, room_ids: &[DbId], images: usize) -> Hotel {
    Hotel {
        id: Some(id),
        name: "Sea View".into(),
        images: (0..images).map(|i| format!("/uploads/hotels/{i}.jpg")).collect(),
        rooms: room_ids
            .iter()
            .map(|room_id| Room {
                id: Some(*room_id),
                name: format!("Room {room_id}"),
                image: None,
                description: None,
                capacity: 2,
                price: 80.0,
            })
            .collect(),
        ..Default::default()
    }
}

fn apply_hotel(shared: &mut Shared<Hotel>, id: Option<DbId>, payload: &HotelUpsert) -> Hotel {
    let previous = shared.stored.take().unwrap_or_default();
    let mut rooms = Vec::with_capacity(payload.rooms.len());
    for room in &payload.rooms {
        let mut room = room.clone();
        if room.id.is_none() {
            room.id = Some(shared.next_room);
            shared.next_room += 1;
        }
        room.image = previous
            .rooms
            .iter()
            .find(|r| r.id == room.id)
            .and_then(|r| r.image.clone());
        rooms.push(room);
    }
    let hotel = Hotel {
        id,
        name: payload.name.clone(),
        images: previous.images,
        rooms,
        nearby: payload.nearby.clone(),
        faq: payload.faq.clone(),
        programme: payload.programme.clone(),
        highlights: payload.highlights.clone(),
        ..Default::default()
    };
    shared.stored = Some(Hotel {
        id: id.or(Some(NEW_HOTEL_ID)),
        ..hotel.clone()
    });
    hotel
}

#[async_trait]
impl EntityBackend for FakeHotels {
    type Draft = HotelDraft;

    async fn fetch(&self, id: DbId) -> Result<Hotel, ApiError> {
        self.fetch_stored(id)
    }

    async fn create(&self, payload: &HotelUpsert) -> Result<Hotel, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Create(payload_json(payload)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        let id = (!shared.faults.create_without_id).then_some(NEW_HOTEL_ID);
        Ok(apply_hotel(&mut shared, id, payload))
    }

    async fn update(&self, id: DbId, payload: &HotelUpsert) -> Result<Hotel, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Update(id, payload_json(payload)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        Ok(apply_hotel(&mut shared, Some(id), payload))
    }

    async fn upload_images(&self, id: DbId, files: &[LocalFile]) -> Result<Hotel, ApiError> {
        let mut shared = self.lock();
        let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        shared.calls.push(Call::UploadImages {
            id,
            files: names.clone(),
        });
        if shared.faults.primary_upload {
            return Err(server_error("Storage full"));
        }
        let hotel = shared.stored.as_mut().ok_or_else(not_found)?;
        // Hotels keep a single cover image.
        hotel.images = names.iter().map(|n| format!("/uploads/hotels/{n}")).collect();
        Ok(hotel.clone())
    }

    async fn delete_image(&self, id: DbId, index: usize) -> Result<Hotel, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::DeleteImage { id, index });
        if shared.faults.delete {
            return Err(server_error("Disk full"));
        }
        let hotel = shared.stored.as_mut().ok_or_else(not_found)?;
        hotel.images.remove(index);
        Ok(hotel.clone())
    }

    async fn upload_item_image(
        &self,
        id: DbId,
        item_id: DbId,
        file: &LocalFile,
    ) -> Result<Hotel, ApiError> {
        let gate = self.lock().faults.item_upload_gate.clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        let mut shared = self.lock();
        shared.calls.push(Call::UploadItemImage {
            id,
            item_id,
            file: file.file_name.clone(),
        });
        if shared.faults.item_uploads.contains(&item_id) {
            return Err(server_error("Upload rejected"));
        }
        let hotel = shared.stored.as_mut().ok_or_else(not_found)?;
        let room = hotel
            .rooms
            .iter_mut()
            .find(|r| r.id == Some(item_id))
            .ok_or_else(not_found)?;
        room.image = Some(format!("/uploads/rooms/{}", file.file_name));
        Ok(hotel.clone())
    }

    async fn delete_item_image(&self, id: DbId, item_id: DbId) -> Result<Hotel, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::DeleteItemImage { id, item_id });
        if shared.faults.delete {
            return Err(server_error("Disk full"));
        }
        let hotel = shared.stored.as_mut().ok_or_else(not_found)?;
        if let Some(room) = hotel.rooms.iter_mut().find(|r| r.id == Some(item_id)) {
            room.image = None;
        }
        Ok(hotel.clone())
    }
}

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

pub type FakeDestinations = Fake<Destination>;

pub fn destination_with_images(id: DbId, images: usize) -> Destination {
    Destination {
        id: Some(id),
        name: "Djerba".into(),
        country: "Tunisia".into(),
        price: 450.0,
        days: 5,
        images: (0..images).map(|i| format!("/uploads/destinations/{i}.jpg")).collect(),
        ..Default::default()
    }
}

fn apply_destination(
    shared: &mut Shared<Destination>,
    id: DbId,
    payload: &DestinationUpsert,
) -> Destination {
    let previous = shared.stored.take().unwrap_or_default();
    let destination = Destination {
        id: Some(id),
        name: payload.name.clone(),
        country: payload.country.clone(),
        price: payload.price,
        days: payload.days,
        available_from: payload.available_from,
        available_to: payload.available_to,
        activities: payload.activities.clone(),
        faq: payload.faq.clone(),
        nearby: payload.nearby.clone(),
        images: previous.images,
        reviews: previous.reviews,
        ..Default::default()
    };
    shared.stored = Some(destination.clone());
    destination
}

#[async_trait]
impl EntityBackend for FakeDestinations {
    type Draft = DestinationDraft;

    async fn fetch(&self, id: DbId) -> Result<Destination, ApiError> {
        self.fetch_stored(id)
    }

    async fn create(&self, payload: &DestinationUpsert) -> Result<Destination, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Create(payload_json(payload)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        Ok(apply_destination(&mut shared, NEW_DESTINATION_ID, payload))
    }

    async fn update(&self, id: DbId, payload: &DestinationUpsert) -> Result<Destination, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Update(id, payload_json(payload)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        Ok(apply_destination(&mut shared, id, payload))
    }

    async fn upload_images(&self, id: DbId, files: &[LocalFile]) -> Result<Destination, ApiError> {
        let mut shared = self.lock();
        let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        shared.calls.push(Call::UploadImages {
            id,
            files: names.clone(),
        });
        if shared.faults.primary_upload {
            return Err(server_error("Storage full"));
        }
        let destination = shared.stored.as_mut().ok_or_else(not_found)?;
        destination
            .images
            .extend(names.iter().map(|n| format!("/uploads/destinations/{n}")));
        Ok(destination.clone())
    }

    async fn delete_image(&self, id: DbId, index: usize) -> Result<Destination, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::DeleteImage { id, index });
        if shared.faults.delete {
            return Err(server_error("Disk full"));
        }
        let destination = shared.stored.as_mut().ok_or_else(not_found)?;
        destination.images.remove(index);
        Ok(destination.clone())
    }
}

// ---------------------------------------------------------------------------
// Packs
// ---------------------------------------------------------------------------

pub type FakePacks = Fake<Pack>;

#[async_trait]
impl EntityBackend for FakePacks {
    type Draft = PackDraft;

    async fn fetch(&self, id: DbId) -> Result<Pack, ApiError> {
        self.fetch_stored(id)
    }

    async fn create(&self, payload: &PackUpsert) -> Result<Pack, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Create(payload_json(payload)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        let pack = Pack {
            id: Some(NEW_PACK_ID),
            name: payload.name.clone(),
            country: payload.country.clone(),
            price: payload.price,
            days: payload.days,
            images: payload.images.clone(),
            activities: payload.activities.clone(),
            faq: payload.faq.clone(),
            ..Default::default()
        };
        shared.stored = Some(pack.clone());
        Ok(pack)
    }

    async fn update(&self, id: DbId, payload: &PackUpsert) -> Result<Pack, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Update(id, payload_json(payload)));
        let pack = shared.stored.as_mut().ok_or_else(not_found)?;
        pack.name = payload.name.clone();
        pack.country = payload.country.clone();
        Ok(pack.clone())
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

pub type FakeProfile = Fake<AdminProfile>;

pub fn admin_profile() -> AdminProfile {
    AdminProfile {
        id: 1,
        name: "Sam Admin".into(),
        email: "admin@voyage.test".into(),
        role: "ROLE_ADMIN".into(),
        country: Some("Tunisia".into()),
        city_state: None,
        postal_code: None,
        image_url: None,
    }
}

#[async_trait]
impl ProfileBackend for FakeProfile {
    async fn fetch(&self) -> Result<AdminProfile, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::FetchProfile);
        shared.stored.clone().ok_or_else(not_found)
    }

    async fn update(&self, update: &ProfileUpdate) -> Result<AdminProfile, ApiError> {
        let mut shared = self.lock();
        shared.calls.push(Call::UpdateProfile(payload_json(update)));
        if shared.faults.save {
            return Err(server_error("Database unavailable"));
        }
        let profile = shared.stored.as_mut().ok_or_else(not_found)?;
        profile.name = update.name.clone();
        profile.country = update.country.clone().or(profile.country.take());
        profile.city_state = update.city_state.clone().or(profile.city_state.take());
        profile.postal_code = update.postal_code.clone().or(profile.postal_code.take());
        Ok(profile.clone())
    }

    async fn upload_image(&self, file: &LocalFile) -> Result<AdminProfile, ApiError> {
        let mut shared = self.lock();
        shared
            .calls
            .push(Call::UploadProfileImage(file.file_name.clone()));
        if shared.faults.primary_upload {
            return Err(server_error("Storage full"));
        }
        let profile = shared.stored.as_mut().ok_or_else(not_found)?;
        profile.image_url = Some(format!("/uploads/admins/{}", file.file_name));
        Ok(profile.clone())
    }
}
