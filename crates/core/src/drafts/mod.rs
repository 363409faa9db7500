//! Editable drafts of backend entities.
//!
//! A draft is the in-memory working copy an editor mutates before
//! submission. Drafts are built from a persisted entity by clearing and
//! repopulating every sub-list (never diffing), validated by a pure
//! function, and turned into an upsert payload that carries no binary
//! content.

pub mod destination;
pub mod hotel;
pub mod pack;
pub mod profile;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::FieldViolation;

pub use destination::DestinationDraft;
pub use hotel::{HotelDraft, RoomDraft};
pub use pack::PackDraft;
pub use profile::ProfileDraft;

/// How an entity's primary images are selected before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSelection {
    /// The entity has no primary image upload.
    None,
    /// One file; selecting again replaces the previous choice.
    Single,
    /// Any number of files; selecting again appends.
    Multiple,
}

/// Behaviour shared by every entity draft.
pub trait Draft: Clone + Default + Send + Sync + 'static {
    /// Server representation the draft is loaded from and saved into.
    type Entity: Clone + Send + Sync + 'static;
    /// Body of the create/update request.
    type Payload: Serialize + Send + Sync + 'static;

    /// Lowercase entity name for messages and logs.
    const ENTITY: &'static str;

    const PRIMARY_IMAGES: ImageSelection = ImageSelection::None;

    /// A fresh draft for a create screen.
    fn seeded() -> Self {
        Self::default()
    }

    /// Rebuild a draft from the persisted entity.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Every violation that would block submission. Empty means valid.
    fn validate(&self) -> Vec<FieldViolation>;

    fn to_payload(&self) -> Self::Payload;

    fn entity_id(entity: &Self::Entity) -> Option<DbId>;

    /// Size of the entity's positional image gallery.
    fn image_count(_entity: &Self::Entity) -> usize {
        0
    }

    /// Server ids of the sub-items that carry their own image, in list
    /// order. `None` for items the server has not seen yet.
    fn image_item_ids(&self) -> Vec<Option<DbId>> {
        Vec::new()
    }

    /// Same as [`image_item_ids`](Self::image_item_ids), read from a server
    /// response.
    fn entity_image_item_ids(_entity: &Self::Entity) -> Vec<Option<DbId>> {
        Vec::new()
    }

    /// Record server-assigned ids on the draft's image-carrying sub-items
    /// so a later resubmission updates them instead of creating copies.
    fn assign_image_item_ids(&mut self, _ids: &[Option<DbId>]) {}

    /// [`validate`](Self::validate) as a `Result`.
    fn ensure_valid(&self) -> Result<(), CoreError> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(violations))
        }
    }
}

/// Drafts with a sub-list whose items can each carry an uploaded image
/// (hotel rooms).
pub trait ImageItems: Draft {
    /// Sub-list name used in paths and logs.
    const ITEM_LIST: &'static str;

    fn image_item_count(&self) -> usize;

    fn push_image_item(&mut self);

    /// Remove the item at `index`. Returns `false` when out of range.
    fn remove_image_item(&mut self, index: usize) -> bool;
}

/// Remove `index` from an unordered sub-list.
pub(crate) fn remove_plain<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}
