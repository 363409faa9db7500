//! Hotel draft: scalar fields, comma-separated list fields, rooms,
//! nearby places, FAQ and a day-ordered programme.

use serde::{Deserialize, Serialize};

use super::{remove_plain, Draft, ImageItems, ImageSelection};
use crate::models::{DayActivity, FaqEntry, HasImages, Hotel, HotelUpsert, NearbyPlace, Room};
use crate::ordered;
use crate::text::{csv_to_list, list_to_csv};
use crate::types::DbId;
use crate::validation::{FieldViolation, Violations};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HotelDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub city: String,
    pub country: String,
    pub stars: String,
    pub days: String,
    pub about: String,
    pub cancellation_policy: String,
    pub available_dates: String,
    pub best_time_to_visit: String,

    pub highlights_text: String,
    pub includes_text: String,
    pub excludes_text: String,
    pub suited_for_text: String,
    pub travel_tips_text: String,

    pub rooms: Vec<RoomDraft>,
    pub nearby: Vec<NearbyPlace>,
    pub faq: Vec<FaqEntry>,
    pub programme: Vec<DayActivity>,
}

/// Editable room. `id` is kept so updates address existing rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDraft {
    pub id: Option<DbId>,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub price: f64,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            capacity: 1,
            price: 0.0,
        }
    }
}

impl From<&Room> for RoomDraft {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            description: room.description.clone().unwrap_or_default(),
            capacity: room.capacity,
            price: room.price,
        }
    }
}

impl HotelDraft {
    pub fn add_nearby(&mut self) {
        self.nearby.push(NearbyPlace::default());
    }

    pub fn remove_nearby(&mut self, index: usize) -> Option<NearbyPlace> {
        remove_plain(&mut self.nearby, index)
    }

    pub fn add_faq(&mut self) {
        self.faq.push(FaqEntry::default());
    }

    pub fn remove_faq(&mut self, index: usize) -> Option<FaqEntry> {
        remove_plain(&mut self.faq, index)
    }

    pub fn add_programme(&mut self) {
        ordered::push_next(&mut self.programme, |day| DayActivity {
            day,
            activity: String::new(),
        });
    }

    pub fn remove_programme(&mut self, index: usize) -> Option<DayActivity> {
        ordered::remove_at(&mut self.programme, index)
    }
}

impl Draft for HotelDraft {
    type Entity = Hotel;
    type Payload = HotelUpsert;

    const ENTITY: &'static str = "hotel";
    const PRIMARY_IMAGES: ImageSelection = ImageSelection::Single;

    /// New hotels start with one room and one FAQ entry.
    fn seeded() -> Self {
        let mut draft = Self::default();
        draft.push_image_item();
        draft.add_faq();
        draft
    }

    fn from_entity(hotel: &Hotel) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: hotel.name.clone(),
            description: text(&hotel.description),
            location: text(&hotel.location),
            city: text(&hotel.city),
            country: text(&hotel.country),
            stars: text(&hotel.stars),
            days: text(&hotel.days),
            about: text(&hotel.about),
            cancellation_policy: text(&hotel.cancellation_policy),
            available_dates: text(&hotel.available_dates),
            best_time_to_visit: text(&hotel.best_time_to_visit),

            highlights_text: list_to_csv(&hotel.highlights),
            includes_text: list_to_csv(&hotel.includes),
            excludes_text: list_to_csv(&hotel.excludes),
            suited_for_text: list_to_csv(&hotel.suited_for),
            travel_tips_text: list_to_csv(&hotel.travel_tips),

            rooms: hotel.rooms.iter().map(RoomDraft::from).collect(),
            nearby: hotel.nearby.clone(),
            faq: hotel.faq.clone(),
            programme: hotel.programme.clone(),
        }
    }

    fn validate(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.require_text("name", &self.name);
        v.each("rooms", &self.rooms, |s, room| s.require_text("name", &room.name));
        v.each("nearby", &self.nearby, |s, place| s.require_text("name", &place.name));
        v.each("faq", &self.faq, |s, entry| {
            s.require_text("question", &entry.question);
            s.require_text("answer", &entry.answer);
        });
        v.each("programme", &self.programme, |s, item| {
            s.require_at_least("day", item.day, 1);
            s.require_text("activity", &item.activity);
        });
        v.into_vec()
    }

    fn to_payload(&self) -> HotelUpsert {
        HotelUpsert {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            location: self.location.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            stars: self.stars.clone(),
            days: self.days.clone(),
            about: self.about.clone(),
            cancellation_policy: self.cancellation_policy.clone(),
            available_dates: self.available_dates.clone(),
            best_time_to_visit: self.best_time_to_visit.clone(),

            highlights: csv_to_list(&self.highlights_text),
            includes: csv_to_list(&self.includes_text),
            excludes: csv_to_list(&self.excludes_text),
            suited_for: csv_to_list(&self.suited_for_text),
            travel_tips: csv_to_list(&self.travel_tips_text),

            rooms: self
                .rooms
                .iter()
                .map(|r| Room {
                    id: r.id,
                    name: r.name.clone(),
                    image: None,
                    description: Some(r.description.clone()),
                    capacity: r.capacity,
                    price: r.price,
                })
                .collect(),
            nearby: self.nearby.clone(),
            faq: self.faq.clone(),
            programme: self.programme.clone(),
        }
    }

    fn entity_id(hotel: &Hotel) -> Option<DbId> {
        hotel.id
    }

    fn image_count(hotel: &Hotel) -> usize {
        hotel.images().len()
    }

    fn image_item_ids(&self) -> Vec<Option<DbId>> {
        self.rooms.iter().map(|r| r.id).collect()
    }

    fn entity_image_item_ids(hotel: &Hotel) -> Vec<Option<DbId>> {
        hotel.rooms.iter().map(|r| r.id).collect()
    }

    /// New rooms take the id at their own position unless another room
    /// already holds it, then the first response id no room holds yet.
    fn assign_image_item_ids(&mut self, ids: &[Option<DbId>]) {
        let mut claimed: Vec<DbId> = self.rooms.iter().filter_map(|r| r.id).collect();
        for (index, room) in self.rooms.iter_mut().enumerate() {
            if room.id.is_some() {
                continue;
            }
            let unclaimed = |id: &DbId| !claimed.contains(id);
            let id = ids
                .get(index)
                .copied()
                .flatten()
                .filter(unclaimed)
                .or_else(|| ids.iter().flatten().copied().find(unclaimed));
            if let Some(id) = id {
                claimed.push(id);
                room.id = Some(id);
            }
        }
    }
}

impl ImageItems for HotelDraft {
    const ITEM_LIST: &'static str = "rooms";

    fn image_item_count(&self) -> usize {
        self.rooms.len()
    }

    fn push_image_item(&mut self) {
        self.rooms.push(RoomDraft::default());
    }

    fn remove_image_item(&mut self, index: usize) -> bool {
        remove_plain(&mut self.rooms, index).is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
