//! Travel pack draft.
//!
//! Packs have no uploads; their image list is a set of URLs edited as
//! comma-separated text. The pack's country is not editable: it follows
//! the selected destination.

use serde::{Deserialize, Serialize};

use super::{remove_plain, Draft};
use crate::models::{DayActivity, Destination, FaqEntry, NearbyPlace, Pack, PackUpsert};
use crate::ordered;
use crate::text::{csv_to_list, list_to_csv};
use crate::types::DbId;
use crate::validation::{FieldViolation, Violations};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackDraft {
    pub name: String,
    pub price: f64,
    pub days: u32,
    pub rating: Option<f64>,
    pub location: String,
    pub description: String,
    pub about: String,
    pub images_text: String,

    pub hotel_id: Option<DbId>,
    pub destination_id: Option<DbId>,
    /// Copied from the selected destination.
    pub country: String,

    pub activities: Vec<DayActivity>,
    pub faq: Vec<FaqEntry>,
    pub nearby: Vec<NearbyPlace>,
}

impl Default for PackDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: 0.0,
            days: 1,
            rating: None,
            location: String::new(),
            description: String::new(),
            about: String::new(),
            images_text: String::new(),
            hotel_id: None,
            destination_id: None,
            country: String::new(),
            activities: Vec::new(),
            faq: Vec::new(),
            nearby: Vec::new(),
        }
    }
}

impl PackDraft {
    /// Point the pack at a destination, taking its country along.
    pub fn select_destination(&mut self, destination: &Destination) {
        self.destination_id = destination.id;
        self.country = destination.country.clone();
    }

    /// Resolve the destination by id from a fetched list.
    ///
    /// Returns `false` when the id is not in the list; the draft is left
    /// unchanged in that case.
    pub fn select_destination_by_id(&mut self, id: DbId, destinations: &[Destination]) -> bool {
        match destinations.iter().find(|d| d.id == Some(id)) {
            Some(d) => {
                self.select_destination(d);
                true
            }
            None => false,
        }
    }

    pub fn add_activity(&mut self) {
        ordered::push_next(&mut self.activities, |day| DayActivity {
            day,
            activity: String::new(),
        });
    }

    pub fn remove_activity(&mut self, index: usize) -> Option<DayActivity> {
        ordered::remove_at(&mut self.activities, index)
    }

    pub fn add_faq(&mut self) {
        self.faq.push(FaqEntry::default());
    }

    pub fn remove_faq(&mut self, index: usize) -> Option<FaqEntry> {
        remove_plain(&mut self.faq, index)
    }

    pub fn add_nearby(&mut self) {
        self.nearby.push(NearbyPlace::default());
    }

    pub fn remove_nearby(&mut self, index: usize) -> Option<NearbyPlace> {
        remove_plain(&mut self.nearby, index)
    }
}

impl Draft for PackDraft {
    type Entity = Pack;
    type Payload = PackUpsert;

    const ENTITY: &'static str = "pack";

    fn seeded() -> Self {
        let mut draft = Self::default();
        draft.add_activity();
        draft.add_faq();
        draft
    }

    /// Empty activity or FAQ lists are re-seeded with one blank entry.
    fn from_entity(pack: &Pack) -> Self {
        let mut draft = Self {
            name: pack.name.clone(),
            price: pack.price,
            days: if pack.days == 0 { 1 } else { pack.days },
            rating: pack.rating,
            location: pack.location.clone().unwrap_or_default(),
            description: pack.description.clone().unwrap_or_default(),
            about: pack.about.clone().unwrap_or_default(),
            images_text: list_to_csv(&pack.images),
            hotel_id: pack.hotel.as_ref().and_then(|h| h.id),
            destination_id: pack.destination.as_ref().and_then(|d| d.id),
            country: pack
                .destination
                .as_ref()
                .map(|d| d.country.clone())
                .unwrap_or_else(|| pack.country.clone()),
            activities: pack.activities.clone(),
            faq: pack.faq.clone(),
            nearby: pack.nearby.clone(),
        };
        if draft.activities.is_empty() {
            draft.add_activity();
        }
        if draft.faq.is_empty() {
            draft.add_faq();
        }
        draft
    }

    fn validate(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.require_text("name", &self.name);
        v.require_at_least("price", self.price, 0.0);
        v.require_at_least("days", self.days, 1);
        v.require_some("hotelId", &self.hotel_id);
        v.require_some("destinationId", &self.destination_id);
        v.each("activities", &self.activities, |s, item| {
            s.require_at_least("day", item.day, 1);
            s.require_text("activity", &item.activity);
        });
        v.each("faq", &self.faq, |s, entry| {
            s.require_text("question", &entry.question);
            s.require_text("answer", &entry.answer);
        });
        v.each("nearby", &self.nearby, |s, place| s.require_text("name", &place.name));
        v.into_vec()
    }

    fn to_payload(&self) -> PackUpsert {
        PackUpsert {
            name: self.name.trim().to_string(),
            country: self.country.clone(),
            price: self.price,
            days: self.days,
            rating: self.rating,
            location: self.location.clone(),
            description: self.description.clone(),
            about: self.about.clone(),
            images: csv_to_list(&self.images_text),
            hotel_id: self.hotel_id.unwrap_or_default(),
            destination_id: self.destination_id.unwrap_or_default(),
            activities: self.activities.clone(),
            faq: self.faq.clone(),
            nearby: self.nearby.clone(),
        }
    }

    fn entity_id(pack: &Pack) -> Option<DbId> {
        pack.id
    }
}
