//! Destination draft.

use serde::{Deserialize, Serialize};

use super::{remove_plain, Draft, ImageSelection};
use crate::models::{
    DayActivity, Destination, DestinationUpsert, FaqEntry, HasImages, NearbyPlace, Review,
};
use crate::ordered;
use crate::types::{Date, DbId};
use crate::validation::{FieldViolation, Violations};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationDraft {
    pub name: String,
    pub country: String,
    pub location: String,
    pub title: String,
    pub price: f64,
    pub days: u32,
    pub available_from: Option<Date>,
    pub available_to: Option<Date>,
    pub description: String,
    pub about: String,

    pub activities: Vec<DayActivity>,
    pub nearby: Vec<NearbyPlace>,
    pub faq: Vec<FaqEntry>,

    /// Shown for context only; never part of the payload.
    #[serde(skip_deserializing)]
    pub reviews: Vec<Review>,
}

impl Default for DestinationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            country: String::new(),
            location: String::new(),
            title: String::new(),
            price: 0.0,
            days: 1,
            available_from: None,
            available_to: None,
            description: String::new(),
            about: String::new(),
            activities: Vec::new(),
            nearby: Vec::new(),
            faq: Vec::new(),
            reviews: Vec::new(),
        }
    }
}

impl DestinationDraft {
    pub fn add_activity(&mut self) {
        ordered::push_next(&mut self.activities, |day| DayActivity {
            day,
            activity: String::new(),
        });
    }

    pub fn remove_activity(&mut self, index: usize) -> Option<DayActivity> {
        ordered::remove_at(&mut self.activities, index)
    }

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
}

impl Draft for DestinationDraft {
    type Entity = Destination;
    type Payload = DestinationUpsert;

    const ENTITY: &'static str = "destination";
    const PRIMARY_IMAGES: ImageSelection = ImageSelection::Multiple;

    fn seeded() -> Self {
        let mut draft = Self::default();
        draft.add_activity();
        draft.add_faq();
        draft
    }

    fn from_entity(d: &Destination) -> Self {
        Self {
            name: d.name.clone(),
            country: d.country.clone(),
            location: d.location.clone().unwrap_or_default(),
            title: d.title.clone().unwrap_or_default(),
            price: d.price,
            days: if d.days == 0 { 1 } else { d.days },
            available_from: d.available_from,
            available_to: d.available_to,
            description: d.description.clone().unwrap_or_default(),
            about: d.about.clone().unwrap_or_default(),
            activities: d.activities.clone(),
            nearby: d.nearby.clone(),
            faq: d.faq.clone(),
            reviews: d.reviews.clone(),
        }
    }

    fn validate(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.require_text("name", &self.name);
        v.require_at_least("price", self.price, 0.0);
        v.require_at_least("days", self.days, 1);
        if let (Some(from), Some(to)) = (self.available_from, self.available_to) {
            if to < from {
                v.push("availableTo", "must not be before availableFrom");
            }
        }
        v.each("activities", &self.activities, |s, item| {
            s.require_at_least("day", item.day, 1);
            s.require_text("activity", &item.activity);
        });
        v.each("nearby", &self.nearby, |s, place| s.require_text("name", &place.name));
        v.each("faq", &self.faq, |s, entry| {
            s.require_text("question", &entry.question);
            s.require_text("answer", &entry.answer);
        });
        v.into_vec()
    }

    fn to_payload(&self) -> DestinationUpsert {
        DestinationUpsert {
            name: self.name.trim().to_string(),
            country: self.country.clone(),
            location: self.location.clone(),
            title: self.title.clone(),
            price: self.price,
            days: self.days,
            available_from: self.available_from,
            available_to: self.available_to,
            description: self.description.clone(),
            about: self.about.clone(),
            activities: self.activities.clone(),
            nearby: self.nearby.clone(),
            faq: self.faq.clone(),
        }
    }

    fn entity_id(d: &Destination) -> Option<DbId> {
        d.id
    }

    fn image_count(d: &Destination) -> usize {
        d.images().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draft_starts_at_day_one() {
        let draft = DestinationDraft::seeded();
        assert_eq!(draft.activities.len(), 1);
        assert_eq!(draft.activities[0].day, 1);
        assert_eq!(draft.faq.len(), 1);
        assert_eq!(draft.days, 1);
    }

    #[test]
    fn activities_stay_contiguous() {
        let mut draft = DestinationDraft::seeded();
        draft.add_activity();
        draft.add_activity();
        draft.add_activity();
        draft.remove_activity(1);
        draft.remove_activity(0);
        assert!(ordered::is_contiguous(&draft.activities));
        assert_eq!(draft.activities.len(), 2);
        draft.add_activity();
        assert_eq!(draft.activities[2].day, 3);
    }

    #[test]
    fn reviews_are_kept_for_display_but_not_sent() {
        let entity: Destination = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Djerba",
            "reviews": [{ "name": "Ana", "stars": 4, "comment": "Nice" }]
        }))
        .unwrap();
        let draft = DestinationDraft::from_entity(&entity);
        assert_eq!(draft.reviews.len(), 1);
        let json = serde_json::to_value(draft.to_payload()).unwrap();
        assert!(json.get("reviews").is_none());
        assert!(json.get("images").is_none());
    }

    #[test]
    fn inverted_availability_window_is_rejected() {
        let mut draft = DestinationDraft {
            name: "Djerba".into(),
            ..Default::default()
        };
        draft.available_from = Date::from_ymd_opt(2025, 9, 1);
        draft.available_to = Date::from_ymd_opt(2025, 8, 1);
        let violations = draft.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "availableTo");
    }

    #[test]
    fn nan_price_is_rejected() {
        let draft = DestinationDraft {
            name: "Djerba".into(),
            price: f64::NAN,
            ..Default::default()
        };
        let violations = draft.validate();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "price");
    }
}
