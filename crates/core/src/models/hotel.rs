//! Hotel entity model and upsert payload.

use serde::{Deserialize, Serialize};

use super::{null_as_default, DayActivity, FaqEntry, HasImages, NearbyPlace};
use crate::types::DbId;

/// A hotel as returned by `GET /hotels/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub map: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Free text on the backend ("3", "3-5", ...).
    pub days: Option<String>,
    /// Free text on the backend ("4", "4.5", ...).
    pub stars: Option<String>,
    pub about: Option<String>,
    pub cancellation_policy: Option<String>,
    pub available_dates: Option<String>,
    pub best_time_to_visit: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub travel_tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suited_for: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub includes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excludes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby: Vec<NearbyPlace>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faq: Vec<FaqEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub programme: Vec<DayActivity>,
}

impl HasImages for Hotel {
    fn images(&self) -> &[String] {
        &self.images
    }
}

/// A bookable room. `image` is a server-side URL set by the room image
/// upload endpoint, never by the upsert payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

/// Body of `POST /hotels` and `PUT /hotels/{id}`.
///
/// Images are deliberately absent: they are attached through the upload
/// endpoints after the hotel exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelUpsert {
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

    pub highlights: Vec<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub suited_for: Vec<String>,
    pub travel_tips: Vec<String>,

    pub rooms: Vec<Room>,
    pub nearby: Vec<NearbyPlace>,
    pub faq: Vec<FaqEntry>,
    pub programme: Vec<DayActivity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotel_tolerates_null_collections() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Dar Said",
            "rooms": null,
            "images": ["a.jpg"],
            "travelTips": null,
            "bestTimeToVisit": "Spring"
        });
        let hotel: Hotel = serde_json::from_value(json).unwrap();
        assert_eq!(hotel.id, Some(7));
        assert!(hotel.rooms.is_empty());
        assert!(hotel.travel_tips.is_empty());
        assert_eq!(hotel.images(), ["a.jpg".to_string()]);
        assert_eq!(hotel.best_time_to_visit.as_deref(), Some("Spring"));
    }

    #[test]
    fn room_image_is_not_sent_when_absent() {
        let room = Room {
            id: None,
            name: "Suite".into(),
            capacity: 2,
            price: 120.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&room).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["id"], serde_json::Value::Null);
    }
}
