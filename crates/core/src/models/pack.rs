//! Travel pack entity model and upsert payload.
//!
//! A pack bundles one hotel and one destination. The read side embeds
//! both; the write side references them by id.

use serde::{Deserialize, Serialize};

use super::{null_as_default, DayActivity, Destination, FaqEntry, Hotel, NearbyPlace, Review};
use crate::types::DbId;

/// A pack as returned by `GET /packs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: u32,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub about: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,

    pub hotel: Option<Hotel>,
    pub destination: Option<Destination>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<DayActivity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faq: Vec<FaqEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby: Vec<NearbyPlace>,
}

/// Body of `POST /packs` and `PUT /packs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackUpsert {
    pub name: String,
    /// Always the country of the referenced destination.
    pub country: String,
    pub price: f64,
    pub days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub location: String,
    pub description: String,
    pub about: String,
    pub images: Vec<String>,

    pub hotel_id: DbId,
    pub destination_id: DbId,

    pub activities: Vec<DayActivity>,
    pub faq: Vec<FaqEntry>,
    pub nearby: Vec<NearbyPlace>,
}
