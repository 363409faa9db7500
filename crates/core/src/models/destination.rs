//! Destination entity model and upsert payload.

use serde::{Deserialize, Serialize};

use super::{null_as_default, DayActivity, FaqEntry, HasImages, NearbyPlace, Review};
use crate::types::{Date, DbId};

/// A destination as returned by `GET /destinations/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
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

    pub location: Option<String>,
    pub map: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub about: Option<String>,

    pub available_from: Option<Date>,
    pub available_to: Option<Date>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<DayActivity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faq: Vec<FaqEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby: Vec<NearbyPlace>,
}

impl HasImages for Destination {
    fn images(&self) -> &[String] {
        &self.images
    }
}

/// Body of `POST /destinations` and `PUT /destinations/{id}`.
///
/// Neither images nor reviews are sent; the upload endpoint owns the
/// former and customers own the latter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationUpsert {
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
}

/// Filters for `GET /destinations/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<Date>,
}
