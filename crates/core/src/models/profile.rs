//! Admin profile model.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The signed-in admin, as returned by `GET /admin/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub country: Option<String>,
    pub city_state: Option<String>,
    pub postal_code: Option<String>,
    pub image_url: Option<String>,
}

/// Body of `PUT /admin/profile`. Email and role are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}
