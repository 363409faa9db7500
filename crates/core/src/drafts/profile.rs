//! Admin profile draft.

use serde::{Deserialize, Serialize};

use crate::models::{AdminProfile, ProfileUpdate};
use crate::text::non_blank;
use crate::validation::{FieldViolation, Violations};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub country: String,
    pub city_state: String,
    pub postal_code: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &AdminProfile) -> Self {
        Self {
            name: profile.name.clone(),
            country: profile.country.clone().unwrap_or_default(),
            city_state: profile.city_state.clone().unwrap_or_default(),
            postal_code: profile.postal_code.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut v = Violations::new();
        v.require_text("name", &self.name);
        v.into_vec()
    }

    /// Blank optional fields are left out so the backend keeps its value.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.trim().to_string(),
            country: non_blank(&self.country),
            city_state: non_blank(&self.city_state),
            postal_code: non_blank(&self.postal_code),
        }
    }
}
