//! Wire-level DTOs exchanged with the booking backend.
//!
//! All field names are camelCase on the wire. The backend sends `null`
//! for empty collections as often as it omits them, so every list field
//! goes through [`null_as_default`].

pub mod auth;
pub mod dashboard;
pub mod destination;
pub mod hotel;
pub mod pack;
pub mod profile;
pub mod reservation;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ordered::DayOrdered;

pub use auth::{LoginRequest, LoginResponse, ROLE_ADMIN};
pub use dashboard::{DashboardData, LabeledValue, OrderRow, OrderType, OrdersPage};
pub use destination::{Destination, DestinationSearch, DestinationUpsert};
pub use hotel::{Hotel, HotelUpsert, Room};
pub use pack::{Pack, PackUpsert};
pub use profile::{AdminProfile, ProfileUpdate};
pub use reservation::{MealPlan, Reservation};

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as
/// `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Sub-list items shared by hotels, destinations and packs
// ---------------------------------------------------------------------------

/// One day of an itinerary (`activities` on destinations/packs,
/// `programme` on hotels).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity: String,
}

impl DayOrdered for DayActivity {
    fn day(&self) -> u32 {
        self.day
    }

    fn set_day(&mut self, day: u32) {
        self.day = day;
    }
}

/// A question/answer pair. `open` is a display hint the backend stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: bool,
}

/// A point of interest near the entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: String,
}

/// A customer review. Read-only from the admin side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

/// Entities with a positional image gallery.
pub trait HasImages {
    fn images(&self) -> &[String];
}
