//! Hotel reservation model (admin read side).

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::types::{Date, DbId};

/// Board basis booked with the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealPlan {
    RoomOnly,
    Bb,
    Hb,
    Fb,
    Ai,
    Uai,
}

impl MealPlan {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::RoomOnly => "Room only",
            Self::Bb => "Bed & breakfast",
            Self::Hb => "Half board",
            Self::Fb => "Full board",
            Self::Ai => "All inclusive",
            Self::Uai => "Ultra all inclusive",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: DbId,

    pub user_id: Option<DbId>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,

    pub hotel_id: Option<DbId>,
    pub hotel_name: Option<String>,
    pub hotel_location: Option<String>,

    pub check_in: Option<Date>,
    pub check_out: Option<Date>,

    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub babies: Option<u32>,

    pub meal_plan: Option<MealPlan>,
    pub total_amount: Option<f64>,

    /// Server-local timestamp, passed through as sent.
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_names: Vec<String>,
}

impl Reservation {
    /// Number of nights between check-in and check-out, when both are known.
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end > start => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Total guests across all age bands.
    pub fn guests(&self) -> u32 {
        self.adults.unwrap_or(0) + self.children.unwrap_or(0) + self.babies.unwrap_or(0)
    }
}
