/// All backend primary keys are 64-bit integers.
pub type DbId = i64;

/// Calendar dates exchanged with the backend (`YYYY-MM-DD`).
pub type Date = chrono::NaiveDate;
