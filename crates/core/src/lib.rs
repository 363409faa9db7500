//! Domain types for the travel-booking admin tools.
//!
//! Wire DTOs, editable drafts with pure validation, day-ordered sub-list
//! maintenance, and id parsing. This crate performs no I/O; the client
//! and editor crates build on it.

pub mod drafts;
pub mod error;
pub mod models;
pub mod ordered;
pub mod route;
pub mod text;
pub mod types;
pub mod validation;
