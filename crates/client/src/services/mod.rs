//! One service per backend resource. Each holds a cloned [`ApiClient`].
//!
//! [`ApiClient`]: crate::ApiClient

pub mod auth;
pub mod dashboard;
pub mod destinations;
pub mod hotels;
pub mod orders;
pub mod packs;
pub mod profile;
pub mod reservations;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use destinations::DestinationService;
pub use hotels::HotelService;
pub use orders::OrderService;
pub use packs::PackService;
pub use profile::ProfileService;
pub use reservations::ReservationService;
