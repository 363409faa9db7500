//! REST client for the travel-booking backend.
//!
//! [`ApiClient`] carries the base URL, the injected [`SessionStore`] and
//! the shared HTTP connection pool. The resource services in
//! [`services`] build on it.

pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod services;
pub mod session;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use files::LocalFile;
pub use session::{admin_guard, ScopedSession, SessionKey, SessionScope, SessionStore};
