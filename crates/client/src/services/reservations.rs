//! Hotel reservations (admin view) and invoices.

use voyage_core::models::Reservation;
use voyage_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ReservationService {
    api: ApiClient,
}

impl ReservationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, ApiError> {
        self.api
            .get_data_or_default("/admin/reservations/hotels")
            .await
    }

    pub async fn get(&self, id: DbId) -> Result<Reservation, ApiError> {
        self.api
            .get_data(&format!("/admin/reservations/hotels/{id}"))
            .await
    }

    /// Invoice as free-form JSON; its shape is owned by the backend.
    pub async fn invoice_json(&self, id: DbId) -> Result<serde_json::Value, ApiError> {
        self.api
            .get_json(&format!("/reservations/{id}/invoice"))
            .await
    }

    /// Invoice rendered as PDF bytes.
    pub async fn invoice_pdf(&self, id: DbId) -> Result<Vec<u8>, ApiError> {
        self.api
            .get_bytes(&format!("/reservations/{id}/invoice.pdf"))
            .await
    }
}
