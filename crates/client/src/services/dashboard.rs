use voyage_core::models::DashboardData;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<DashboardData, ApiError> {
        self.api.get_data("/admin/dashboard").await
    }
}
