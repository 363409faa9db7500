use serde::Serialize;
use voyage_core::models::{OrderType, OrdersPage};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Page size the admin screens use when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Serialize)]
struct OrdersQuery {
    #[serde(rename = "type")]
    order_type: &'static str,
    page: u32,
    size: u32,
}

#[derive(Debug, Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One page of the orders feed. `page` is zero-based.
    pub async fn page(
        &self,
        order_type: OrderType,
        page: u32,
        size: u32,
    ) -> Result<OrdersPage, ApiError> {
        let query = OrdersQuery {
            order_type: order_type.as_str(),
            page,
            size,
        };
        self.api.get_data_with_query("/admin/orders", &query).await
    }
}
