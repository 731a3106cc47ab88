//! Product Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::products::models::Product;

/// Product as sent to clients, sales aggregates included.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub cost: i32,
    pub quantity: i32,
    pub sold: i64,
    pub revenue: i64,
    pub date_created: Timestamp,
    pub date_updated: Timestamp,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            name: product.name,
            cost: product.cost,
            quantity: product.quantity,
            sold: product.sold,
            revenue: product.revenue,
            date_created: product.date_created,
            date_updated: product.date_updated,
        }
    }
}
