//! Sale Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::sales::models::Sale;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct SaleResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub paid: i32,
    pub date_created: Timestamp,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            id: sale.uuid.into_uuid(),
            product_id: sale.product_uuid.into_uuid(),
            quantity: sale.quantity,
            paid: sale.paid,
            date_created: sale.date_created,
        }
    }
}
