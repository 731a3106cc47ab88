//! Sale Models

use jiff::Timestamp;

use crate::{domain::products::models::ProductUuid, uuids::TypedUuid};

/// Sale UUID
pub type SaleUuid = TypedUuid<Sale>;

/// Sale Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub uuid: SaleUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub paid: i32,
    pub date_created: Timestamp,
}

/// New Sale Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub quantity: i32,
    pub paid: i32,
}
