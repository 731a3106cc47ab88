//! Sales service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        errors::ServiceError,
        products::service::parse_product_uuid,
        sales::{
            models::{NewSale, Sale, SaleUuid},
            repository::PgSalesRepository,
        },
        storage_precision,
    },
};

#[derive(Debug, Clone)]
pub struct PgSalesService {
    db: Db,
    repository: PgSalesRepository,
}

impl PgSalesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSalesRepository::new(),
        }
    }
}

#[async_trait]
impl SalesService for PgSalesService {
    #[tracing::instrument(name = "sales.service.add_sale", skip(self, new), err)]
    async fn add_sale(
        &self,
        new: NewSale,
        product_id: &str,
        now: Timestamp,
    ) -> Result<Sale, ServiceError> {
        let product = parse_product_uuid(product_id)?;
        let sale = SaleUuid::new();

        let created = self
            .repository
            .create_sale(self.db.pool(), sale, product, new, storage_precision(now))
            .await
            .map_err(ServiceError::storage("inserting sale", Some(&sale)))?;

        info!(sale_uuid = %created.uuid, product_uuid = %product, "recorded sale");

        Ok(created)
    }

    #[tracing::instrument(name = "sales.service.list_sales", skip(self), err)]
    async fn list_sales(&self, product_id: &str) -> Result<Vec<Sale>, ServiceError> {
        let product = parse_product_uuid(product_id)?;

        self.repository
            .list_sales(self.db.pool(), product)
            .await
            .map_err(ServiceError::storage("selecting sales", Some(&product)))
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Records a sale against a product. The product's existence is enforced
    /// by storage, not checked up front.
    async fn add_sale(
        &self,
        new: NewSale,
        product_id: &str,
        now: Timestamp,
    ) -> Result<Sale, ServiceError>;

    /// Lists every sale recorded against a product.
    async fn list_sales(&self, product_id: &str) -> Result<Vec<Sale>, ServiceError>;
}
