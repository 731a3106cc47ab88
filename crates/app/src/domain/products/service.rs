//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        errors::ServiceError,
        products::{
            models::{NewProduct, Product, ProductUpdate, ProductUuid},
            repository::PgProductsRepository,
        },
        storage_precision,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    #[tracing::instrument(name = "products.service.list_products", skip(self), err)]
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.repository
            .list_products(self.db.pool())
            .await
            .map_err(ServiceError::storage("selecting products", None))
    }

    #[tracing::instrument(name = "products.service.retrieve_product", skip(self), err)]
    async fn retrieve_product(&self, id: &str) -> Result<Product, ServiceError> {
        let product = parse_product_uuid(id)?;

        self.repository
            .get_product(self.db.pool(), product)
            .await
            .map_err(ServiceError::storage("selecting product", Some(&product)))
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, new),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn create_product(
        &self,
        new: NewProduct,
        now: Timestamp,
    ) -> Result<Product, ServiceError> {
        new.validate()?;

        let product = ProductUuid::new();

        tracing::Span::current().record("product_uuid", tracing::field::display(product));

        let created = self
            .repository
            .create_product(self.db.pool(), product, new, storage_precision(now))
            .await
            .map_err(ServiceError::storage("inserting product", Some(&product)))?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(name = "products.service.update_product", skip(self, update), err)]
    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
        now: Timestamp,
    ) -> Result<(), ServiceError> {
        let product = parse_product_uuid(id)?;

        update.validate()?;

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(ServiceError::storage("updating product", Some(&product)))?;

        let current = self
            .repository
            .lock_product(&mut *tx, product)
            .await
            .map_err(ServiceError::storage("selecting product", Some(&product)))?;

        let updated = update.apply(current, storage_precision(now));

        let rows_affected = self
            .repository
            .update_product(&mut *tx, &updated)
            .await
            .map_err(ServiceError::storage("updating product", Some(&product)))?;

        if rows_affected == 0 {
            return Err(ServiceError::NotFound);
        }

        tx.commit()
            .await
            .map_err(ServiceError::storage("updating product", Some(&product)))?;

        Ok(())
    }

    #[tracing::instrument(name = "products.service.delete_product", skip(self), err)]
    async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        let product = parse_product_uuid(id)?;

        let rows_affected = self
            .repository
            .delete_product(self.db.pool(), product)
            .await
            .map_err(ServiceError::storage("deleting product", Some(&product)))?;

        if rows_affected == 0 {
            info!(product_uuid = %product, "product already absent");
        }

        Ok(())
    }
}

pub(crate) fn parse_product_uuid(id: &str) -> Result<ProductUuid, ServiceError> {
    id.parse().map_err(ServiceError::InvalidIdentity)
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products with their sales aggregates.
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;

    /// Retrieve a single product with its sales aggregates.
    async fn retrieve_product(&self, id: &str) -> Result<Product, ServiceError>;

    /// Creates a new product stamped with `now`.
    async fn create_product(&self, new: NewProduct, now: Timestamp)
    -> Result<Product, ServiceError>;

    /// Merges `update` over the stored product.
    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
        now: Timestamp,
    ) -> Result<(), ServiceError>;

    /// Deletes a product and its sales. Deleting an unknown product succeeds.
    async fn delete_product(&self, id: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;
    use tokio::task::JoinSet;

    use crate::{
        domain::{products::models::NewProduct, storage_precision},
        schema,
        test::TestContext,
    };

    use super::*;

    fn comic_books() -> NewProduct {
        NewProduct {
            name: "Comic Books".to_string(),
            cost: 10,
            quantity: 20,
        }
    }

    #[tokio::test]
    async fn create_then_retrieve_returns_same_product() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx.products.create_product(comic_books(), now).await?;

        let retrieved = ctx
            .products
            .retrieve_product(&created.uuid.to_string())
            .await?;

        assert_eq!(created, retrieved);
        assert_eq!(retrieved.date_created, storage_precision(now));
        assert_eq!(retrieved.sold, 0);
        assert_eq!(retrieved.revenue, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_invalid_payload() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                NewProduct {
                    name: String::new(),
                    cost: -5,
                    quantity: 0,
                },
                Timestamp::now(),
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::ValidationFailed { ref fields, .. }) if fields.len() == 3),
            "expected ValidationFailed with three fields, got {result:?}"
        );
    }

    #[tokio::test]
    async fn retrieve_malformed_id_is_invalid_identity() {
        let ctx = TestContext::new().await;

        let result = ctx.products.retrieve_product("not-a-uuid").await;

        assert!(
            matches!(result, Err(ServiceError::InvalidIdentity(_))),
            "expected InvalidIdentity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn retrieve_unknown_id_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .retrieve_product(&ProductUuid::new().to_string())
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_aggregates_seeded_sales() -> TestResult {
        let ctx = TestContext::new().await;

        schema::seed(ctx.db.pool()).await?;

        let products = ctx.products.list_products().await?;

        assert_eq!(products.len(), 2);

        let comics = products
            .iter()
            .find(|p| p.name == "Comic Books")
            .ok_or("comic books missing")?;

        let toys = products
            .iter()
            .find(|p| p.name == "McDonalds Toys")
            .ok_or("toys missing")?;

        assert_eq!((comics.sold, comics.revenue), (6, 400));
        assert_eq!((toys.sold, toys.revenue), (0, 0));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products().await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_cost_only_leaves_other_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let created_at = Timestamp::now();

        let created = ctx.products.create_product(comic_books(), created_at).await?;
        let id = created.uuid.to_string();

        let later = created_at + SignedDuration::from_secs(60);

        ctx.products
            .update_product(
                &id,
                ProductUpdate {
                    cost: Some(25),
                    ..ProductUpdate::default()
                },
                later,
            )
            .await?;

        let updated = ctx.products.retrieve_product(&id).await?;

        assert_eq!(updated.name, created.name);
        assert_eq!(updated.quantity, created.quantity);
        assert_eq!(updated.cost, 25);
        assert_eq!(updated.date_created, created.date_created);
        assert!(updated.date_updated > created.date_updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                &ProductUuid::new().to_string(),
                ProductUpdate::default(),
                Timestamp::now(),
            )
            .await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_malformed_id_is_invalid_identity() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product("123", ProductUpdate::default(), Timestamp::now())
            .await;

        assert!(
            matches!(result, Err(ServiceError::InvalidIdentity(_))),
            "expected InvalidIdentity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .products
            .create_product(comic_books(), Timestamp::now())
            .await?;
        let id = created.uuid.to_string();

        ctx.products.delete_product(&id).await?;

        let result = ctx.products.retrieve_product(&id).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_id_succeeds() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .delete_product(&ProductUuid::new().to_string())
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn delete_malformed_id_is_invalid_identity() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product("nope").await;

        assert!(
            matches!(result, Err(ServiceError::InvalidIdentity(_))),
            "expected InvalidIdentity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> TestResult {
        let ctx = TestContext::new().await;
        let mut tasks = JoinSet::new();

        for n in 0..16 {
            let products = ctx.products.clone();

            tasks.spawn(async move {
                products
                    .create_product(
                        NewProduct {
                            name: format!("Product {n}"),
                            cost: n,
                            quantity: 1,
                        },
                        Timestamp::now(),
                    )
                    .await
            });
        }

        let mut ids = HashSet::new();

        while let Some(created) = tasks.join_next().await {
            ids.insert(created??.uuid);
        }

        assert_eq!(ids.len(), 16);

        for id in ids {
            ctx.products.retrieve_product(&id.to_string()).await?;
        }

        Ok(())
    }
}
