//! Products Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgExecutor, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::products::models::{NewProduct, Product, ProductUuid};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products<'e>(
        &self,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(executor)
            .await
    }

    pub(crate) async fn get_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(executor)
            .await
    }

    /// Fetch the stored columns and hold a row lock until the surrounding
    /// transaction ends. Aggregates are not computed.
    pub(crate) async fn lock_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(executor)
            .await
    }

    pub(crate) async fn create_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
        new: NewProduct,
        now: Timestamp,
    ) -> Result<Product, sqlx::Error> {
        query(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&new.name)
            .bind(new.cost)
            .bind(new.quantity)
            .bind(SqlxTimestamp::from(now))
            .bind(SqlxTimestamp::from(now))
            .execute(executor)
            .await?;

        Ok(Product {
            uuid: product,
            name: new.name,
            cost: new.cost,
            quantity: new.quantity,
            sold: 0,
            revenue: 0,
            date_created: now,
            date_updated: now,
        })
    }

    pub(crate) async fn update_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(product.cost)
            .bind(product.quantity)
            .bind(SqlxTimestamp::from(product.date_updated))
            .execute(executor)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(executor)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("product_id")?),
            name: row.try_get("name")?,
            cost: row.try_get("cost")?,
            quantity: row.try_get("quantity")?,
            sold: row.try_get("sold")?,
            revenue: row.try_get("revenue")?,
            date_created: row.try_get::<SqlxTimestamp, _>("date_created")?.to_jiff(),
            date_updated: row.try_get::<SqlxTimestamp, _>("date_updated")?.to_jiff(),
        })
    }
}
