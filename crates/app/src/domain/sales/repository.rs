//! Sales Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgExecutor, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    products::models::ProductUuid,
    sales::models::{NewSale, Sale, SaleUuid},
};

const CREATE_SALE_SQL: &str = include_str!("sql/create_sale.sql");
const LIST_SALES_SQL: &str = include_str!("sql/list_sales.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSalesRepository;

impl PgSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_sale<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        sale: SaleUuid,
        product: ProductUuid,
        new: NewSale,
        now: Timestamp,
    ) -> Result<Sale, sqlx::Error> {
        query(CREATE_SALE_SQL)
            .bind(sale.into_uuid())
            .bind(product.into_uuid())
            .bind(new.quantity)
            .bind(new.paid)
            .bind(SqlxTimestamp::from(now))
            .execute(executor)
            .await?;

        Ok(Sale {
            uuid: sale,
            product_uuid: product,
            quantity: new.quantity,
            paid: new.paid,
            date_created: now,
        })
    }

    pub(crate) async fn list_sales<'e>(
        &self,
        executor: impl PgExecutor<'e>,
        product: ProductUuid,
    ) -> Result<Vec<Sale>, sqlx::Error> {
        query_as::<Postgres, Sale>(LIST_SALES_SQL)
            .bind(product.into_uuid())
            .fetch_all(executor)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Sale {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SaleUuid::from_uuid(row.try_get("sale_id")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_id")?),
            quantity: row.try_get("quantity")?,
            paid: row.try_get("paid")?,
            date_created: row.try_get::<SqlxTimestamp, _>("date_created")?.to_jiff(),
        })
    }
}
