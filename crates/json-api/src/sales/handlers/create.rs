//! Create Sale Handler

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use salvo::{Depot, Request, Response, http::StatusCode};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::sales::models::NewSale;

use crate::{
    extensions::*,
    sales::SaleResponse,
    state::State,
    web::{Handler, WebError, respond},
};

/// New Sale Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NewSaleRequest {
    pub quantity: i32,
    pub paid: i32,
}

impl From<NewSaleRequest> for NewSale {
    fn from(request: NewSaleRequest) -> Self {
        NewSale {
            quantity: request.quantity,
            paid: request.paid,
        }
    }
}

/// `POST /products/{id}/sales`
#[derive(Debug, Clone, Copy)]
pub(crate) struct CreateSale;

#[async_trait]
impl Handler for CreateSale {
    #[tracing::instrument(name = "sales.create", skip_all, fields(product_id = tracing::field::Empty))]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let product_id = req.id_param();

        tracing::Span::current().record("product_id", product_id.as_str());

        let request = req.json_body::<NewSaleRequest>().await?;
        let state = depot.obtain_or_500::<Arc<State>>()?;

        let sale = state
            .app
            .sales
            .add_sale(request.into(), &product_id, Timestamp::now())
            .await?;

        respond(res, StatusCode::CREATED, SaleResponse::from(sale))
    }
}
