//! Update Product Handler

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use salvo::{Depot, Request, Response, http::StatusCode};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    state::State,
    web::{Handler, WebError, respond_empty},
};

/// Update Product Request
///
/// Absent fields (and explicit `null`) leave the stored value unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<i32>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            cost: request.cost,
            quantity: request.quantity,
        }
    }
}

/// `PUT /products/{id}`
#[derive(Debug, Clone, Copy)]
pub(crate) struct UpdateProduct;

#[async_trait]
impl Handler for UpdateProduct {
    #[tracing::instrument(name = "products.update", skip_all, fields(product_id = tracing::field::Empty))]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let id = req.id_param();

        tracing::Span::current().record("product_id", id.as_str());

        let request = req.json_body::<UpdateProductRequest>().await?;
        let state = depot.obtain_or_500::<Arc<State>>()?;

        state
            .app
            .products
            .update_product(&id, request.into(), Timestamp::now())
            .await?;

        tracing::info!(product_id = %id, "updated product");

        respond_empty(res, StatusCode::NO_CONTENT)
    }
}
