//! Get Product Handler

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response, http::StatusCode};

use crate::{
    extensions::*,
    products::ProductResponse,
    state::State,
    web::{Handler, WebError, respond},
};

/// `GET /products/{id}`
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetrieveProduct;

#[async_trait]
impl Handler for RetrieveProduct {
    #[tracing::instrument(name = "products.get", skip_all, fields(product_id = tracing::field::Empty))]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let id = req.id_param();

        tracing::Span::current().record("product_id", id.as_str());

        let state = depot.obtain_or_500::<Arc<State>>()?;

        let product = state.app.products.retrieve_product(&id).await?;

        respond(res, StatusCode::OK, ProductResponse::from(product))
    }
}
