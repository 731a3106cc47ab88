//! List Products Handler

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response, http::StatusCode};

use crate::{
    extensions::*,
    products::ProductResponse,
    state::State,
    web::{Handler, WebError, respond},
};

/// `GET /products`
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListProducts;

#[async_trait]
impl Handler for ListProducts {
    #[tracing::instrument(name = "products.list", skip_all)]
    async fn call(
        &self,
        _req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let state = depot.obtain_or_500::<Arc<State>>()?;

        let products: Vec<ProductResponse> = state
            .app
            .products
            .list_products()
            .await?
            .into_iter()
            .map(ProductResponse::from)
            .collect();

        respond(res, StatusCode::OK, products)
    }
}
