//! Delete Product Handler

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response, http::StatusCode};

use crate::{
    extensions::*,
    state::State,
    web::{Handler, WebError, respond_empty},
};

/// `DELETE /products/{id}`
///
/// Deleting a product that does not exist still answers 204.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeleteProduct;

#[async_trait]
impl Handler for DeleteProduct {
    #[tracing::instrument(name = "products.delete", skip_all, fields(product_id = tracing::field::Empty))]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let id = req.id_param();

        tracing::Span::current().record("product_id", id.as_str());

        let state = depot.obtain_or_500::<Arc<State>>()?;

        state.app.products.delete_product(&id).await?;

        respond_empty(res, StatusCode::NO_CONTENT)
    }
}
