//! List Sales Handler

use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, Request, Response, http::StatusCode};

use crate::{
    extensions::*,
    sales::SaleResponse,
    state::State,
    web::{Handler, WebError, respond},
};

/// `GET /products/{id}/sales`
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListSales;

#[async_trait]
impl Handler for ListSales {
    #[tracing::instrument(name = "sales.list", skip_all, fields(product_id = tracing::field::Empty))]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let id = req.id_param();

        tracing::Span::current().record("product_id", id.as_str());

        let state = depot.obtain_or_500::<Arc<State>>()?;

        let sales = state.app.sales.list_sales(&id).await?;

        respond(
            res,
            StatusCode::OK,
            sales
                .into_iter()
                .map(SaleResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}
