//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{Router, http::Method};

use crate::{
    healthcheck::Health,
    middleware::{Errors, RecordMetrics, RequestLog},
    observability::{Metrics, MetricsEndpoint},
    products, sales,
    web::{App, RouteError},
};

/// Every API route, each wrapped in request logging, error translation and
/// metrics (outermost first). `/metrics` sits outside the chain.
pub(crate) fn app_router(
    metrics: Arc<Metrics>,
    slow_request_threshold: Duration,
) -> Result<Router, RouteError> {
    let app = App::new(vec![
        Arc::new(RequestLog::new(slow_request_threshold)),
        Arc::new(Errors),
        Arc::new(RecordMetrics::new(metrics.clone())),
    ])
    .handle(Method::GET, "/health", Health)
    .handle(Method::GET, "/products", products::ListProducts)
    .handle(Method::POST, "/products", products::CreateProduct)
    .handle(Method::GET, "/products/{id}", products::RetrieveProduct)
    .handle(Method::PUT, "/products/{id}", products::UpdateProduct)
    .handle(Method::DELETE, "/products/{id}", products::DeleteProduct)
    .handle(Method::POST, "/products/{id}/sales", sales::CreateSale)
    .handle(Method::GET, "/products/{id}/sales", sales::ListSales);

    Ok(app
        .into_router()?
        .push(Router::with_path("metrics").get(MetricsEndpoint::new(metrics))))
}
