//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use stockroom_app::{
    context::AppContext,
    database::MockStatusCheck,
    domain::{
        errors::ServiceError,
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        sales::MockSalesService,
    },
};

use crate::{observability::Metrics, router, state::State};

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Comic Books".to_string(),
        cost: 50,
        quantity: 42,
        sold: 6,
        revenue: 400,
        date_created: Timestamp::UNIX_EPOCH,
        date_updated: Timestamp::UNIX_EPOCH,
    }
}

/// The error services return for a malformed `id`.
pub(crate) fn invalid_identity(id: &str) -> ServiceError {
    match id.parse::<ProductUuid>() {
        Err(source) => ServiceError::InvalidIdentity(source),
        Ok(_) => ServiceError::NotFound,
    }
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_retrieve_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_sales_mock() -> MockSalesService {
    let mut sales = MockSalesService::new();

    sales.expect_add_sale().never();
    sales.expect_list_sales().never();

    sales
}

pub(crate) fn strict_status_mock() -> MockStatusCheck {
    let mut status = MockStatusCheck::new();

    status.expect_status_check().never();

    status
}

/// The production route table and middleware chain over mocked services.
pub(crate) fn service(
    products: MockProductsService,
    sales: MockSalesService,
    status: MockStatusCheck,
) -> Service {
    let state = State::from_app_context(AppContext {
        products: Arc::new(products),
        sales: Arc::new(sales),
        status: Arc::new(status),
    });

    let metrics = Arc::new(Metrics::new(100).expect("Failed to build metrics registry"));

    Service::new(
        Router::new()
            .hoop(inject(state))
            .push(
                router::app_router(metrics, Duration::from_secs(1))
                    .expect("Failed to build route table"),
            ),
    )
}

pub(crate) fn products_service(products: MockProductsService) -> Service {
    service(products, strict_sales_mock(), strict_status_mock())
}

pub(crate) fn sales_service(sales: MockSalesService) -> Service {
    service(strict_products_mock(), sales, strict_status_mock())
}

pub(crate) fn status_service(status: MockStatusCheck) -> Service {
    service(strict_products_mock(), strict_sales_mock(), status)
}
