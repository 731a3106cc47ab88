//! Create Product Handler

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use salvo::{
    Depot, Request, Response,
    http::{StatusCode, header::LOCATION},
};
use serde::{Deserialize, Serialize};

use stockroom_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::ProductResponse,
    state::State,
    web::{Handler, WebError, respond},
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub cost: i32,
    pub quantity: i32,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            cost: request.cost,
            quantity: request.quantity,
        }
    }
}

/// `POST /products`
#[derive(Debug, Clone, Copy)]
pub(crate) struct CreateProduct;

#[async_trait]
impl Handler for CreateProduct {
    #[tracing::instrument(name = "products.create", skip_all)]
    async fn call(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
    ) -> Result<(), WebError> {
        let request = req.json_body::<CreateProductRequest>().await?;
        let state = depot.obtain_or_500::<Arc<State>>()?;

        let product = state
            .app
            .products
            .create_product(request.into(), Timestamp::now())
            .await?;

        res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
            .or_500("failed to set location header")?;

        respond(res, StatusCode::CREATED, ProductResponse::from(product))
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use stockroom_app::domain::{
        errors::{FieldError, ServiceError},
        products::{MockProductsService, models::ProductUuid},
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut repo = MockProductsService::new();

        repo.expect_create_product()
            .once()
            .withf(|new, _| {
                *new == NewProduct {
                    name: "Comic Books".to_string(),
                    cost: 50,
                    quantity: 42,
                }
            })
            .return_once(move |_, _| Ok(product));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Comic Books", "cost": 50, "quantity": 42 }))
            .send(&products_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.name, "Comic Books");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_decodes_body_without_json_content_type() -> TestResult {
        let payload = r#"{ "name": "Comic Books", "cost": 50, "quantity": 42 }"#;

        for request in [
            TestClient::post("http://example.com/products").body(payload),
            TestClient::post("http://example.com/products").text(payload),
        ] {
            let uuid = ProductUuid::new();
            let product = make_product(uuid);

            let mut repo = MockProductsService::new();

            repo.expect_create_product()
                .once()
                .withf(|new, _| new.name == "Comic Books" && new.cost == 50 && new.quantity == 42)
                .return_once(move |_, _| Ok(product));

            let res = request.send(&products_service(repo)).await;

            assert_eq!(res.status_code, Some(StatusCode::CREATED));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unparseable_body_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .raw_json("{ \"name\": \"Comic Books\", ")
            .send(&products_service(repo))
            .await;

        let body: Value = res.take_json().await?;
        let error = body.get("error").and_then(Value::as_str).unwrap_or_default();

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!error.is_empty(), "expected a non-empty error message");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_wrong_field_type_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Comic Books", "cost": "fifty", "quantity": 42 }))
            .send(&products_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_validation_failure_returns_fields() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_create_product().once().return_once(|_, _| {
            Err(ServiceError::validation(vec![FieldError::new(
                "quantity",
                "must be greater than or equal to 1",
            )]))
        });

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Comic Books", "cost": 50, "quantity": 0 }))
            .send(&products_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            json!({
                "error": "field validation error",
                "fields": [{ "field": "quantity", "error": "must be greater than or equal to 1" }]
            })
        );

        Ok(())
    }
}
