//! Product Models

use jiff::Timestamp;

use crate::{
    domain::errors::{FieldError, ServiceError},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub cost: i32,
    pub quantity: i32,
    /// Units sold across all recorded sales.
    pub sold: i64,
    /// Sum paid across all recorded sales.
    pub revenue: i64,
    pub date_created: Timestamp,
    pub date_updated: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub cost: i32,
    pub quantity: i32,
}

impl NewProduct {
    /// Check the payload against the product field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] listing every offending field.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut fields = Vec::new();

        check_name(&self.name, &mut fields);
        check_cost(self.cost, &mut fields);
        check_quantity(self.quantity, &mut fields);

        into_result(fields)
    }
}

/// Product Update Model
///
/// `None` leaves the stored value untouched, `Some` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub cost: Option<i32>,
    pub quantity: Option<i32>,
}

impl ProductUpdate {
    /// Check the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] listing every offending field.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut fields = Vec::new();

        if let Some(name) = &self.name {
            check_name(name, &mut fields);
        }

        if let Some(cost) = self.cost {
            check_cost(cost, &mut fields);
        }

        if let Some(quantity) = self.quantity {
            check_quantity(quantity, &mut fields);
        }

        into_result(fields)
    }

    /// Merge the patch over `product`, stamping the update time.
    ///
    /// The update time never moves backwards, even when `now` is older than
    /// the stored value.
    #[must_use]
    pub fn apply(self, mut product: Product, now: Timestamp) -> Product {
        if let Some(name) = self.name {
            product.name = name;
        }

        if let Some(cost) = self.cost {
            product.cost = cost;
        }

        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }

        product.date_updated = product.date_updated.max(now);

        product
    }
}

fn check_name(name: &str, fields: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        fields.push(FieldError::new("name", "is required"));
    }
}

fn check_cost(cost: i32, fields: &mut Vec<FieldError>) {
    if cost < 0 {
        fields.push(FieldError::new("cost", "must be greater than or equal to 0"));
    }
}

fn check_quantity(quantity: i32, fields: &mut Vec<FieldError>) {
    if quantity < 1 {
        fields.push(FieldError::new(
            "quantity",
            "must be greater than or equal to 1",
        ));
    }
}

fn into_result(fields: Vec<FieldError>) -> Result<(), ServiceError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::validation(fields))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(now: Timestamp) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: "Comic Books".to_string(),
            cost: 50,
            quantity: 42,
            sold: 0,
            revenue: 0,
            date_created: now,
            date_updated: now,
        }
    }

    #[test]
    fn new_product_collects_every_invalid_field() {
        let result = NewProduct {
            name: "  ".to_string(),
            cost: -1,
            quantity: 0,
        }
        .validate();

        let Err(ServiceError::ValidationFailed { fields, .. }) = result else {
            unreachable!("expected ValidationFailed, got {result:?}");
        };

        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();

        assert_eq!(names, ["name", "cost", "quantity"]);
    }

    #[test]
    fn new_product_accepts_zero_cost() {
        let result = NewProduct {
            name: "Freebie".to_string(),
            cost: 0,
            quantity: 1,
        }
        .validate();

        assert!(result.is_ok(), "expected zero cost to be valid");
    }

    #[test]
    fn update_only_checks_present_fields() {
        let update = ProductUpdate {
            cost: Some(10),
            ..ProductUpdate::default()
        };

        assert!(update.validate().is_ok(), "absent fields must not be checked");
    }

    #[test]
    fn update_rejects_explicit_empty_name() {
        let update = ProductUpdate {
            name: Some(String::new()),
            ..ProductUpdate::default()
        };

        assert!(
            matches!(update.validate(), Err(ServiceError::ValidationFailed { .. })),
            "explicit empty name must be rejected"
        );
    }

    #[test]
    fn apply_merges_present_fields_only() -> TestResult {
        let created: Timestamp = "2026-01-01T00:00:00Z".parse()?;
        let now: Timestamp = "2026-02-01T00:00:00Z".parse()?;

        let updated = ProductUpdate {
            cost: Some(99),
            ..ProductUpdate::default()
        }
        .apply(product(created), now);

        assert_eq!(updated.name, "Comic Books");
        assert_eq!(updated.cost, 99);
        assert_eq!(updated.quantity, 42);
        assert_eq!(updated.date_created, created);
        assert_eq!(updated.date_updated, now);

        Ok(())
    }

    #[test]
    fn apply_never_moves_update_time_backwards() -> TestResult {
        let created: Timestamp = "2026-03-01T00:00:00Z".parse()?;
        let earlier: Timestamp = "2026-01-01T00:00:00Z".parse()?;

        let updated = ProductUpdate::default().apply(product(created), earlier);

        assert_eq!(updated.date_updated, created);

        Ok(())
    }
}
