//! Domain errors shared by every service.

use std::fmt::Display;

use serde::Serialize;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tracing::warn;

/// A single invalid request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("ID is not in its proper form")]
    InvalidIdentity(#[source] uuid::Error),

    #[error("not found")]
    NotFound,

    #[error("{message}")]
    ValidationFailed {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{operation} {}", id.as_deref().unwrap_or("-"))]
    Unexpected {
        operation: &'static str,
        id: Option<String>,
        #[source]
        source: Error,
    },
}

impl ServiceError {
    /// Field level validation failure.
    #[must_use]
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self::ValidationFailed {
            message: "field validation error".to_string(),
            fields,
        }
    }

    /// Classify a storage failure raised while running `operation` against
    /// the entity identified by `id`.
    pub fn storage(operation: &'static str, id: Option<&dyn Display>) -> impl FnOnce(Error) -> Self {
        let id = id.map(ToString::to_string);

        move |error| Self::classify(operation, id, error)
    }

    fn classify(operation: &'static str, id: Option<String>, error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database) = error.as_database_error() else {
            return Self::unexpected(operation, id, error);
        };

        match database.kind() {
            ErrorKind::ForeignKeyViolation => Self::validation(vec![FieldError::new(
                "product_id",
                "does not reference an existing product",
            )]),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                // Constraint text names tables and columns; it stays in the logs.
                warn!(
                    operation,
                    id = id.as_deref().unwrap_or("-"),
                    constraint = database.constraint().unwrap_or("-"),
                    "storage rejected data: {}",
                    database.message()
                );

                Self::ValidationFailed {
                    message: "invalid data".to_string(),
                    fields: Vec::new(),
                }
            }
            _ => Self::unexpected(operation, id, error),
        }
    }

    fn unexpected(operation: &'static str, id: Option<String>, source: Error) -> Self {
        Self::Unexpected {
            operation,
            id,
            source,
        }
    }
}
