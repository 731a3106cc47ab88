//! HTTP error values and the wire envelope.

use std::error::Error as StdError;

use salvo::{Response, http::StatusCode, prelude::Json};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_app::domain::errors::{FieldError, ServiceError};

type Source = Box<dyn StdError + Send + Sync + 'static>;

/// Failure returned by a handler, carrying the status it maps to.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct WebError {
    status: StatusCode,
    message: String,
    fields: Vec<FieldError>,
    #[source]
    source: Option<Source>,
}

/// Error body sent on every failed request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct ErrorEnvelope {
    pub error: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EnvelopeField>,
}

/// A single invalid field within an [`ErrorEnvelope`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct EnvelopeField {
    pub field: String,
    pub error: String,
}

impl WebError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            fields: Vec::new(),
            source: None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// A 500 whose detail is kept for logs only.
    pub(crate) fn internal(context: impl Into<String>, source: impl Into<Source>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, context).with_source(source)
    }

    /// Request body could not be decoded.
    pub(crate) fn decode(source: impl Into<Source>) -> Self {
        let source = source.into();

        Self::bad_request(format!("unable to decode request body: {source}")).with_source(source)
    }

    #[must_use]
    pub(crate) fn with_source(mut self, source: impl Into<Source>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    /// The body the client sees. Server errors never leak their message.
    pub(crate) fn envelope(&self) -> ErrorEnvelope {
        let error = if self.status.is_server_error() {
            self.status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            self.message.clone()
        };

        ErrorEnvelope {
            error,
            fields: self
                .fields
                .iter()
                .map(|field| EnvelopeField {
                    field: field.field.clone(),
                    error: field.error.clone(),
                })
                .collect(),
        }
    }

    /// Writes the status and envelope.
    pub(crate) fn render(&self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.envelope()));
    }

    /// Full `source` chain, for logging.
    pub(crate) fn chain(&self) -> String {
        let mut chain = self.message.clone();
        let mut next = StdError::source(self);

        while let Some(source) = next {
            chain.push_str(": ");
            chain.push_str(&source.to_string());
            next = source.source();
        }

        chain
    }
}

impl From<ServiceError> for WebError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound => Self::new(StatusCode::NOT_FOUND, error.to_string()),
            ServiceError::InvalidIdentity(_) => Self::bad_request(error.to_string()).with_source(error),
            ServiceError::ValidationFailed { message, fields } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                fields,
                source: None,
            },
            ServiceError::Unexpected { .. } => Self::internal(error.to_string(), error),
        }
    }
}
