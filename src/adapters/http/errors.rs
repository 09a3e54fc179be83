use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::invoice::InvoiceError;

use super::dtos::{ErrorBody, ErrorEnvelope};

/// API error type that maps domain failures to HTTP responses.
///
/// Not-found comes in two body shapes for compatibility with the
/// records clients already parse: lookups answer with a bare
/// `{"error"}` object, mutations with the `{"success": false}`
/// envelope. Handlers pick the mapping with [`ApiError::read`] or
/// [`ApiError::mutation`].
#[derive(Debug)]
pub enum ApiError {
  /// Build or validation failure (400 Bad Request)
  Invalid {
    message: String,
    details: Vec<String>,
  },

  /// Missing record on a lookup (404, bare error body)
  NotFound { message: String },

  /// Missing record on a mutation (404, `{"success": false}` envelope)
  NotFoundEnvelope { message: String },

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl ApiError {
  /// Map a domain failure surfaced by a read endpoint.
  pub fn read(error: InvoiceError) -> Self {
    Self::from_domain(error, false)
  }

  /// Map a domain failure surfaced by a create, update or delete.
  pub fn mutation(error: InvoiceError) -> Self {
    Self::from_domain(error, true)
  }

  fn from_domain(error: InvoiceError, enveloped: bool) -> Self {
    let message = error.to_string();
    match error {
      InvoiceError::Validation(errors) => ApiError::Invalid {
        message,
        details: errors.iter().map(|error| error.to_string()).collect(),
      },
      InvoiceError::Malformed(_) | InvoiceError::InvalidValue(_) => ApiError::Invalid {
        message,
        details: Vec::new(),
      },
      InvoiceError::NotFound(_) if enveloped => ApiError::NotFoundEnvelope { message },
      InvoiceError::NotFound(_) => ApiError::NotFound { message },
      _ => ApiError::Internal(message),
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Invalid { message, .. } => write!(f, "Validation error: {}", message),
      ApiError::NotFound { message } | ApiError::NotFoundEnvelope { message } => {
        write!(f, "Not found: {}", message)
      }
      ApiError::Internal(message) => write!(f, "Internal error: {}", message),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Invalid { .. } => StatusCode::BAD_REQUEST,
      ApiError::NotFound { .. } | ApiError::NotFoundEnvelope { .. } => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    match self {
      ApiError::Invalid { message, details } => HttpResponse::build(status)
        .content_type(ContentType::json())
        .json(ErrorEnvelope {
          success: false,
          error: message.clone(),
          details: details.clone(),
        }),
      ApiError::NotFound { message } => HttpResponse::build(status)
        .content_type(ContentType::json())
        .json(ErrorBody {
          error: message.clone(),
        }),
      ApiError::NotFoundEnvelope { message } => HttpResponse::build(status)
        .content_type(ContentType::json())
        .json(ErrorEnvelope {
          success: false,
          error: message.clone(),
          details: Vec::new(),
        }),
      ApiError::Internal(message) => {
        // The cause goes to the log; the body stays generic.
        tracing::error!("Internal error: {}", message);
        HttpResponse::build(status)
          .content_type(ContentType::json())
          .json(ErrorBody {
            error: "Error interno del servidor".to_string(),
          })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{BuildError, InvoiceId, ValidationError};

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Invalid {
        message: "test".to_string(),
        details: Vec::new()
      }
      .status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound {
        message: "test".to_string()
      }
      .status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::NotFoundEnvelope {
        message: "test".to_string()
      }
      .status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_validation_mapping_collects_details() {
    let error = InvoiceError::Validation(vec![
      ValidationError::MissingClient,
      ValidationError::NoServiceLines,
    ]);

    match ApiError::mutation(error) {
      ApiError::Invalid { message, details } => {
        assert!(message.contains("El nombre del cliente es requerido"));
        assert_eq!(details.len(), 2);
      }
      other => panic!("expected Invalid, got {:?}", other),
    }
  }

  #[test]
  fn test_build_failures_are_bad_requests() {
    let error = InvoiceError::from(BuildError::InvalidLevels("dos".to_string()));
    let api_error = ApiError::mutation(error);
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_not_found_body_shape_depends_on_surface() {
    let id = InvoiceId::generate();

    let read = ApiError::read(InvoiceError::NotFound(id.clone()));
    assert!(matches!(read, ApiError::NotFound { .. }));

    let mutation = ApiError::mutation(InvoiceError::NotFound(id));
    assert!(matches!(mutation, ApiError::NotFoundEnvelope { .. }));
  }

  #[test]
  fn test_storage_failures_map_to_internal() {
    let error = InvoiceError::Io(std::io::Error::other("disk full"));
    let api_error = ApiError::read(error);
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
