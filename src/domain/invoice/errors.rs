use thiserror::Error;

use super::builder::BuildError;
use super::validation::ValidationError;
use super::value_objects::{InvoiceId, ValueObjectError};

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("{0}")]
  Malformed(#[from] BuildError),

  #[error("{}", format_validation_errors(.0))]
  Validation(Vec<ValidationError>),

  #[error("Invalid value: {0}")]
  InvalidValue(#[from] ValueObjectError),

  #[error("Factura no encontrada")]
  NotFound(InvoiceId),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Storage I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Storage encoding error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Export failed: {0}")]
  Export(String),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
  errors
    .iter()
    .map(|error| error.to_string())
    .collect::<Vec<_>>()
    .join(". ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_validation_errors_join_into_one_message() {
    let error = InvoiceError::Validation(vec![
      ValidationError::MissingClient,
      ValidationError::InvalidArea { line: 1 },
    ]);
    assert_eq!(
      error.to_string(),
      "El nombre del cliente es requerido. El área del servicio 1 debe ser mayor a 0"
    );
  }

  #[test]
  fn test_not_found_uses_the_historical_message() {
    let error = InvoiceError::NotFound(InvoiceId::generate());
    assert_eq!(error.to_string(), "Factura no encontrada");
  }

  #[test]
  fn test_build_errors_pass_their_message_through() {
    let error = InvoiceError::from(BuildError::InvalidLevels("dos".to_string()));
    assert_eq!(
      error.to_string(),
      "El número de niveles no es un entero válido: 'dos'"
    );
  }
}
