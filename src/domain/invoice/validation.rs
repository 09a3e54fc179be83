use std::fmt;

use rust_decimal::Decimal;

use super::entities::InvoiceDraft;

/// One violated business rule. Line-scoped variants carry the 1-indexed
/// position used in the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  MissingClient,
  MissingEmail,
  InvalidEmail,
  MissingProject,
  MissingDueDate,
  NoServiceLines,
  InvalidArea { line: usize },
  InvalidPrice { line: usize },
}

impl ValidationError {
  pub fn code(&self) -> &'static str {
    match self {
      ValidationError::MissingClient => "missing_client",
      ValidationError::MissingEmail => "missing_email",
      ValidationError::InvalidEmail => "invalid_email",
      ValidationError::MissingProject => "missing_project",
      ValidationError::MissingDueDate => "missing_due_date",
      ValidationError::NoServiceLines => "no_service_lines",
      ValidationError::InvalidArea { .. } => "invalid_area",
      ValidationError::InvalidPrice { .. } => "invalid_price",
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::MissingClient => write!(f, "El nombre del cliente es requerido"),
      ValidationError::MissingEmail => write!(f, "El email es requerido"),
      ValidationError::InvalidEmail => write!(f, "El email no es válido"),
      ValidationError::MissingProject => write!(f, "El nombre del proyecto es requerido"),
      ValidationError::MissingDueDate => write!(f, "La fecha de vencimiento es requerida"),
      ValidationError::NoServiceLines => write!(f, "Debe agregar al menos un servicio"),
      ValidationError::InvalidArea { line } => {
        write!(f, "El área del servicio {} debe ser mayor a 0", line)
      }
      ValidationError::InvalidPrice { line } => {
        write!(f, "El precio del servicio {} debe ser mayor a 0", line)
      }
    }
  }
}

/// Simple `local@domain.tld` shape: ASCII, no whitespace, exactly one
/// `@`, a non-empty local part, and at least one `.` strictly inside the
/// domain part.
pub fn is_valid_email(value: &str) -> bool {
  if !value.is_ascii() || value.chars().any(|c| c.is_whitespace()) {
    return false;
  }
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain.len() >= 3 && domain[1..domain.len() - 1].contains('.')
}

/// Check a draft against every business rule and report all violations
/// together, in a fixed order: client, email, project, due date, the
/// empty-lines rule, then per-line area/price checks in line order.
/// The draft is never mutated; success returns it to the caller as-is.
pub fn validate(draft: &InvoiceDraft) -> Result<(), Vec<ValidationError>> {
  let mut errors = Vec::new();

  if draft.client.trim().is_empty() {
    errors.push(ValidationError::MissingClient);
  }

  if draft.email.trim().is_empty() {
    errors.push(ValidationError::MissingEmail);
  } else if !is_valid_email(&draft.email) {
    errors.push(ValidationError::InvalidEmail);
  }

  if draft.project.trim().is_empty() {
    errors.push(ValidationError::MissingProject);
  }

  if draft.due_date.is_none() {
    errors.push(ValidationError::MissingDueDate);
  }

  if draft.service_lines.is_empty() {
    errors.push(ValidationError::NoServiceLines);
  }

  for (index, line) in draft.service_lines.iter().enumerate() {
    if line.area <= Decimal::ZERO {
      errors.push(ValidationError::InvalidArea { line: index + 1 });
    }
    if line.unit_price <= Decimal::ZERO {
      errors.push(ValidationError::InvalidPrice { line: index + 1 });
    }
  }

  if errors.is_empty() { Ok(()) } else { Err(errors) }
}
