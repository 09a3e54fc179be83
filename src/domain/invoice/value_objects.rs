use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice id: {0}")]
  InvalidInvoiceId(String),
}

// Invoice Id - opaque storage key, assigned once and never recycled
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(String);

impl InvoiceId {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceId(
        "Invoice id cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Design Catalog - maps design type codes to their display labels.
// The set of codes is configuration, not a closed enumeration: codes
// without a catalog entry pass through unchanged so historical records
// and future design disciplines keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignCatalog {
  entries: Vec<(String, String)>,
}

impl DesignCatalog {
  pub fn new<I, S>(entries: I) -> Self
  where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(code, label)| (code.into(), label.into()))
        .collect(),
    }
  }

  /// Display label for a design type code; unknown codes pass through.
  pub fn label_for(&self, code: &str) -> String {
    self
      .entries
      .iter()
      .find(|(known, _)| known == code)
      .map(|(_, label)| label.clone())
      .unwrap_or_else(|| code.to_string())
  }

  pub fn contains(&self, code: &str) -> bool {
    self.entries.iter().any(|(known, _)| known == code)
  }

  pub fn codes(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(code, _)| code.as_str())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl Default for DesignCatalog {
  fn default() -> Self {
    Self::new([
      ("pluvial", "Diseño Pluvial"),
      ("vial", "Diseño Vial"),
      ("estructural", "Diseño Estructural"),
      ("sanitario", "Diseño Sanitario"),
      ("electrico", "Diseño Eléctrico"),
    ])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invoice_id() {
    assert!(InvoiceId::new("abc-123".to_string()).is_ok());
    assert!(InvoiceId::new("".to_string()).is_err());
    assert!(InvoiceId::new("   ".to_string()).is_err());
    assert_eq!(
      InvoiceId::new("  inv-9  ".to_string()).unwrap().value(),
      "inv-9"
    );
  }

  #[test]
  fn test_invoice_id_generate_is_unique_and_non_empty() {
    let a = InvoiceId::generate();
    let b = InvoiceId::generate();
    assert!(!a.value().is_empty());
    assert_ne!(a, b);
  }

  #[test]
  fn test_catalog_maps_known_codes() {
    let catalog = DesignCatalog::default();
    assert_eq!(catalog.label_for("sanitario"), "Diseño Sanitario");
    assert_eq!(catalog.label_for("electrico"), "Diseño Eléctrico");
    assert_eq!(catalog.label_for("pluvial"), "Diseño Pluvial");
    assert_eq!(catalog.len(), 5);
  }

  #[test]
  fn test_catalog_passes_unknown_codes_through() {
    let catalog = DesignCatalog::default();
    assert_eq!(catalog.label_for("topografico"), "topografico");
    assert!(!catalog.contains("topografico"));
    assert!(catalog.contains("vial"));
  }

  #[test]
  fn test_catalog_from_configuration_entries() {
    let catalog = DesignCatalog::new([("solar", "Diseño Solar")]);
    assert_eq!(catalog.label_for("solar"), "Diseño Solar");
    // Codes outside the configured set still pass through.
    assert_eq!(catalog.label_for("sanitario"), "sanitario");
    assert_eq!(catalog.codes().collect::<Vec<_>>(), vec!["solar"]);
  }
}
