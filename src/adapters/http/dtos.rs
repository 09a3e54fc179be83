use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::invoice::{AdjustmentInput, Invoice, InvoiceForm, ServiceLineInput};

/// Draft invoice payload, wire names matching the records the historical
/// client produced (`cliente`, `servicios`, `fechaEmision`, ...).
///
/// Deliberately tolerant: absent fields default to empty so a sparse
/// payload still reaches the build/validate pipeline, where the real
/// rules live. A client-supplied `total` is ignored; the stored total
/// is always recomputed server-side from the service lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveInvoiceRequest {
  #[serde(rename = "cliente", default)]
  pub client: String,
  #[serde(default)]
  pub email: String,
  #[serde(rename = "proyecto", default)]
  pub project: String,
  #[serde(rename = "niveles", default)]
  pub levels: Option<u32>,
  #[serde(rename = "fechaEmision", default)]
  pub issue_date: String,
  #[serde(rename = "fechaVencimiento", default)]
  pub due_date: String,
  #[serde(rename = "servicios", default)]
  pub service_lines: Vec<ServiceLineDto>,
  #[serde(rename = "ajuste", default, with = "rust_decimal::serde::float_option")]
  pub adjustment: Option<Decimal>,
  #[serde(rename = "ajusteDescripcion", default)]
  pub adjustment_description: Option<String>,
  #[serde(rename = "documentosRequeridos", default)]
  pub required_documents: String,
  #[serde(rename = "documentosEntregar", default)]
  pub deliverable_documents: String,
  #[serde(rename = "notas", default)]
  pub notes: String,
}

/// One service line of a draft payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceLineDto {
  #[serde(rename = "tipo", default)]
  pub design_type: String,
  #[serde(rename = "nivel", default)]
  pub level: Option<u32>,
  #[serde(default, with = "rust_decimal::serde::float_option")]
  pub area: Option<Decimal>,
  #[serde(rename = "precio", default, with = "rust_decimal::serde::float_option")]
  pub unit_price: Option<Decimal>,
}

impl SaveInvoiceRequest {
  /// Lower the payload to the raw entry-form shape. Every entry path,
  /// HTTP or otherwise, funnels through the same builder, so typing
  /// and pricing rules are applied in exactly one place.
  pub fn into_form(self) -> InvoiceForm {
    InvoiceForm {
      client: self.client,
      email: self.email,
      project: self.project,
      levels: self.levels.map(|value| value.to_string()).unwrap_or_default(),
      issue_date: self.issue_date,
      due_date: self.due_date,
      lines: self
        .service_lines
        .into_iter()
        .map(ServiceLineDto::into_input)
        .collect(),
      adjustment: Some(AdjustmentInput {
        amount: self
          .adjustment
          .map(|value| value.to_string())
          .unwrap_or_default(),
        description: self.adjustment_description.unwrap_or_default(),
      }),
      required_documents: self.required_documents,
      deliverable_documents: self.deliverable_documents,
      notes: self.notes,
    }
  }
}

impl ServiceLineDto {
  fn into_input(self) -> ServiceLineInput {
    ServiceLineInput {
      design_type: self.design_type,
      level: self.level.map(|value| value.to_string()).unwrap_or_default(),
      area: self.area.map(|value| value.to_string()).unwrap_or_default(),
      unit_price: self
        .unit_price
        .map(|value| value.to_string())
        .unwrap_or_default(),
    }
  }
}

/// Query string of the search endpoint; a missing `q` means "all".
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
  #[serde(default)]
  pub q: String,
}

/// Response wrapping a stored invoice after a create or update.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceEnvelope {
  pub success: bool,
  pub invoice: Invoice,
}

impl InvoiceEnvelope {
  pub fn new(invoice: Invoice) -> Self {
    Self {
      success: true,
      invoice,
    }
  }
}

/// Bare acknowledgement, used by delete.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
  pub success: bool,
}

impl SuccessEnvelope {
  pub fn new() -> Self {
    Self { success: true }
  }
}

impl Default for SuccessEnvelope {
  fn default() -> Self {
    Self::new()
  }
}

/// Failure envelope for mutations: a joined message plus the individual
/// rule messages when a validation pass produced several.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
  pub success: bool,
  pub error: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub details: Vec<String>,
}

/// Minimal error body used by lookups and internal failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub error: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_full_payload_maps_wire_names() {
    let request: SaveInvoiceRequest = serde_json::from_value(json!({
      "cliente": "Juan Pérez",
      "email": "juan@x.com",
      "proyecto": "Casa X",
      "niveles": 2,
      "fechaEmision": "2025-01-30",
      "fechaVencimiento": "2025-03-01",
      "servicios": [
        {"tipo": "sanitario", "nivel": 1, "area": 100, "precio": 50}
      ],
      "ajuste": -500,
      "ajusteDescripcion": "Descuento",
      "total": 4500,
      "documentosRequeridos": "Planos",
      "documentosEntregar": "Memoria",
      "notas": "Urgente"
    }))
    .unwrap();

    let form = request.into_form();
    assert_eq!(form.client, "Juan Pérez");
    assert_eq!(form.levels, "2");
    assert_eq!(form.issue_date, "2025-01-30");
    assert_eq!(form.lines.len(), 1);
    assert_eq!(form.lines[0].design_type, "sanitario");
    assert_eq!(form.lines[0].level, "1");
    assert_eq!(form.lines[0].area, "100");
    assert_eq!(form.lines[0].unit_price, "50");

    let adjustment = form.adjustment.unwrap();
    assert_eq!(adjustment.amount, "-500");
    assert_eq!(adjustment.description, "Descuento");
  }

  #[test]
  fn test_sparse_payload_defaults_to_empty_form() {
    let request: SaveInvoiceRequest = serde_json::from_value(json!({})).unwrap();
    let form = request.into_form();

    assert_eq!(form.client, "");
    assert_eq!(form.levels, "");
    assert_eq!(form.issue_date, "");
    assert!(form.lines.is_empty());
    assert_eq!(form.adjustment.unwrap().amount, "");
  }

  #[test]
  fn test_null_numerics_are_tolerated() {
    let request: SaveInvoiceRequest = serde_json::from_value(json!({
      "cliente": "Juan Pérez",
      "niveles": null,
      "ajuste": null,
      "servicios": [{"tipo": "vial", "nivel": null, "area": null, "precio": null}]
    }))
    .unwrap();

    let form = request.into_form();
    assert_eq!(form.levels, "");
    assert_eq!(form.lines[0].area, "");
    assert_eq!(form.lines[0].unit_price, "");
  }

  #[test]
  fn test_fractional_amounts_round_trip_as_text() {
    let request: SaveInvoiceRequest = serde_json::from_value(json!({
      "servicios": [{"tipo": "pluvial", "nivel": 2, "area": 85.5, "precio": 40.25}]
    }))
    .unwrap();

    let form = request.into_form();
    assert_eq!(form.lines[0].area, "85.5");
    assert_eq!(form.lines[0].unit_price, "40.25");
  }

  #[test]
  fn test_error_envelope_skips_empty_details() {
    let envelope = ErrorEnvelope {
      success: false,
      error: "Factura no encontrada".to_string(),
      details: Vec::new(),
    };
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value, json!({"success": false, "error": "Factura no encontrada"}));
  }

  #[test]
  fn test_success_envelope_shape() {
    let value = serde_json::to_value(SuccessEnvelope::new()).unwrap();
    assert_eq!(value, json!({"success": true}));
  }
}
