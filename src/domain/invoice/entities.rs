use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::InvoiceId;

// ServiceLine - one priced design item. The subtotal is always derived
// from area and unit price at read time; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLine {
  #[serde(rename = "tipo")]
  pub design_type: String,
  #[serde(rename = "nivel")]
  pub level: u32,
  #[serde(with = "rust_decimal::serde::float")]
  pub area: Decimal,
  #[serde(rename = "precio", with = "rust_decimal::serde::float")]
  pub unit_price: Decimal,
}

impl ServiceLine {
  pub fn subtotal(&self) -> Decimal {
    self.area * self.unit_price
  }
}

// Adjustment - a single signed amount applied to the invoice total.
// A zero amount is canonically "no adjustment": the constructor refuses
// to produce one, so zero adjustments can never reach totals or exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
  pub amount: Decimal,
  pub description: String,
}

impl Adjustment {
  pub const DEFAULT_DESCRIPTION: &'static str = "Ajuste de pago";

  pub fn new(amount: Decimal, description: Option<String>) -> Option<Self> {
    if amount == Decimal::ZERO {
      return None;
    }
    let description = description
      .map(|d| d.trim().to_string())
      .filter(|d| !d.is_empty())
      .unwrap_or_else(|| Self::DEFAULT_DESCRIPTION.to_string());
    Some(Self {
      amount,
      description,
    })
  }

  pub fn is_discount(&self) -> bool {
    self.amount < Decimal::ZERO
  }
}

/// An invoice before the store has assigned identity and timestamps.
///
/// Produced by the record builder, checked by the validator, and handed
/// to the store, which turns it into a persisted [`Invoice`]. The due
/// date stays optional here so a missing one surfaces as a validation
/// error rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
  #[serde(rename = "cliente")]
  pub client: String,
  pub email: String,
  #[serde(rename = "proyecto")]
  pub project: String,
  #[serde(rename = "niveles")]
  pub levels: u32,
  #[serde(rename = "fechaEmision")]
  pub issue_date: NaiveDate,
  #[serde(rename = "fechaVencimiento")]
  pub due_date: Option<NaiveDate>,
  #[serde(rename = "servicios")]
  pub service_lines: Vec<ServiceLine>,
  #[serde(rename = "ajuste", default, with = "rust_decimal::serde::float")]
  pub adjustment_amount: Decimal,
  #[serde(
    rename = "ajusteDescripcion",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub adjustment_description: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
  #[serde(rename = "documentosRequeridos", default)]
  pub required_documents: String,
  #[serde(rename = "documentosEntregar", default)]
  pub deliverable_documents: String,
  #[serde(rename = "notas", default)]
  pub notes: String,
}

impl InvoiceDraft {
  pub fn adjustment(&self) -> Option<Adjustment> {
    Adjustment::new(self.adjustment_amount, self.adjustment_description.clone())
  }

  /// Default due date offered by the entry form: thirty days after issue.
  pub fn default_due_date(issue_date: NaiveDate) -> NaiveDate {
    issue_date + Duration::days(30)
  }
}

/// A persisted invoice record. Identity and timestamps belong to the
/// store; everything else is a full replacement of the draft on every
/// create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: InvoiceId,
  #[serde(rename = "cliente")]
  pub client: String,
  pub email: String,
  #[serde(rename = "proyecto")]
  pub project: String,
  #[serde(rename = "niveles")]
  pub levels: u32,
  #[serde(rename = "fechaEmision")]
  pub issue_date: NaiveDate,
  #[serde(rename = "fechaVencimiento")]
  pub due_date: NaiveDate,
  #[serde(rename = "servicios")]
  pub service_lines: Vec<ServiceLine>,
  #[serde(rename = "ajuste", default, with = "rust_decimal::serde::float")]
  pub adjustment_amount: Decimal,
  #[serde(
    rename = "ajusteDescripcion",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub adjustment_description: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
  #[serde(rename = "documentosRequeridos", default)]
  pub required_documents: String,
  #[serde(rename = "documentosEntregar", default)]
  pub deliverable_documents: String,
  #[serde(rename = "notas", default)]
  pub notes: String,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  /// Materialize a record from a validated draft. A draft that somehow
  /// reaches the store without a due date falls back to the entry form
  /// default of issue date + 30 days.
  pub fn from_draft(
    draft: InvoiceDraft,
    id: InvoiceId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    let due_date = draft
      .due_date
      .unwrap_or_else(|| InvoiceDraft::default_due_date(draft.issue_date));
    Self {
      id,
      client: draft.client,
      email: draft.email,
      project: draft.project,
      levels: draft.levels,
      issue_date: draft.issue_date,
      due_date,
      service_lines: draft.service_lines,
      adjustment_amount: draft.adjustment_amount,
      adjustment_description: draft.adjustment_description,
      total: draft.total,
      required_documents: draft.required_documents,
      deliverable_documents: draft.deliverable_documents,
      notes: draft.notes,
      created_at,
      updated_at,
    }
  }

  pub fn adjustment(&self) -> Option<Adjustment> {
    Adjustment::new(self.adjustment_amount, self.adjustment_description.clone())
  }

  /// Case-insensitive substring match over client, project and email,
  /// the union the search endpoint promises. An empty query matches all.
  pub fn matches_search(&self, query: &str) -> bool {
    let needle = query.to_lowercase();
    self.client.to_lowercase().contains(&needle)
      || self.project.to_lowercase().contains(&needle)
      || self.email.to_lowercase().contains(&needle)
  }
}

// InvoiceStats - aggregate figures over the stored records.
// Calculated on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStats {
  #[serde(rename = "totalInvoices")]
  pub total_invoices: u64,
  #[serde(rename = "totalAmount", with = "rust_decimal::serde::float")]
  pub total_amount: Decimal,
  #[serde(rename = "avgAmount", with = "rust_decimal::serde::float")]
  pub avg_amount: Decimal,
}

impl InvoiceStats {
  pub fn from_invoices(invoices: &[Invoice]) -> Self {
    Self::from_totals(
      invoices.len() as u64,
      invoices.iter().map(|invoice| invoice.total).sum(),
    )
  }

  /// Aggregate figures from a pre-computed count and sum. The average of
  /// an empty collection is zero, not a division error.
  pub fn from_totals(total_invoices: u64, total_amount: Decimal) -> Self {
    let avg_amount = if total_invoices > 0 {
      total_amount / Decimal::from(total_invoices)
    } else {
      Decimal::ZERO
    };
    Self {
      total_invoices,
      total_amount,
      avg_amount,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn sample_draft() -> InvoiceDraft {
    InvoiceDraft {
      client: "Juan Pérez".to_string(),
      email: "juan@x.com".to_string(),
      project: "Casa X".to_string(),
      levels: 2,
      issue_date: NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
      due_date: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
      service_lines: vec![
        ServiceLine {
          design_type: "Diseño Sanitario".to_string(),
          level: 1,
          area: dec!(100),
          unit_price: dec!(50),
        },
        ServiceLine {
          design_type: "Diseño Eléctrico".to_string(),
          level: 1,
          area: dec!(100),
          unit_price: dec!(30),
        },
      ],
      adjustment_amount: Decimal::ZERO,
      adjustment_description: None,
      total: dec!(8000),
      required_documents: String::new(),
      deliverable_documents: String::new(),
      notes: String::new(),
    }
  }

  #[test]
  fn test_service_line_subtotal_is_derived() {
    let line = ServiceLine {
      design_type: "Diseño Pluvial".to_string(),
      level: 2,
      area: dec!(85.5),
      unit_price: dec!(40),
    };
    assert_eq!(line.subtotal(), dec!(3420.0));
  }

  #[test]
  fn test_zero_adjustment_is_no_adjustment() {
    assert!(Adjustment::new(Decimal::ZERO, Some("cualquier cosa".to_string())).is_none());
    assert!(Adjustment::new(Decimal::ZERO, None).is_none());
  }

  #[test]
  fn test_adjustment_description_defaults() {
    let adjustment = Adjustment::new(dec!(-500), None).unwrap();
    assert_eq!(adjustment.description, Adjustment::DEFAULT_DESCRIPTION);
    assert!(adjustment.is_discount());

    let blank = Adjustment::new(dec!(100), Some("   ".to_string())).unwrap();
    assert_eq!(blank.description, Adjustment::DEFAULT_DESCRIPTION);

    let named = Adjustment::new(dec!(100), Some("Recargo".to_string())).unwrap();
    assert_eq!(named.description, "Recargo");
    assert!(!named.is_discount());
  }

  #[test]
  fn test_from_draft_assigns_identity_and_timestamps() {
    let draft = sample_draft();
    let id = InvoiceId::generate();
    let now = Utc::now();
    let invoice = Invoice::from_draft(draft.clone(), id.clone(), now, now);

    assert_eq!(invoice.id, id);
    assert_eq!(invoice.created_at, now);
    assert_eq!(invoice.updated_at, now);
    assert_eq!(invoice.total, draft.total);
    assert_eq!(invoice.due_date, draft.due_date.unwrap());
    assert_eq!(invoice.service_lines.len(), 2);
  }

  #[test]
  fn test_from_draft_falls_back_to_default_due_date() {
    let mut draft = sample_draft();
    draft.due_date = None;
    let now = Utc::now();
    let invoice = Invoice::from_draft(draft, InvoiceId::generate(), now, now);
    assert_eq!(
      invoice.due_date,
      NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
  }

  #[test]
  fn test_default_due_date_is_thirty_days_out() {
    let issue = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    assert_eq!(
      InvoiceDraft::default_due_date(issue),
      NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    );
  }

  #[test]
  fn test_search_matches_any_field_case_insensitively() {
    let now = Utc::now();
    let mut draft = sample_draft();
    draft.client = "ACME Corp".to_string();
    draft.project = "Torre Norte".to_string();
    let invoice = Invoice::from_draft(draft, InvoiceId::generate(), now, now);

    assert!(invoice.matches_search("acme"));
    assert!(invoice.matches_search("torre"));
    assert!(invoice.matches_search("JUAN@X.COM"));
    assert!(invoice.matches_search(""));
    assert!(!invoice.matches_search("constructora"));
  }

  #[test]
  fn test_stats_aggregate_totals() {
    let now = Utc::now();
    let mut cheap = sample_draft();
    cheap.total = dec!(2000);
    let invoices = vec![
      Invoice::from_draft(sample_draft(), InvoiceId::generate(), now, now),
      Invoice::from_draft(cheap, InvoiceId::generate(), now, now),
    ];

    let stats = InvoiceStats::from_invoices(&invoices);
    assert_eq!(stats.total_invoices, 2);
    assert_eq!(stats.total_amount, dec!(10000));
    assert_eq!(stats.avg_amount, dec!(5000));
  }

  #[test]
  fn test_stats_on_empty_store_are_zero() {
    let stats = InvoiceStats::from_invoices(&[]);
    assert_eq!(stats.total_invoices, 0);
    assert_eq!(stats.total_amount, Decimal::ZERO);
    assert_eq!(stats.avg_amount, Decimal::ZERO);
  }

  #[test]
  fn test_invoice_wire_field_names() {
    let now = Utc::now();
    let invoice = Invoice::from_draft(
      sample_draft(),
      InvoiceId::new("inv-1".to_string()).unwrap(),
      now,
      now,
    );
    let value = serde_json::to_value(&invoice).unwrap();

    assert_eq!(value["id"], "inv-1");
    assert_eq!(value["cliente"], "Juan Pérez");
    assert_eq!(value["proyecto"], "Casa X");
    assert_eq!(value["niveles"], 2);
    assert_eq!(value["fechaEmision"], "2025-01-30");
    assert_eq!(value["fechaVencimiento"], "2025-03-01");
    assert_eq!(value["servicios"][0]["tipo"], "Diseño Sanitario");
    assert_eq!(value["servicios"][0]["precio"], 50.0);
    assert_eq!(value["servicios"][1]["area"], 100.0);
    assert_eq!(value["total"], 8000.0);
    assert_eq!(value["ajuste"], 0.0);
    // Derived values never serialize.
    assert!(value["servicios"][0].get("subtotal").is_none());
    assert!(value.get("ajusteDescripcion").is_none());
  }

  #[test]
  fn test_invoice_deserializes_historical_records() {
    let raw = r#"{
      "id": "m2abc123",
      "cliente": "Constructora Díaz",
      "email": "obras@diaz.do",
      "proyecto": "Plaza Sol",
      "niveles": 3,
      "fechaEmision": "2024-11-02",
      "fechaVencimiento": "2024-12-02",
      "servicios": [
        {"tipo": "Diseño Sanitario", "nivel": 1, "area": 200, "precio": 55.5}
      ],
      "ajuste": -100,
      "ajusteDescripcion": "Descuento",
      "total": 11000,
      "documentosRequeridos": "Planos aprobados",
      "documentosEntregar": "Memoria de cálculo",
      "notas": "",
      "createdAt": "2024-11-02T14:00:00Z",
      "updatedAt": "2024-11-02T14:00:00Z"
    }"#;

    let invoice: Invoice = serde_json::from_str(raw).unwrap();
    assert_eq!(invoice.client, "Constructora Díaz");
    assert_eq!(invoice.service_lines[0].unit_price, dec!(55.5));
    assert_eq!(invoice.adjustment().unwrap().amount, dec!(-100));
    assert_eq!(invoice.adjustment().unwrap().description, "Descuento");
  }
}
