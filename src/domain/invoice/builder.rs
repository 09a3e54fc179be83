use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::entities::{InvoiceDraft, ServiceLine};
use super::pricing::{AdjustmentInput, ServiceLineInput, amount_or_zero, compute_totals};
use super::value_objects::DesignCatalog;

/// Raw capture of the invoice entry form. Every value arrives as text,
/// exactly as the user typed it; typing happens in [`RecordBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceForm {
  pub client: String,
  pub email: String,
  pub project: String,
  pub levels: String,
  pub issue_date: String,
  pub due_date: String,
  pub lines: Vec<ServiceLineInput>,
  pub adjustment: Option<AdjustmentInput>,
  pub required_documents: String,
  pub deliverable_documents: String,
  pub notes: String,
}

/// Unparseable raw data. Fatal to the build step: the form never reaches
/// validation, which only sees well-typed drafts. Monetary fields are
/// exempt: they coerce to zero under the pricing policy and surface as
/// business-rule errors instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
  #[error("El número de niveles no es un entero válido: '{0}'")]
  InvalidLevels(String),
  #[error("El nivel del servicio {line} no es un entero válido: '{value}'")]
  InvalidLineLevel { line: usize, value: String },
  #[error("La fecha de emisión no es válida: '{0}'")]
  InvalidIssueDate(String),
  #[error("La fecha de vencimiento no es válida: '{0}'")]
  InvalidDueDate(String),
}

/// Turns a form snapshot into a typed [`InvoiceDraft`].
///
/// Design type codes normalize through the configured catalog; the total
/// comes from the pricing engine over the same raw values, so a
/// client-supplied total can never disagree with the stored one.
/// Identity and timestamps are left for the store to assign.
pub struct RecordBuilder {
  catalog: DesignCatalog,
}

impl RecordBuilder {
  pub fn new(catalog: DesignCatalog) -> Self {
    Self { catalog }
  }

  pub fn build(&self, form: &InvoiceForm) -> Result<InvoiceDraft, BuildError> {
    let levels = form
      .levels
      .trim()
      .parse::<u32>()
      .map_err(|_| BuildError::InvalidLevels(form.levels.clone()))?;

    let issue_date = form
      .issue_date
      .trim()
      .parse::<NaiveDate>()
      .map_err(|_| BuildError::InvalidIssueDate(form.issue_date.clone()))?;

    let due_date = match form.due_date.trim() {
      "" => None,
      raw => Some(
        raw
          .parse::<NaiveDate>()
          .map_err(|_| BuildError::InvalidDueDate(form.due_date.clone()))?,
      ),
    };

    let service_lines = form
      .lines
      .iter()
      .enumerate()
      .map(|(index, raw)| {
        let level = raw
          .level
          .trim()
          .parse::<u32>()
          .map_err(|_| BuildError::InvalidLineLevel {
            line: index + 1,
            value: raw.level.clone(),
          })?;
        Ok(ServiceLine {
          design_type: self.catalog.label_for(raw.design_type.trim()),
          level,
          area: amount_or_zero(&raw.area),
          unit_price: amount_or_zero(&raw.unit_price),
        })
      })
      .collect::<Result<Vec<_>, BuildError>>()?;

    let totals = compute_totals(&form.lines, form.adjustment.as_ref());

    let adjustment_amount = form
      .adjustment
      .as_ref()
      .map(|adjustment| amount_or_zero(&adjustment.amount))
      .unwrap_or(Decimal::ZERO);
    let adjustment_description = form
      .adjustment
      .as_ref()
      .map(|adjustment| adjustment.description.trim())
      .filter(|description| !description.is_empty())
      .map(String::from);

    Ok(InvoiceDraft {
      client: form.client.clone(),
      email: form.email.clone(),
      project: form.project.clone(),
      levels,
      issue_date,
      due_date,
      service_lines,
      adjustment_amount,
      adjustment_description,
      total: totals.invoice_total,
      required_documents: form.required_documents.clone(),
      deliverable_documents: form.deliverable_documents.clone(),
      notes: form.notes.clone(),
    })
  }
}

impl Default for RecordBuilder {
  fn default() -> Self {
    Self::new(DesignCatalog::default())
  }
}
