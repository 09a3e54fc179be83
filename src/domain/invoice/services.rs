use std::sync::Arc;

use super::builder::{InvoiceForm, RecordBuilder};
use super::entities::{Invoice, InvoiceStats};
use super::errors::InvoiceError;
use super::ports::InvoiceStore;
use super::validation::validate;
use super::value_objects::{DesignCatalog, InvoiceId};

/// Orchestrates the invoice lifecycle: every create and update is built
/// and validated before it persists, so a record can only reach the
/// store well-typed, rule-checked and with its total freshly computed.
pub struct InvoiceService {
  store: Arc<dyn InvoiceStore>,
  builder: RecordBuilder,
}

impl InvoiceService {
  pub fn new(store: Arc<dyn InvoiceStore>, catalog: DesignCatalog) -> Self {
    Self {
      store,
      builder: RecordBuilder::new(catalog),
    }
  }

  pub async fn create_invoice(&self, form: &InvoiceForm) -> Result<Invoice, InvoiceError> {
    let draft = self.builder.build(form)?;
    validate(&draft).map_err(InvoiceError::Validation)?;
    self.store.create(draft).await
  }

  pub async fn update_invoice(
    &self,
    id: &InvoiceId,
    form: &InvoiceForm,
  ) -> Result<Invoice, InvoiceError> {
    let draft = self.builder.build(form)?;
    validate(&draft).map_err(InvoiceError::Validation)?;
    self.store.update(id, draft).await
  }

  pub async fn get_invoice(&self, id: &InvoiceId) -> Result<Invoice, InvoiceError> {
    self
      .store
      .find_by_id(id)
      .await?
      .ok_or_else(|| InvoiceError::NotFound(id.clone()))
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.store.list().await
  }

  pub async fn search_invoices(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError> {
    self.store.search(query).await
  }

  pub async fn delete_invoice(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    self.store.delete(id).await
  }

  pub async fn stats(&self) -> Result<InvoiceStats, InvoiceError> {
    self.store.stats().await
  }
}
