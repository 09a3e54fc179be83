use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::invoice::{
  Invoice, InvoiceDraft, InvoiceError, InvoiceId, InvoiceStats, ports::InvoiceStore,
};

use super::sort_newest_first;

/// Volatile invoice store for demos and tests. Records live in process
/// memory and are gone on restart.
#[derive(Default)]
pub struct MemoryInvoiceStore {
  invoices: RwLock<Vec<Invoice>>,
}

impl MemoryInvoiceStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
  async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let now = Utc::now();
    let invoice = Invoice::from_draft(draft, InvoiceId::generate(), now, now);

    let mut invoices = self.invoices.write().await;
    invoices.push(invoice.clone());

    Ok(invoice)
  }

  async fn update(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let mut invoices = self.invoices.write().await;
    let position = invoices
      .iter()
      .position(|invoice| &invoice.id == id)
      .ok_or_else(|| InvoiceError::NotFound(id.clone()))?;

    let created_at = invoices[position].created_at;
    let invoice = Invoice::from_draft(draft, id.clone(), created_at, Utc::now());
    invoices[position] = invoice.clone();

    Ok(invoice)
  }

  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
    let invoices = self.invoices.read().await;
    Ok(invoices.iter().find(|invoice| &invoice.id == id).cloned())
  }

  async fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoices.read().await;
    let mut all = invoices.clone();
    sort_newest_first(&mut all);
    Ok(all)
  }

  async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoices.read().await;
    let mut matches: Vec<Invoice> = invoices
      .iter()
      .filter(|invoice| invoice.matches_search(query))
      .cloned()
      .collect();
    sort_newest_first(&mut matches);
    Ok(matches)
  }

  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    let mut invoices = self.invoices.write().await;
    let before = invoices.len();
    invoices.retain(|invoice| &invoice.id != id);

    if invoices.len() == before {
      return Err(InvoiceError::NotFound(id.clone()));
    }
    Ok(())
  }

  async fn stats(&self) -> Result<InvoiceStats, InvoiceError> {
    let invoices = self.invoices.read().await;
    Ok(InvoiceStats::from_invoices(&invoices))
  }
}
