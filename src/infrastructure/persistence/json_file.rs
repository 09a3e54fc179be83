use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::invoice::{
  Invoice, InvoiceDraft, InvoiceError, InvoiceId, InvoiceStats, ports::InvoiceStore,
};

use super::sort_newest_first;

/// Invoice store backed by a single JSON document on disk.
///
/// Every mutation reads the whole collection, applies the change and
/// rewrites the file, which matches the single-user scale this service
/// runs at. Writers serialize through a mutex and swap the document in
/// with a temp-file rename, so a crash mid-write never leaves a torn
/// file behind. Readers skip the lock: the rename is atomic, so they
/// see either the old document or the new one.
pub struct JsonFileInvoiceStore {
  path: PathBuf,
  write_lock: Mutex<()>,
}

impl JsonFileInvoiceStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Mutex::new(()),
    }
  }

  /// A missing file reads as an empty collection, so first runs need no
  /// setup step.
  async fn read_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    match fs::read(&self.path).await {
      Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
      Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
      Err(error) => Err(error.into()),
    }
  }

  async fn write_all(&self, invoices: &[Invoice]) -> Result<(), InvoiceError> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).await?;
      }
    }

    let temp_path = self.path.with_extension("tmp");
    fs::write(&temp_path, serde_json::to_vec_pretty(invoices)?).await?;
    fs::rename(&temp_path, &self.path).await?;
    Ok(())
  }
}

#[async_trait]
impl InvoiceStore for JsonFileInvoiceStore {
  async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let _guard = self.write_lock.lock().await;
    let mut invoices = self.read_all().await?;

    let now = Utc::now();
    let invoice = Invoice::from_draft(draft, InvoiceId::generate(), now, now);
    invoices.push(invoice.clone());

    self.write_all(&invoices).await?;
    Ok(invoice)
  }

  async fn update(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let _guard = self.write_lock.lock().await;
    let mut invoices = self.read_all().await?;

    let position = invoices
      .iter()
      .position(|invoice| &invoice.id == id)
      .ok_or_else(|| InvoiceError::NotFound(id.clone()))?;

    let created_at = invoices[position].created_at;
    let invoice = Invoice::from_draft(draft, id.clone(), created_at, Utc::now());
    invoices[position] = invoice.clone();

    self.write_all(&invoices).await?;
    Ok(invoice)
  }

  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
    let invoices = self.read_all().await?;
    Ok(invoices.into_iter().find(|invoice| &invoice.id == id))
  }

  async fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let mut invoices = self.read_all().await?;
    sort_newest_first(&mut invoices);
    Ok(invoices)
  }

  async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError> {
    let mut matches: Vec<Invoice> = self
      .read_all()
      .await?
      .into_iter()
      .filter(|invoice| invoice.matches_search(query))
      .collect();
    sort_newest_first(&mut matches);
    Ok(matches)
  }

  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    let _guard = self.write_lock.lock().await;
    let mut invoices = self.read_all().await?;

    let before = invoices.len();
    invoices.retain(|invoice| &invoice.id != id);
    if invoices.len() == before {
      return Err(InvoiceError::NotFound(id.clone()));
    }

    self.write_all(&invoices).await
  }

  async fn stats(&self) -> Result<InvoiceStats, InvoiceError> {
    let invoices = self.read_all().await?;
    Ok(InvoiceStats::from_invoices(&invoices))
  }
}
