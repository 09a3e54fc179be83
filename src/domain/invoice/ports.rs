use async_trait::async_trait;

use super::entities::{Invoice, InvoiceDraft, InvoiceStats};
use super::errors::InvoiceError;
use super::value_objects::InvoiceId;

/// Durable storage for invoice records. One interface, swappable
/// backends (in-memory, JSON file, Postgres) selected by configuration.
///
/// Contract: `create` assigns the id and both timestamps and is atomic:
/// it either fully succeeds or leaves nothing retrievable. `update` is a
/// full replacement that preserves `created_at` and refreshes
/// `updated_at`. `list` and `search` return newest-first by creation
/// time; `search` matches case-insensitive substrings over client,
/// project and email, and an empty query matches everything.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
  async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoiceError>;
  async fn update(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<Invoice, InvoiceError>;
  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError>;
  async fn list(&self) -> Result<Vec<Invoice>, InvoiceError>;
  async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError>;
  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError>;
  async fn stats(&self) -> Result<InvoiceStats, InvoiceError>;
}

/// Renders stored invoices into a tabular document (one row per service
/// line, an adjustment row only when the amount is non-zero, a closing
/// total row). Implementations format; they never recompute pricing.
pub trait InvoiceExporter: Send + Sync {
  fn export(&self, invoices: &[Invoice]) -> Result<Vec<u8>, InvoiceError>;
}
