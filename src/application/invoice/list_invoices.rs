use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Newest-first, full records; the wire shape is the entity itself.
  pub async fn execute(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_service.list_invoices().await
  }
}
