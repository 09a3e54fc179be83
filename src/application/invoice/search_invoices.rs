use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

#[derive(Debug)]
pub struct SearchInvoicesCommand {
  pub query: String,
}

pub struct SearchInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl SearchInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: SearchInvoicesCommand) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_service.search_invoices(&command.query).await
  }
}
