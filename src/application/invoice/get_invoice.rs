use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceId, InvoiceService};

#[derive(Debug)]
pub struct GetInvoiceCommand {
  pub id: String,
}

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: GetInvoiceCommand) -> Result<Invoice, InvoiceError> {
    let id = InvoiceId::new(command.id)?;
    self.invoice_service.get_invoice(&id).await
  }
}
