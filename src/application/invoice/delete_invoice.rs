use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceId, InvoiceService};

#[derive(Debug)]
pub struct DeleteInvoiceCommand {
  pub id: String,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<(), InvoiceError> {
    let id = InvoiceId::new(command.id)?;
    self.invoice_service.delete_invoice(&id).await
  }
}
