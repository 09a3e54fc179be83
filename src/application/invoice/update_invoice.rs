use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceForm, InvoiceId, InvoiceService};

#[derive(Debug)]
pub struct UpdateInvoiceCommand {
  pub id: String,
  pub form: InvoiceForm,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: UpdateInvoiceCommand) -> Result<Invoice, InvoiceError> {
    let id = InvoiceId::new(command.id)?;
    self
      .invoice_service
      .update_invoice(&id, &command.form)
      .await
  }
}
