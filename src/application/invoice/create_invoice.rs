use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceForm, InvoiceService};

#[derive(Debug)]
pub struct CreateInvoiceCommand {
  pub form: InvoiceForm,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<Invoice, InvoiceError> {
    self.invoice_service.create_invoice(&command.form).await
  }
}
