use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceExporter, InvoiceService};

/// Streams every stored invoice through the configured exporter.
/// Pricing is already final on the records; the exporter only formats.
pub struct ExportInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
  exporter: Arc<dyn InvoiceExporter>,
}

impl ExportInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, exporter: Arc<dyn InvoiceExporter>) -> Self {
    Self {
      invoice_service,
      exporter,
    }
  }

  pub async fn execute(&self) -> Result<Vec<u8>, InvoiceError> {
    let invoices = self.invoice_service.list_invoices().await?;
    self.exporter.export(&invoices)
  }
}
