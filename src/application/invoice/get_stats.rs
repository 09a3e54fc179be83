use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceStats};

pub struct GetStatsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetStatsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<InvoiceStats, InvoiceError> {
    self.invoice_service.stats().await
  }
}
