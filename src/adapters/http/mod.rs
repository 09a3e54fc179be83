pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ErrorBody, ErrorEnvelope, InvoiceEnvelope, SaveInvoiceRequest, SearchQuery, SuccessEnvelope,
};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{configure_invoice_routes, configure_report_routes};
