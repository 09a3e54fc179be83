pub mod builder;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod pricing;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use builder::{BuildError, InvoiceForm, RecordBuilder};
pub use entities::{Adjustment, Invoice, InvoiceDraft, InvoiceStats, ServiceLine};
pub use errors::InvoiceError;
pub use ports::{InvoiceExporter, InvoiceStore};
pub use pricing::{AdjustmentInput, ServiceLineInput, Totals, amount_or_zero, compute_totals};
pub use services::InvoiceService;
pub use validation::{ValidationError, is_valid_email, validate};
pub use value_objects::{DesignCatalog, InvoiceId, ValueObjectError};
