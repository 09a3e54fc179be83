pub mod json_file;
pub mod memory;
pub mod postgres;

pub use json_file::JsonFileInvoiceStore;
pub use memory::MemoryInvoiceStore;
pub use postgres::PostgresInvoiceStore;

use crate::domain::invoice::Invoice;

/// Newest-first ordering shared by the in-process backends. Postgres
/// gets the same ordering from `ORDER BY created_at DESC`.
pub(crate) fn sort_newest_first(invoices: &mut [Invoice]) {
  invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
