pub mod create_invoice;
pub mod delete_invoice;
pub mod export_invoices;
pub mod get_invoice;
pub mod get_stats;
pub mod list_invoices;
pub mod search_invoices;
pub mod update_invoice;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use export_invoices::ExportInvoicesUseCase;
pub use get_invoice::{GetInvoiceCommand, GetInvoiceUseCase};
pub use get_stats::GetStatsUseCase;
pub use list_invoices::ListInvoicesUseCase;
pub use search_invoices::{SearchInvoicesCommand, SearchInvoicesUseCase};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};
