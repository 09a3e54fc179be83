use actix_web::web;
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, ExportInvoicesUseCase, GetInvoiceUseCase,
  GetStatsUseCase, ListInvoicesUseCase, SearchInvoicesUseCase, UpdateInvoiceUseCase,
};

use super::handlers::invoices::{
  create_invoice_handler, delete_invoice_handler, get_invoice_handler, get_stats_handler,
  list_invoices_handler, search_invoices_handler, update_invoice_handler,
};
use super::handlers::reports::export_invoices_csv_handler;

/// Configure invoice routes
///
/// Mounts all invoice endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api).
///
/// # Routes
///
/// - POST /invoices - Create an invoice from a draft payload
/// - GET /invoices - List stored invoices, newest first
/// - GET /invoices/{id} - Fetch one invoice
/// - PUT /invoices/{id} - Replace an invoice with a fresh draft
/// - DELETE /invoices/{id} - Delete an invoice
/// - GET /search?q= - Search by client, project or email
/// - GET /stats - Aggregate figures over the stored invoices
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use cotizador::application::invoice::*;
/// # use cotizador::adapters::http::routes::configure_invoice_routes;
///
/// # async fn example(
/// #   create_use_case: Arc<CreateInvoiceUseCase>,
/// #   list_use_case: Arc<ListInvoicesUseCase>,
/// #   get_use_case: Arc<GetInvoiceUseCase>,
/// #   update_use_case: Arc<UpdateInvoiceUseCase>,
/// #   delete_use_case: Arc<DeleteInvoiceUseCase>,
/// #   search_use_case: Arc<SearchInvoicesUseCase>,
/// #   stats_use_case: Arc<GetStatsUseCase>,
/// # ) {
/// let app = App::new().service(
///   web::scope("/api").configure(|cfg| {
///     configure_invoice_routes(
///       cfg,
///       create_use_case,
///       list_use_case,
///       get_use_case,
///       update_use_case,
///       delete_use_case,
///       search_use_case,
///       stats_use_case,
///     )
///   }),
/// );
/// # }
/// ```
#[allow(clippy::too_many_arguments)]
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
  get_use_case: Arc<GetInvoiceUseCase>,
  update_use_case: Arc<UpdateInvoiceUseCase>,
  delete_use_case: Arc<DeleteInvoiceUseCase>,
  search_use_case: Arc<SearchInvoicesUseCase>,
  stats_use_case: Arc<GetStatsUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(search_use_case))
    .app_data(web::Data::new(stats_use_case))
    // Configure routes
    .route("/invoices", web::post().to(create_invoice_handler))
    .route("/invoices", web::get().to(list_invoices_handler))
    .route("/invoices/{id}", web::get().to(get_invoice_handler))
    .route("/invoices/{id}", web::put().to(update_invoice_handler))
    .route("/invoices/{id}", web::delete().to(delete_invoice_handler))
    .route("/search", web::get().to(search_invoices_handler))
    .route("/stats", web::get().to(get_stats_handler));
}

/// Configure report routes
///
/// # Routes
///
/// - GET /export/csv - Download every stored invoice as a CSV document
pub fn configure_report_routes(
  cfg: &mut web::ServiceConfig,
  export_use_case: Arc<ExportInvoicesUseCase>,
) {
  cfg
    .app_data(web::Data::new(export_use_case))
    .route("/export/csv", web::get().to(export_invoices_csv_handler));
}
