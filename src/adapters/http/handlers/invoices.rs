use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::{
  adapters::http::{
    dtos::{InvoiceEnvelope, SaveInvoiceRequest, SearchQuery, SuccessEnvelope},
    errors::ApiError,
  },
  application::invoice::{
    CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase,
    GetInvoiceCommand, GetInvoiceUseCase, GetStatsUseCase, ListInvoicesUseCase,
    SearchInvoicesCommand, SearchInvoicesUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
  },
};

/// Create an invoice from a draft payload
/// POST /api/invoices
pub async fn create_invoice_handler(
  request: web::Json<SaveInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = CreateInvoiceCommand {
    form: request.into_inner().into_form(),
  };

  let invoice = use_case.execute(command).await.map_err(ApiError::mutation)?;

  Ok(HttpResponse::Created().json(InvoiceEnvelope::new(invoice)))
}

/// List stored invoices, newest first
/// GET /api/invoices
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoices = use_case.execute().await.map_err(ApiError::read)?;

  Ok(HttpResponse::Ok().json(invoices))
}

/// Fetch one invoice by id
/// GET /api/invoices/{id}
pub async fn get_invoice_handler(
  id: web::Path<String>,
  use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = GetInvoiceCommand {
    id: id.into_inner(),
  };

  let invoice = use_case.execute(command).await.map_err(ApiError::read)?;

  Ok(HttpResponse::Ok().json(invoice))
}

/// Replace an invoice with a fresh draft payload
/// PUT /api/invoices/{id}
pub async fn update_invoice_handler(
  id: web::Path<String>,
  request: web::Json<SaveInvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = UpdateInvoiceCommand {
    id: id.into_inner(),
    form: request.into_inner().into_form(),
  };

  let invoice = use_case.execute(command).await.map_err(ApiError::mutation)?;

  Ok(HttpResponse::Ok().json(InvoiceEnvelope::new(invoice)))
}

/// Delete an invoice
/// DELETE /api/invoices/{id}
pub async fn delete_invoice_handler(
  id: web::Path<String>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = DeleteInvoiceCommand {
    id: id.into_inner(),
  };

  use_case.execute(command).await.map_err(ApiError::mutation)?;

  Ok(HttpResponse::Ok().json(SuccessEnvelope::new()))
}

/// Search invoices by client, project or email
/// GET /api/search?q=
pub async fn search_invoices_handler(
  query: web::Query<SearchQuery>,
  use_case: web::Data<Arc<SearchInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = SearchInvoicesCommand {
    query: query.into_inner().q,
  };

  let invoices = use_case.execute(command).await.map_err(ApiError::read)?;

  Ok(HttpResponse::Ok().json(invoices))
}

/// Aggregate figures over the stored invoices
/// GET /api/stats
pub async fn get_stats_handler(
  use_case: web::Data<Arc<GetStatsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let stats = use_case.execute().await.map_err(ApiError::read)?;

  Ok(HttpResponse::Ok().json(stats))
}
