use actix_web::{HttpResponse, http::header, web};
use chrono::Utc;
use std::sync::Arc;

use crate::{adapters::http::errors::ApiError, application::invoice::ExportInvoicesUseCase};

/// Download every stored invoice as an accounting spreadsheet
/// GET /api/export/csv
pub async fn export_invoices_csv_handler(
  use_case: web::Data<Arc<ExportInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let document = use_case.execute().await.map_err(ApiError::read)?;

  let filename = format!("facturas_{}.csv", Utc::now().format("%Y-%m-%d"));

  Ok(
    HttpResponse::Ok()
      .content_type("text/csv; charset=utf-8")
      .insert_header((
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename),
      ))
      .body(document),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::routes::configure_report_routes;
  use crate::domain::invoice::{
    DesignCatalog, InvoiceDraft, InvoiceService, InvoiceStore, ServiceLine,
  };
  use crate::infrastructure::export::CsvExporter;
  use crate::infrastructure::persistence::MemoryInvoiceStore;
  use actix_web::{App, Scope, http::StatusCode, test};
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  fn report_scope(store: Arc<dyn InvoiceStore>) -> Scope {
    let service = Arc::new(InvoiceService::new(store, DesignCatalog::default()));
    let use_case = Arc::new(ExportInvoicesUseCase::new(
      service,
      Arc::new(CsvExporter::new()),
    ));
    web::scope("/api").configure(move |cfg| configure_report_routes(cfg, use_case))
  }

  fn draft(client: &str) -> InvoiceDraft {
    InvoiceDraft {
      client: client.to_string(),
      email: "obras@correo.do".to_string(),
      project: "Residencial Las Palmas".to_string(),
      levels: 2,
      issue_date: NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
      due_date: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
      service_lines: vec![ServiceLine {
        design_type: "Diseño Sanitario".to_string(),
        level: 1,
        area: dec!(100),
        unit_price: dec!(50),
      }],
      adjustment_amount: dec!(0),
      adjustment_description: None,
      total: dec!(5000),
      required_documents: String::new(),
      deliverable_documents: String::new(),
      notes: String::new(),
    }
  }

  fn rows(body: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
      .has_headers(false)
      .from_reader(body)
      .records()
      .map(|record| record.unwrap().iter().map(String::from).collect())
      .collect()
  }

  #[actix_web::test]
  async fn test_export_sets_download_headers() {
    let store = Arc::new(MemoryInvoiceStore::new());
    store.create(draft("ACME Corp")).await.unwrap();

    let app = test::init_service(App::new().service(report_scope(store))).await;

    let req = test::TestRequest::get().uri("/api/export/csv").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert_eq!(content_type.to_str().unwrap(), "text/csv; charset=utf-8");

    let disposition = resp
      .headers()
      .get(header::CONTENT_DISPOSITION)
      .unwrap()
      .to_str()
      .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"facturas_"));
    assert!(disposition.ends_with(".csv\""));
  }

  #[actix_web::test]
  async fn test_export_body_is_parseable_csv() {
    let store = Arc::new(MemoryInvoiceStore::new());
    store.create(draft("ACME Corp")).await.unwrap();

    let app = test::init_service(App::new().service(report_scope(store))).await;

    let req = test::TestRequest::get().uri("/api/export/csv").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;

    // Header, one service row, one TOTAL row.
    let rows = rows(body.as_ref());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "ID Factura");
    assert_eq!(rows[1][1], "ACME Corp");
    assert_eq!(rows[1][7], "Diseño Sanitario");
    assert_eq!(rows[2][7], "TOTAL");
    assert_eq!(rows[2][14], "5000.00");
  }

  #[actix_web::test]
  async fn test_export_of_empty_store_is_header_only() {
    let store = Arc::new(MemoryInvoiceStore::new());
    let app = test::init_service(App::new().service(report_scope(store))).await;

    let req = test::TestRequest::get().uri("/api/export/csv").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let rows = rows(body.as_ref());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 19);
  }
}
