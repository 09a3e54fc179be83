use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cotizador::{
  adapters::http::{RequestIdMiddleware, configure_invoice_routes, configure_report_routes},
  application::invoice::{
    CreateInvoiceUseCase, DeleteInvoiceUseCase, ExportInvoicesUseCase, GetInvoiceUseCase,
    GetStatsUseCase, ListInvoicesUseCase, SearchInvoicesUseCase, UpdateInvoiceUseCase,
  },
  domain::invoice::{InvoiceService, InvoiceStore},
  infrastructure::{
    config::{Config, StorageBackend},
    export::CsvExporter,
    persistence::{JsonFileInvoiceStore, MemoryInvoiceStore, PostgresInvoiceStore},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cotizador=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Cotizador application");

  // Load configuration
  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  // Pick the invoice store the configuration asks for
  let store = connect_store(&config).await?;

  // Initialize domain service
  let catalog = config.catalog.to_catalog();
  let invoice_service = Arc::new(InvoiceService::new(store, catalog));

  // Initialize invoice use cases
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service.clone()));
  let get_invoice_use_case = Arc::new(GetInvoiceUseCase::new(invoice_service.clone()));
  let update_invoice_use_case = Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone()));
  let delete_invoice_use_case = Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone()));
  let search_invoices_use_case = Arc::new(SearchInvoicesUseCase::new(invoice_service.clone()));
  let get_stats_use_case = Arc::new(GetStatsUseCase::new(invoice_service.clone()));

  // Initialize report use cases
  let export_invoices_use_case = Arc::new(ExportInvoicesUseCase::new(
    invoice_service.clone(),
    Arc::new(CsvExporter::new()),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure API routes
      .service(
        web::scope("/api")
          .configure(|cfg| {
            configure_invoice_routes(
              cfg,
              create_invoice_use_case.clone(),
              list_invoices_use_case.clone(),
              get_invoice_use_case.clone(),
              update_invoice_use_case.clone(),
              delete_invoice_use_case.clone(),
              search_invoices_use_case.clone(),
              get_stats_use_case.clone(),
            )
          })
          .configure(|cfg| configure_report_routes(cfg, export_invoices_use_case.clone())),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Build the invoice store selected by `storage.backend`.
///
/// The postgres backend connects with a timeout and runs pending
/// migrations before the server accepts traffic.
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn InvoiceStore>> {
  match config.storage.backend {
    StorageBackend::Memory => {
      tracing::info!("Using in-memory invoice store; records are lost on restart");
      Ok(Arc::new(MemoryInvoiceStore::new()))
    }
    StorageBackend::File => {
      tracing::info!(
        "Using JSON file invoice store at {}",
        config.storage.file_path
      );
      Ok(Arc::new(JsonFileInvoiceStore::new(&config.storage.file_path)))
    }
    StorageBackend::Postgres => {
      let database = config
        .storage
        .database
        .as_ref()
        .context("storage.backend is 'postgres' but [storage.database] is not configured")?;

      tracing::info!("Connecting to database: {}", database.url);

      let pool = tokio::time::timeout(
        Duration::from_secs(database.connect_timeout_seconds),
        PgPoolOptions::new()
          .max_connections(database.max_connections)
          .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
          .connect(&database.url),
      )
      .await
      .with_context(|| {
        format!(
          "Database connection timed out after {} seconds. Is PostgreSQL running?",
          database.connect_timeout_seconds
        )
      })?
      .context("Failed to connect to database")?;

      tracing::info!("Database connection pool created");

      // Run database migrations
      tracing::info!("Running database migrations");
      sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
      tracing::info!("Database migrations completed");

      Ok(Arc::new(PostgresInvoiceStore::new(pool)))
    }
  }
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
