use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::domain::invoice::{
  Invoice, InvoiceDraft, InvoiceError, InvoiceId, InvoiceStats, ServiceLine,
  ports::InvoiceStore,
};

const SELECT_INVOICE: &str = r#"
    SELECT id, cliente, email, proyecto, niveles, fecha_emision, fecha_vencimiento,
           ajuste, ajuste_descripcion, total, documentos_requeridos, documentos_entregar,
           notas, created_at, updated_at
    FROM invoices
"#;

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: String,
  cliente: String,
  email: String,
  proyecto: String,
  niveles: i32,
  fecha_emision: NaiveDate,
  fecha_vencimiento: NaiveDate,
  ajuste: Decimal,
  ajuste_descripcion: Option<String>,
  total: Decimal,
  documentos_requeridos: String,
  documentos_entregar: String,
  notas: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl InvoiceRow {
  fn into_invoice(self, service_lines: Vec<ServiceLine>) -> Result<Invoice, InvoiceError> {
    Ok(Invoice {
      id: InvoiceId::new(self.id)?,
      client: self.cliente,
      email: self.email,
      project: self.proyecto,
      levels: self.niveles as u32,
      issue_date: self.fecha_emision,
      due_date: self.fecha_vencimiento,
      service_lines,
      adjustment_amount: self.ajuste,
      adjustment_description: self.ajuste_descripcion,
      total: self.total,
      required_documents: self.documentos_requeridos,
      deliverable_documents: self.documentos_entregar,
      notes: self.notas,
      created_at: self.created_at,
      updated_at: self.updated_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct ServiceLineRow {
  invoice_id: String,
  tipo: String,
  nivel: i32,
  area: Decimal,
  precio: Decimal,
}

impl From<ServiceLineRow> for ServiceLine {
  fn from(row: ServiceLineRow) -> Self {
    Self {
      design_type: row.tipo,
      level: row.nivel as u32,
      area: row.area,
      unit_price: row.precio,
    }
  }
}

pub struct PostgresInvoiceStore {
  pool: PgPool,
}

impl PostgresInvoiceStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Batch-load service lines for a set of invoices, keyed by invoice id
  /// and ordered the way they were entered.
  async fn load_lines(
    &self,
    ids: &[String],
  ) -> Result<HashMap<String, Vec<ServiceLine>>, InvoiceError> {
    let rows = sqlx::query_as::<_, ServiceLineRow>(
      r#"
            SELECT invoice_id, tipo, nivel, area, precio
            FROM invoice_services
            WHERE invoice_id = ANY($1)
            ORDER BY invoice_id, line_order ASC
            "#,
    )
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;

    let mut lines: HashMap<String, Vec<ServiceLine>> = HashMap::new();
    for row in rows {
      let invoice_id = row.invoice_id.clone();
      lines.entry(invoice_id).or_default().push(row.into());
    }
    Ok(lines)
  }

  async fn hydrate(&self, rows: Vec<InvoiceRow>) -> Result<Vec<Invoice>, InvoiceError> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let mut lines = self.load_lines(&ids).await?;

    rows
      .into_iter()
      .map(|row| {
        let service_lines = lines.remove(&row.id).unwrap_or_default();
        row.into_invoice(service_lines)
      })
      .collect()
  }

  async fn insert_lines(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
  ) -> Result<(), InvoiceError> {
    for (order, line) in invoice.service_lines.iter().enumerate() {
      sqlx::query(
        r#"
                INSERT INTO invoice_services (invoice_id, tipo, nivel, area, precio, line_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
      )
      .bind(invoice.id.value())
      .bind(&line.design_type)
      .bind(line.level as i32)
      .bind(line.area)
      .bind(line.unit_price)
      .bind(order as i32)
      .execute(&mut **tx)
      .await?;
    }
    Ok(())
  }
}

#[async_trait]
impl InvoiceStore for PostgresInvoiceStore {
  async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let now = Utc::now();
    let invoice = Invoice::from_draft(draft, InvoiceId::generate(), now, now);

    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
            INSERT INTO invoices (
                id, cliente, email, proyecto, niveles, fecha_emision, fecha_vencimiento,
                ajuste, ajuste_descripcion, total, documentos_requeridos, documentos_entregar,
                notas, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
    )
    .bind(invoice.id.value())
    .bind(&invoice.client)
    .bind(&invoice.email)
    .bind(&invoice.project)
    .bind(invoice.levels as i32)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.adjustment_amount)
    .bind(&invoice.adjustment_description)
    .bind(invoice.total)
    .bind(&invoice.required_documents)
    .bind(&invoice.deliverable_documents)
    .bind(&invoice.notes)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .execute(&mut *tx)
    .await?;

    Self::insert_lines(&mut tx, &invoice).await?;
    tx.commit().await?;

    Ok(invoice)
  }

  async fn update(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
    let mut tx = self.pool.begin().await?;

    let created_at: Option<DateTime<Utc>> =
      sqlx::query_scalar("SELECT created_at FROM invoices WHERE id = $1")
        .bind(id.value())
        .fetch_optional(&mut *tx)
        .await?;
    let created_at = created_at.ok_or_else(|| InvoiceError::NotFound(id.clone()))?;

    let invoice = Invoice::from_draft(draft, id.clone(), created_at, Utc::now());

    sqlx::query(
      r#"
            UPDATE invoices
            SET cliente = $2, email = $3, proyecto = $4, niveles = $5, fecha_emision = $6,
                fecha_vencimiento = $7, ajuste = $8, ajuste_descripcion = $9, total = $10,
                documentos_requeridos = $11, documentos_entregar = $12, notas = $13,
                updated_at = $14
            WHERE id = $1
            "#,
    )
    .bind(invoice.id.value())
    .bind(&invoice.client)
    .bind(&invoice.email)
    .bind(&invoice.project)
    .bind(invoice.levels as i32)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.adjustment_amount)
    .bind(&invoice.adjustment_description)
    .bind(invoice.total)
    .bind(&invoice.required_documents)
    .bind(&invoice.deliverable_documents)
    .bind(&invoice.notes)
    .bind(invoice.updated_at)
    .execute(&mut *tx)
    .await?;

    // Full replacement: drop the old line set and insert the new one.
    sqlx::query("DELETE FROM invoice_services WHERE invoice_id = $1")
      .bind(id.value())
      .execute(&mut *tx)
      .await?;
    Self::insert_lines(&mut tx, &invoice).await?;

    tx.commit().await?;
    Ok(invoice)
  }

  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!("{} WHERE id = $1", SELECT_INVOICE))
      .bind(id.value())
      .fetch_optional(&self.pool)
      .await?;

    let Some(row) = row else {
      return Ok(None);
    };

    let lines = sqlx::query_as::<_, ServiceLineRow>(
      r#"
            SELECT invoice_id, tipo, nivel, area, precio
            FROM invoice_services
            WHERE invoice_id = $1
            ORDER BY line_order ASC
            "#,
    )
    .bind(id.value())
    .fetch_all(&self.pool)
    .await?;

    let invoice = row.into_invoice(lines.into_iter().map(ServiceLine::from).collect())?;
    Ok(Some(invoice))
  }

  async fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let rows =
      sqlx::query_as::<_, InvoiceRow>(&format!("{} ORDER BY created_at DESC", SELECT_INVOICE))
        .fetch_all(&self.pool)
        .await?;

    self.hydrate(rows).await
  }

  async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      "{} WHERE cliente ILIKE $1 OR proyecto ILIKE $1 OR email ILIKE $1 ORDER BY created_at DESC",
      SELECT_INVOICE
    ))
    .bind(like_pattern(query))
    .fetch_all(&self.pool)
    .await?;

    self.hydrate(rows).await
  }

  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    // Service lines go with the invoice via ON DELETE CASCADE.
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id.value())
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::NotFound(id.clone()));
    }
    Ok(())
  }

  async fn stats(&self) -> Result<InvoiceStats, InvoiceError> {
    let (count, total): (i64, Decimal) =
      sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total), 0) FROM invoices")
        .fetch_one(&self.pool)
        .await?;

    Ok(InvoiceStats::from_totals(count as u64, total))
  }
}

/// ILIKE pattern for a substring search. LIKE metacharacters in the
/// query are escaped so they match literally.
fn like_pattern(query: &str) -> String {
  let escaped = query
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_like_pattern_wraps_and_escapes() {
    assert_eq!(like_pattern("acme"), "%acme%");
    assert_eq!(like_pattern(""), "%%");
    assert_eq!(like_pattern("50%"), "%50\\%%");
    assert_eq!(like_pattern("a_b"), "%a\\_b%");
    assert_eq!(like_pattern("c\\d"), "%c\\\\d%");
  }
}
