use rust_decimal::Decimal;

use crate::domain::invoice::{Invoice, InvoiceError, ports::InvoiceExporter};

/// Column layout of the accounting export. One detail row per service
/// line, an AJUSTE row when a non-zero adjustment exists, and a TOTAL
/// row closing each invoice.
const HEADERS: [&str; 19] = [
  "ID Factura",
  "Cliente",
  "Email",
  "Proyecto",
  "Niveles",
  "Fecha Emisión",
  "Fecha Vencimiento",
  "Tipo Servicio",
  "Nivel Servicio",
  "Área (m²)",
  "Precio Unitario (RD$)",
  "Subtotal Servicio (RD$)",
  "Descripción Ajuste",
  "Monto Ajuste (RD$)",
  "Total Factura (RD$)",
  "Documentos Requeridos",
  "Documentos a Entregar",
  "Notas",
  "Fecha Creación",
];

/// Renders stored invoices into the CSV workbook the studio shares with
/// its accountant. Formatting only: every amount is reported exactly as
/// stored, never recomputed here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
  pub fn new() -> Self {
    Self
  }
}

impl InvoiceExporter for CsvExporter {
  fn export(&self, invoices: &[Invoice]) -> Result<Vec<u8>, InvoiceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    write_rows(&mut writer, invoices).map_err(|error| InvoiceError::Export(error.to_string()))?;

    writer
      .into_inner()
      .map_err(|error| InvoiceError::Export(error.to_string()))
  }
}

fn write_rows(writer: &mut csv::Writer<Vec<u8>>, invoices: &[Invoice]) -> csv::Result<()> {
  writer.write_record(HEADERS)?;

  for invoice in invoices {
    let id = invoice.id.value().to_string();
    let created = invoice.created_at.date_naive().to_string();

    for line in &invoice.service_lines {
      writer.write_record([
        id.clone(),
        invoice.client.clone(),
        invoice.email.clone(),
        invoice.project.clone(),
        invoice.levels.to_string(),
        invoice.issue_date.to_string(),
        invoice.due_date.to_string(),
        line.design_type.clone(),
        line.level.to_string(),
        line.area.to_string(),
        money(line.unit_price),
        money(line.subtotal()),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        created.clone(),
      ])?;
    }

    // Zero adjustments never materialize, so no row for them either.
    if let Some(adjustment) = invoice.adjustment() {
      writer.write_record([
        id.clone(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "AJUSTE".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        adjustment.description,
        money(adjustment.amount),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
      ])?;
    }

    writer.write_record([
      id.clone(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      "TOTAL".to_string(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      String::new(),
      money(invoice.total),
      invoice.required_documents.clone(),
      invoice.deliverable_documents.clone(),
      invoice.notes.clone(),
      String::new(),
    ])?;
  }

  Ok(())
}

/// Fixed two decimal places, the way the accountant's sheet expects
/// monetary columns.
fn money(value: Decimal) -> String {
  format!("{:.2}", value)
}
