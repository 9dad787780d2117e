use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  Currency, Invoice, InvoiceStatus, errors::InvoiceError, ports::InvoiceRepository,
};

const INVOICE_COLUMNS: &str = "id, fiscal_folio, invoice_number, client_name, invoice_date, \
  due_date, subtotal, tax_amount, total_amount, currency, status, pdf_url, created_by, \
  created_at, updated_at, version";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  fiscal_folio: Option<String>,
  invoice_number: Option<String>,
  client_name: String,
  invoice_date: NaiveDate,
  due_date: Option<NaiveDate>,
  subtotal: Decimal,
  tax_amount: Decimal,
  total_amount: Decimal,
  currency: String,
  status: String,
  pdf_url: Option<String>,
  created_by: Uuid,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  version: i32,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let currency = Currency::from_str(&row.currency)?;
    let status = InvoiceStatus::from_str(&row.status)?;

    Ok(Invoice {
      id: row.id,
      fiscal_folio: row.fiscal_folio,
      invoice_number: row.invoice_number,
      client_name: row.client_name,
      invoice_date: row.invoice_date,
      due_date: row.due_date,
      subtotal: row.subtotal,
      tax_amount: row.tax_amount,
      total_amount: row.total_amount,
      currency,
      status,
      pdf_url: row.pdf_url,
      created_by: row.created_by,
      created_at: row.created_at,
      updated_at: row.updated_at,
      version: row.version,
      items: Vec::new(),
      shipments: Vec::new(),
    })
  }
}

/// Header rows only; items and shipment links are loaded by their own repositories
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  fn into_invoices(rows: Vec<InvoiceRow>) -> Result<Vec<Invoice>, InvoiceError> {
    rows.into_iter().map(Invoice::try_from).collect()
  }
}

pub(super) async fn insert(conn: &mut PgConnection, invoice: &Invoice) -> Result<(), InvoiceError> {
  let sql = format!(
    r#"
    INSERT INTO invoices ({})
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
    "#,
    INVOICE_COLUMNS
  );

  sqlx::query(&sql)
    .bind(invoice.id)
    .bind(&invoice.fiscal_folio)
    .bind(&invoice.invoice_number)
    .bind(&invoice.client_name)
    .bind(invoice.invoice_date)
    .bind(invoice.due_date)
    .bind(invoice.subtotal)
    .bind(invoice.tax_amount)
    .bind(invoice.total_amount)
    .bind(invoice.currency.as_str())
    .bind(invoice.status.as_str())
    .bind(&invoice.pdf_url)
    .bind(invoice.created_by)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .bind(invoice.version)
    .execute(&mut *conn)
    .await?;

  Ok(())
}

/// Writes the header only while the stored version equals `expected_version`
pub(super) async fn update_versioned(
  conn: &mut PgConnection,
  invoice: &Invoice,
  expected_version: i32,
) -> Result<(), InvoiceError> {
  let result = sqlx::query(
    r#"
    UPDATE invoices
    SET fiscal_folio = $3, invoice_number = $4, client_name = $5, invoice_date = $6,
        due_date = $7, subtotal = $8, tax_amount = $9, total_amount = $10, currency = $11,
        status = $12, pdf_url = $13, updated_at = $14, version = $15
    WHERE id = $1 AND version = $2
    "#,
  )
  .bind(invoice.id)
  .bind(expected_version)
  .bind(&invoice.fiscal_folio)
  .bind(&invoice.invoice_number)
  .bind(&invoice.client_name)
  .bind(invoice.invoice_date)
  .bind(invoice.due_date)
  .bind(invoice.subtotal)
  .bind(invoice.tax_amount)
  .bind(invoice.total_amount)
  .bind(invoice.currency.as_str())
  .bind(invoice.status.as_str())
  .bind(&invoice.pdf_url)
  .bind(invoice.updated_at)
  .bind(invoice.version)
  .execute(&mut *conn)
  .await?;

  if result.rows_affected() == 1 {
    return Ok(());
  }

  let actual = sqlx::query_scalar::<_, i32>("SELECT version FROM invoices WHERE id = $1")
    .bind(invoice.id)
    .fetch_optional(&mut *conn)
    .await?;

  match actual {
    Some(actual) => Err(InvoiceError::VersionConflict {
      expected: expected_version,
      actual,
    }),
    None => Err(InvoiceError::InvoiceNotFound(invoice.id)),
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
    let row = sqlx::query_as::<_, InvoiceRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    row.map(Invoice::try_from).transpose()
  }

  async fn find_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, InvoiceError> {
    let sql = format!(
      "SELECT {} FROM invoices WHERE status = $1 ORDER BY created_at DESC",
      INVOICE_COLUMNS
    );
    let rows = sqlx::query_as::<_, InvoiceRow>(&sql)
      .bind(status.as_str())
      .fetch_all(&self.pool)
      .await?;

    Self::into_invoices(rows)
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let sql = format!(
      "SELECT {} FROM invoices ORDER BY created_at DESC",
      INVOICE_COLUMNS
    );
    let rows = sqlx::query_as::<_, InvoiceRow>(&sql)
      .fetch_all(&self.pool)
      .await?;

    Self::into_invoices(rows)
  }
}
