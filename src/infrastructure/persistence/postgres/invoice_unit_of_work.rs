use async_trait::async_trait;
use sqlx::PgPool;

use super::{
  audit_log_repository, invoice_history_repository, invoice_item_repository, invoice_repository,
  invoice_shipment_repository,
};
use crate::domain::audit::{AuditLog, InvoiceHistory};
use crate::domain::invoice::{Invoice, errors::InvoiceError, ports::InvoiceUnitOfWork};

/// Runs every invoice write in a single transaction.
///
/// An error on any statement returns early and the transaction is rolled back
/// when it is dropped.
pub struct PostgresInvoiceUnitOfWork {
  pool: PgPool,
}

impl PostgresInvoiceUnitOfWork {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceUnitOfWork for PostgresInvoiceUnitOfWork {
  async fn create(&self, invoice: &Invoice, audit: AuditLog) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;

    invoice_repository::insert(&mut *tx, invoice).await?;
    invoice_item_repository::insert_all(&mut *tx, &invoice.items).await?;
    invoice_shipment_repository::insert_all(&mut *tx, &invoice.shipments).await?;
    audit_log_repository::insert(&mut *tx, &audit).await?;

    tx.commit().await?;

    tracing::debug!(invoice_id = %invoice.id, "Invoice insert committed");
    Ok(())
  }

  async fn update(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;

    invoice_repository::update_versioned(&mut *tx, invoice, expected_version).await?;
    invoice_item_repository::delete_for_invoice(&mut *tx, invoice.id).await?;
    invoice_item_repository::insert_all(&mut *tx, &invoice.items).await?;
    invoice_shipment_repository::delete_for_invoice(&mut *tx, invoice.id).await?;
    invoice_shipment_repository::insert_all(&mut *tx, &invoice.shipments).await?;
    invoice_history_repository::insert(&mut *tx, &history).await?;
    audit_log_repository::insert(&mut *tx, &audit).await?;

    tx.commit().await?;

    tracing::debug!(
      invoice_id = %invoice.id,
      version = invoice.version,
      "Invoice update committed"
    );
    Ok(())
  }

  async fn transition(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;

    invoice_repository::update_versioned(&mut *tx, invoice, expected_version).await?;
    invoice_history_repository::insert(&mut *tx, &history).await?;
    audit_log_repository::insert(&mut *tx, &audit).await?;

    tx.commit().await?;

    tracing::debug!(
      invoice_id = %invoice.id,
      status = %invoice.status,
      "Invoice transition committed"
    );
    Ok(())
  }
}
