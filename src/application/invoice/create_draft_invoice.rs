use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{
  Currency, Invoice, InvoiceData, InvoiceError, InvoiceHeader, InvoiceItemData, InvoiceService,
};

#[derive(Debug, Clone)]
pub struct InvoiceItemInput {
  pub description: String,
  pub quantity: Option<i32>,
  pub unit_price: Option<Decimal>,
  /// Kept as is when present, otherwise derived from price and quantity
  pub total_price: Option<Decimal>,
  pub shipment_id: Option<Uuid>,
}

/// Editable invoice fields shared by create and update
#[derive(Debug, Clone)]
pub struct InvoiceInput {
  pub fiscal_folio: Option<String>,
  pub invoice_number: Option<String>,
  pub client_name: String,
  pub invoice_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub tax_amount: Option<Decimal>,
  pub currency: Option<String>,
  pub items: Vec<InvoiceItemInput>,
  pub shipment_ids: Vec<Uuid>,
}

impl InvoiceInput {
  pub(super) fn into_data(self) -> Result<InvoiceData, InvoiceError> {
    let currency = match self.currency {
      Some(code) => Currency::new(code)?,
      None => Currency::default(),
    };

    Ok(InvoiceData {
      header: InvoiceHeader {
        fiscal_folio: blank_to_none(self.fiscal_folio),
        invoice_number: blank_to_none(self.invoice_number),
        client_name: self.client_name.trim().to_string(),
        invoice_date: self.invoice_date,
        due_date: self.due_date,
        tax_amount: self.tax_amount.unwrap_or(Decimal::ZERO),
        currency,
      },
      items: self
        .items
        .into_iter()
        .map(|item| InvoiceItemData {
          description: item.description,
          quantity: item.quantity,
          unit_price: item.unit_price,
          total_price: item.total_price,
          shipment_id: item.shipment_id,
        })
        .collect(),
      shipment_ids: self.shipment_ids,
    })
  }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct CreateDraftInvoiceCommand {
  pub user_id: Uuid,
  pub invoice: InvoiceInput,
}

pub struct CreateDraftInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateDraftInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateDraftInvoiceCommand) -> Result<Invoice, InvoiceError> {
    let data = command.invoice.into_data()?;

    self
      .invoice_service
      .create_draft_invoice(command.user_id, data)
      .await
  }
}
