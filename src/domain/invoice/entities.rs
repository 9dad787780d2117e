use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InvoiceError;
use super::value_objects::{Currency, InvoiceStatus, ValueObjectError, non_negative, storable};

/// Header fields shared by draft creation and draft updates
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
  pub fiscal_folio: Option<String>,
  pub invoice_number: Option<String>,
  pub client_name: String,
  pub invoice_date: Option<NaiveDate>,
  pub due_date: Option<NaiveDate>,
  pub tax_amount: Decimal,
  pub currency: Currency,
}

// Invoice - aggregate root of the invoicing subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub fiscal_folio: Option<String>,
  pub invoice_number: Option<String>,
  pub client_name: String,
  pub invoice_date: NaiveDate,
  pub due_date: Option<NaiveDate>,
  pub subtotal: Decimal,
  pub tax_amount: Decimal,
  pub total_amount: Decimal,
  pub currency: Currency,
  pub status: InvoiceStatus,
  pub pdf_url: Option<String>,
  pub created_by: Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub version: i32,
  pub items: Vec<InvoiceItem>,
  pub shipments: Vec<InvoiceShipment>,
}

impl Invoice {
  /// Starts a new draft at version 1. A missing invoice date defaults to today.
  pub fn new_draft(created_by: Uuid, header: InvoiceHeader) -> Result<Self, InvoiceError> {
    let now = Utc::now();
    let tax_amount = non_negative(header.tax_amount, "Tax amount")?;

    Ok(Self {
      id: Uuid::new_v4(),
      fiscal_folio: header.fiscal_folio,
      invoice_number: header.invoice_number,
      client_name: header.client_name,
      invoice_date: header.invoice_date.unwrap_or_else(|| now.date_naive()),
      due_date: header.due_date,
      subtotal: Decimal::ZERO,
      tax_amount,
      total_amount: tax_amount,
      currency: header.currency,
      status: InvoiceStatus::Draft,
      pdf_url: None,
      created_by,
      created_at: now,
      updated_at: now,
      version: 1,
      items: Vec::new(),
      shipments: Vec::new(),
    })
  }

  /// Overwrites the header of a draft. The invoice date is kept when none is given.
  pub fn apply_header(&mut self, header: InvoiceHeader) -> Result<(), InvoiceError> {
    self.ensure_editable()?;

    self.tax_amount = non_negative(header.tax_amount, "Tax amount")?;
    self.fiscal_folio = header.fiscal_folio;
    self.invoice_number = header.invoice_number;
    self.client_name = header.client_name;
    if let Some(invoice_date) = header.invoice_date {
      self.invoice_date = invoice_date;
    }
    self.due_date = header.due_date;
    self.currency = header.currency;
    self.recalculate_totals()?;
    Ok(())
  }

  /// Replaces the line items, filling in missing item totals
  pub fn replace_items(&mut self, items: Vec<InvoiceItem>) -> Result<(), InvoiceError> {
    self.items = items
      .into_iter()
      .map(|mut item| {
        item.invoice_id = self.id;
        item.ensure_total()?;
        Ok(item)
      })
      .collect::<Result<_, ValueObjectError>>()?;
    self.recalculate_totals()?;
    Ok(())
  }

  pub fn replace_shipments(&mut self, shipment_ids: &[Uuid]) {
    self.shipments = shipment_ids
      .iter()
      .map(|shipment_id| InvoiceShipment::new(self.id, *shipment_id))
      .collect();
  }

  /// subtotal = sum of item totals, total = subtotal + tax
  pub fn recalculate_totals(&mut self) -> Result<(), ValueObjectError> {
    let subtotal = self
      .items
      .iter()
      .filter_map(|item| item.total_price)
      .try_fold(Decimal::ZERO, |sum, total| sum.checked_add(total))
      .ok_or_else(|| ValueObjectError::InvalidAmount("Subtotal is out of range".to_string()))?;
    let subtotal = storable(subtotal, "Subtotal")?;
    let total_amount = subtotal
      .checked_add(self.tax_amount)
      .ok_or_else(|| ValueObjectError::InvalidAmount("Total is out of range".to_string()))?;

    self.total_amount = storable(total_amount, "Total")?;
    self.subtotal = subtotal;
    Ok(())
  }

  pub fn can_be_edited(&self) -> bool {
    self.status.is_editable()
  }

  pub fn can_be_issued(&self) -> bool {
    self.issue_blocker().is_none()
  }

  /// First rule that prevents issuing, if any
  pub fn issue_blocker(&self) -> Option<&'static str> {
    if self.status != InvoiceStatus::Draft {
      Some("only draft invoices can be issued")
    } else if self.items.is_empty() {
      Some("invoice has no items")
    } else if self.subtotal <= Decimal::ZERO {
      Some("subtotal must be greater than zero")
    } else if self.client_name.trim().is_empty() {
      Some("client name is required")
    } else {
      None
    }
  }

  pub fn issue(&mut self) -> Result<(), InvoiceError> {
    if let Some(reason) = self.issue_blocker() {
      return Err(InvoiceError::CannotIssueInvoice(reason.to_string()));
    }
    self.change_status(InvoiceStatus::Issued)
  }

  pub fn mark_paid(&mut self) -> Result<(), InvoiceError> {
    self.change_status(InvoiceStatus::Paid)
  }

  pub fn cancel(&mut self) -> Result<(), InvoiceError> {
    self.change_status(InvoiceStatus::Cancelled)
  }

  fn change_status(&mut self, new_status: InvoiceStatus) -> Result<(), InvoiceError> {
    if !self.status.can_transition_to(new_status) {
      return Err(InvoiceError::InvalidStatusTransition {
        from: self.status,
        to: new_status,
      });
    }

    self.status = new_status;
    self.advance_version();
    Ok(())
  }

  /// Bumps the optimistic-lock version and the modification timestamp
  pub fn advance_version(&mut self) {
    self.version += 1;
    self.updated_at = Utc::now();
  }

  fn ensure_editable(&self) -> Result<(), InvoiceError> {
    if !self.can_be_edited() {
      return Err(InvoiceError::CannotEditInvoice(format!(
        "invoice is {}",
        self.status
      )));
    }
    Ok(())
  }
}

// InvoiceItem - one billed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub shipment_id: Option<Uuid>,
  pub description: String,
  pub quantity: Option<i32>,
  pub unit_price: Option<Decimal>,
  pub total_price: Option<Decimal>,
  pub created_at: DateTime<Utc>,
}

impl InvoiceItem {
  pub fn new(
    invoice_id: Uuid,
    description: String,
    quantity: Option<i32>,
    unit_price: Option<Decimal>,
    shipment_id: Option<Uuid>,
  ) -> Result<Self, ValueObjectError> {
    let description = description.trim().to_string();
    if description.is_empty() {
      return Err(ValueObjectError::InvalidDescription(
        "Description cannot be empty".to_string(),
      ));
    }
    if let Some(quantity) = quantity.filter(|q| *q <= 0) {
      return Err(ValueObjectError::InvalidQuantity(format!(
        "Quantity must be positive, got {}",
        quantity
      )));
    }
    if let Some(unit_price) = unit_price {
      non_negative(unit_price, "Unit price")?;
    }

    Ok(Self {
      id: Uuid::new_v4(),
      invoice_id,
      shipment_id,
      description,
      quantity,
      unit_price,
      total_price: None,
      created_at: Utc::now(),
    })
  }

  /// Keeps an explicitly provided total instead of deriving it
  pub fn with_total(mut self, total_price: Option<Decimal>) -> Result<Self, ValueObjectError> {
    self.total_price = total_price
      .map(|total| storable(total, "Total price"))
      .transpose()?;
    Ok(self)
  }

  /// unit_price × quantity when both are present; otherwise the total is left as is
  pub fn calculate_total(&mut self) -> Result<(), ValueObjectError> {
    if let (Some(unit_price), Some(quantity)) = (self.unit_price, self.quantity) {
      let total = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| ValueObjectError::InvalidAmount("Total price is out of range".to_string()))?;
      self.total_price = Some(storable(total, "Total price")?);
    }
    Ok(())
  }

  /// Derives the total only when none has been set
  pub fn ensure_total(&mut self) -> Result<(), ValueObjectError> {
    if self.total_price.is_none() {
      self.calculate_total()?;
    }
    Ok(())
  }
}

// InvoiceShipment - links one shipment to one invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceShipment {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub shipment_id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl InvoiceShipment {
  pub fn new(invoice_id: Uuid, shipment_id: Uuid) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      shipment_id,
      created_at: Utc::now(),
    }
  }
}
