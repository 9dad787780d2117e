use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::audit::{AuditAction, AuditLog, InvoiceHistory};
use crate::domain::shipment::ShipmentRepository;

use super::entities::{Invoice, InvoiceHeader, InvoiceItem};
use super::errors::InvoiceError;
use super::ports::{
  InvoiceItemRepository, InvoiceRepository, InvoiceShipmentRepository, InvoiceUnitOfWork,
};
use super::value_objects::InvoiceStatus;

const ENTITY_TYPE: &str = "Invoice";

/// Line item as submitted by a caller
#[derive(Debug, Clone)]
pub struct InvoiceItemData {
  pub description: String,
  pub quantity: Option<i32>,
  pub unit_price: Option<Decimal>,
  pub total_price: Option<Decimal>,
  pub shipment_id: Option<Uuid>,
}

/// Invoice creation data
#[derive(Debug, Clone)]
pub struct InvoiceData {
  pub header: InvoiceHeader,
  pub items: Vec<InvoiceItemData>,
  pub shipment_ids: Vec<Uuid>,
}

/// Invoice update data, carrying the version the caller last read
#[derive(Debug, Clone)]
pub struct InvoiceUpdateData {
  pub version: i32,
  pub invoice: InvoiceData,
}

pub struct InvoiceServiceDependencies {
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub item_repo: Arc<dyn InvoiceItemRepository>,
  pub invoice_shipment_repo: Arc<dyn InvoiceShipmentRepository>,
  pub shipment_repo: Arc<dyn ShipmentRepository>,
  pub unit_of_work: Arc<dyn InvoiceUnitOfWork>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  item_repo: Arc<dyn InvoiceItemRepository>,
  invoice_shipment_repo: Arc<dyn InvoiceShipmentRepository>,
  shipment_repo: Arc<dyn ShipmentRepository>,
  unit_of_work: Arc<dyn InvoiceUnitOfWork>,
}

impl InvoiceService {
  pub fn new(deps: InvoiceServiceDependencies) -> Self {
    Self {
      invoice_repo: deps.invoice_repo,
      item_repo: deps.item_repo,
      invoice_shipment_repo: deps.invoice_shipment_repo,
      shipment_repo: deps.shipment_repo,
      unit_of_work: deps.unit_of_work,
    }
  }

  /// Creates a draft invoice with its items and shipment links
  ///
  /// The invoice, its children and the CREATE audit entry are written in one
  /// unit of work.
  ///
  /// # Errors
  /// `ShipmentNotFound` when a referenced shipment does not exist,
  /// `ShipmentAlreadyLinked` when it already belongs to another invoice.
  pub async fn create_draft_invoice(
    &self,
    user_id: Uuid,
    data: InvoiceData,
  ) -> Result<Invoice, InvoiceError> {
    let shipment_ids = unique_ids(data.shipment_ids);
    self.validate_shipments(&shipment_ids, None).await?;
    self.validate_item_shipments(&data.items).await?;

    let mut invoice = Invoice::new_draft(user_id, data.header)?;
    invoice.replace_items(build_items(invoice.id, data.items)?)?;
    invoice.replace_shipments(&shipment_ids);

    let audit = AuditLog::new(
      ENTITY_TYPE,
      invoice.id,
      AuditAction::Create,
      user_id,
      None,
      Some(serde_json::to_value(&invoice)?),
      format!("Draft invoice created for {}", invoice.client_name),
    );

    self.unit_of_work.create(&invoice, audit).await?;

    tracing::info!(invoice_id = %invoice.id, %user_id, "Draft invoice created");

    Ok(invoice)
  }

  /// Replaces header, items and shipment links of a draft
  ///
  /// # Errors
  /// `InvoiceNotFound`, `CannotEditInvoice` for non-draft invoices and
  /// `VersionConflict` when `data.version` is stale.
  pub async fn update_draft_invoice(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    data: InvoiceUpdateData,
  ) -> Result<Invoice, InvoiceError> {
    let current = self.load_invoice(invoice_id).await?;

    if !current.can_be_edited() {
      return Err(InvoiceError::CannotEditInvoice(format!(
        "invoice is {}",
        current.status
      )));
    }

    if data.version != current.version {
      return Err(InvoiceError::VersionConflict {
        expected: data.version,
        actual: current.version,
      });
    }

    let shipment_ids = unique_ids(data.invoice.shipment_ids);
    self
      .validate_shipments(&shipment_ids, Some(invoice_id))
      .await?;
    self.validate_item_shipments(&data.invoice.items).await?;

    let before = serde_json::to_value(&current)?;

    let mut invoice = current.clone();
    invoice.apply_header(data.invoice.header)?;
    invoice.replace_items(build_items(invoice.id, data.invoice.items)?)?;
    invoice.replace_shipments(&shipment_ids);
    invoice.advance_version();

    let (history, audit) = change_records(
      &invoice,
      user_id,
      AuditAction::Update,
      before,
      format!("Draft invoice updated to version {}", invoice.version),
    )?;

    self
      .unit_of_work
      .update(&invoice, current.version, history, audit)
      .await?;

    tracing::info!(%invoice_id, version = invoice.version, "Draft invoice updated");

    Ok(invoice)
  }

  /// Moves a draft to ISSUED once it satisfies every issuing rule
  pub async fn issue_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .transition(user_id, invoice_id, AuditAction::Issue, Invoice::issue)
      .await
  }

  pub async fn mark_invoice_paid(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<Invoice, InvoiceError> {
    self
      .transition(user_id, invoice_id, AuditAction::Pay, Invoice::mark_paid)
      .await
  }

  pub async fn cancel_invoice(&self, user_id: Uuid, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .transition(user_id, invoice_id, AuditAction::Cancel, Invoice::cancel)
      .await
  }

  /// Dispatches to the operation that reaches `new_status`
  pub async fn change_invoice_status(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    new_status: InvoiceStatus,
  ) -> Result<Invoice, InvoiceError> {
    match new_status {
      InvoiceStatus::Issued => self.issue_invoice(user_id, invoice_id).await,
      InvoiceStatus::Paid => self.mark_invoice_paid(user_id, invoice_id).await,
      InvoiceStatus::Cancelled => self.cancel_invoice(user_id, invoice_id).await,
      InvoiceStatus::Draft => {
        let invoice = self.load_invoice(invoice_id).await?;
        Err(InvoiceError::InvalidStatusTransition {
          from: invoice.status,
          to: InvoiceStatus::Draft,
        })
      }
    }
  }

  pub async fn get_invoice_by_id(&self, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self.load_invoice(invoice_id).await
  }

  pub async fn get_invoices_by_status(
    &self,
    status: InvoiceStatus,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoice_repo.find_by_status(status).await?;
    self.hydrate_all(invoices).await
  }

  pub async fn get_all_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoice_repo.find_all().await?;
    self.hydrate_all(invoices).await
  }

  async fn transition(
    &self,
    user_id: Uuid,
    invoice_id: Uuid,
    action: AuditAction,
    apply: fn(&mut Invoice) -> Result<(), InvoiceError>,
  ) -> Result<Invoice, InvoiceError> {
    let current = self.load_invoice(invoice_id).await?;
    let before = serde_json::to_value(&current)?;

    let mut invoice = current.clone();
    apply(&mut invoice)?;

    let (history, audit) = change_records(
      &invoice,
      user_id,
      action,
      before,
      format!("Invoice {} moved to {}", invoice_id, invoice.status),
    )?;

    self
      .unit_of_work
      .transition(&invoice, current.version, history, audit)
      .await?;

    tracing::info!(%invoice_id, status = %invoice.status, "Invoice status changed");

    Ok(invoice)
  }

  /// Every id must exist and be free or already linked to `invoice_id`
  async fn validate_shipments(
    &self,
    shipment_ids: &[Uuid],
    invoice_id: Option<Uuid>,
  ) -> Result<(), InvoiceError> {
    for shipment_id in shipment_ids {
      self.ensure_shipment_exists(*shipment_id).await?;

      let existing_link = self
        .invoice_shipment_repo
        .find_by_shipment_id(*shipment_id)
        .await?;

      if let Some(link) = existing_link {
        if Some(link.invoice_id) != invoice_id {
          return Err(InvoiceError::ShipmentAlreadyLinked(*shipment_id));
        }
      }
    }
    Ok(())
  }

  /// Items may point at any existing shipment, linked or not
  async fn validate_item_shipments(&self, items: &[InvoiceItemData]) -> Result<(), InvoiceError> {
    let shipment_ids = unique_ids(items.iter().filter_map(|item| item.shipment_id).collect());
    for shipment_id in shipment_ids {
      self.ensure_shipment_exists(shipment_id).await?;
    }
    Ok(())
  }

  async fn ensure_shipment_exists(&self, shipment_id: Uuid) -> Result<(), InvoiceError> {
    self
      .shipment_repo
      .find_by_id(shipment_id)
      .await?
      .ok_or(InvoiceError::ShipmentNotFound(shipment_id))?;
    Ok(())
  }

  async fn load_invoice(&self, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))?;

    self.hydrate(invoice).await
  }

  async fn hydrate(&self, mut invoice: Invoice) -> Result<Invoice, InvoiceError> {
    invoice.items = self.item_repo.find_by_invoice_id(invoice.id).await?;
    invoice.shipments = self
      .invoice_shipment_repo
      .find_by_invoice_id(invoice.id)
      .await?;
    Ok(invoice)
  }

  async fn hydrate_all(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>, InvoiceError> {
    let mut hydrated = Vec::with_capacity(invoices.len());
    for invoice in invoices {
      hydrated.push(self.hydrate(invoice).await?);
    }
    Ok(hydrated)
  }
}

/// History snapshot and audit entry for a persisted change
fn change_records(
  invoice: &Invoice,
  user_id: Uuid,
  action: AuditAction,
  before: Value,
  summary: String,
) -> Result<(InvoiceHistory, AuditLog), InvoiceError> {
  let after = serde_json::to_value(invoice)?;

  let history = InvoiceHistory::new(
    invoice.id,
    invoice.version,
    invoice.invoice_number.clone(),
    invoice.fiscal_folio.clone(),
    after.clone(),
    user_id,
  );
  let audit = AuditLog::new(
    ENTITY_TYPE,
    invoice.id,
    action,
    user_id,
    Some(before),
    Some(after),
    summary,
  );

  Ok((history, audit))
}

fn build_items(
  invoice_id: Uuid,
  items: Vec<InvoiceItemData>,
) -> Result<Vec<InvoiceItem>, InvoiceError> {
  items
    .into_iter()
    .map(|item| {
      Ok(
        InvoiceItem::new(
          invoice_id,
          item.description,
          item.quantity,
          item.unit_price,
          item.shipment_id,
        )?
        .with_total(item.total_price)?,
      )
    })
    .collect()
}

fn unique_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
  let mut seen = HashSet::new();
  ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::audit::AuditService;
  use crate::domain::invoice::errors::InvoiceErrorKind;
  use crate::domain::invoice::value_objects::{Currency, ValueObjectError};
  use crate::domain::shipment::Shipment;
  use crate::infrastructure::persistence::memory::{
    InMemoryInvoiceStore, InMemoryShipmentRepository,
  };
  use rust_decimal_macros::dec;

  struct Fixture {
    service: InvoiceService,
    audit: AuditService,
    store: InMemoryInvoiceStore,
    shipment_repo: Arc<InMemoryShipmentRepository>,
  }

  fn fixture() -> Fixture {
    let store = InMemoryInvoiceStore::new();
    let shipment_repo = Arc::new(InMemoryShipmentRepository::new());
    let service = InvoiceService::new(store.service_dependencies(shipment_repo.clone()));

    Fixture {
      service,
      audit: store.audit_service(),
      store,
      shipment_repo,
    }
  }

  fn header(client_name: &str) -> InvoiceHeader {
    InvoiceHeader {
      fiscal_folio: None,
      invoice_number: Some("INV-100".to_string()),
      client_name: client_name.to_string(),
      invoice_date: None,
      due_date: None,
      tax_amount: dec!(5),
      currency: Currency::default(),
    }
  }

  fn item(unit_price: Decimal, quantity: i32) -> InvoiceItemData {
    InvoiceItemData {
      description: "Freight".to_string(),
      quantity: Some(quantity),
      unit_price: Some(unit_price),
      total_price: None,
      shipment_id: None,
    }
  }

  fn data(items: Vec<InvoiceItemData>, shipment_ids: Vec<Uuid>) -> InvoiceData {
    InvoiceData {
      header: header("Client A"),
      items,
      shipment_ids,
    }
  }

  #[tokio::test]
  async fn test_create_draft_invoice() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-1".to_string(), None));

    let invoice = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(25.75), 4)], vec![shipment.id]))
      .await
      .unwrap();

    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.version, 1);
    assert_eq!(invoice.subtotal, dec!(103.00));
    assert_eq!(invoice.total_amount, dec!(108.00));
    assert_eq!(invoice.items.len(), 1);
    assert_eq!(invoice.shipments[0].shipment_id, shipment.id);

    let trail = f.audit.get_audit_trail("Invoice", invoice.id).await.unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, AuditAction::Create);
    assert_eq!(trail[0].entity_type, "Invoice");
    assert!(trail[0].old_value.is_none());
    assert!(trail[0].new_value.is_some());
  }

  #[tokio::test]
  async fn test_create_with_unknown_shipment() {
    let f = fixture();
    let missing = Uuid::new_v4();

    let result = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![], vec![missing]))
      .await;

    assert!(matches!(result, Err(InvoiceError::ShipmentNotFound(id)) if id == missing));
    assert!(f.store.invoices.is_empty());
  }

  #[tokio::test]
  async fn test_create_with_unknown_item_shipment() {
    let f = fixture();
    let missing = Uuid::new_v4();
    let mut line = item(dec!(10), 1);
    line.shipment_id = Some(missing);

    let result = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![line], vec![]))
      .await;

    assert!(matches!(result, Err(InvoiceError::ShipmentNotFound(id)) if id == missing));
    assert!(f.store.invoices.is_empty());
  }

  #[tokio::test]
  async fn test_item_may_reference_existing_shipment() {
    let f = fixture();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-9".to_string(), None));
    let mut line = item(dec!(10), 1);
    line.shipment_id = Some(shipment.id);

    let invoice = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![line], vec![]))
      .await
      .unwrap();

    assert_eq!(invoice.items[0].shipment_id, Some(shipment.id));
    assert!(invoice.shipments.is_empty());
  }

  #[tokio::test]
  async fn test_create_with_overflowing_unit_price() {
    let f = fixture();

    let result = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![item(Decimal::MAX, 2)], vec![]))
      .await;

    let err = result.unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::Validation(ValueObjectError::InvalidAmount(_))
    ));
    assert_eq!(err.kind(), InvoiceErrorKind::Business);
    assert!(f.store.invoices.is_empty());
  }

  #[tokio::test]
  async fn test_update_with_overflowing_line_total() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();

    let result = f
      .service
      .update_draft_invoice(
        user_id,
        created.id,
        InvoiceUpdateData {
          version: 1,
          invoice: data(vec![item(dec!(999999999999999), i32::MAX)], vec![]),
        },
      )
      .await;

    assert!(matches!(result, Err(InvoiceError::Validation(_))));
    let reloaded = f.service.get_invoice_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.subtotal, dec!(10));
  }

  #[tokio::test]
  async fn test_create_with_shipment_linked_elsewhere() {
    let f = fixture();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-2".to_string(), None));
    f.service
      .create_draft_invoice(Uuid::new_v4(), data(vec![], vec![shipment.id]))
      .await
      .unwrap();

    let result = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![], vec![shipment.id]))
      .await;

    let err = result.unwrap_err();
    assert!(matches!(err, InvoiceError::ShipmentAlreadyLinked(_)));
    assert_eq!(err.kind(), InvoiceErrorKind::Business);
  }

  #[tokio::test]
  async fn test_failed_create_leaves_nothing_behind() {
    let f = fixture();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-4".to_string(), None));
    f.store.audit.fail_writes();

    let result = f
      .service
      .create_draft_invoice(
        Uuid::new_v4(),
        data(vec![item(dec!(1), 1)], vec![shipment.id]),
      )
      .await;

    let err = result.unwrap_err();
    assert!(matches!(err, InvoiceError::Database(_)));
    assert_eq!(err.kind(), InvoiceErrorKind::Internal);
    assert!(f.store.invoices.is_empty());
    assert_eq!(f.store.items.len(), 0);
    assert!(
      f.store
        .links
        .find_by_shipment_id(shipment.id)
        .await
        .unwrap()
        .is_none()
    );
  }

  #[tokio::test]
  async fn test_failed_update_keeps_previous_state() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-5".to_string(), None));
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![shipment.id]))
      .await
      .unwrap();
    f.store.audit.fail_writes();

    let result = f
      .service
      .update_draft_invoice(
        user_id,
        created.id,
        InvoiceUpdateData {
          version: 1,
          invoice: data(vec![item(dec!(20), 2), item(dec!(5), 1)], vec![]),
        },
      )
      .await;

    assert!(matches!(result, Err(InvoiceError::Database(_))));

    let reloaded = f.service.get_invoice_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.subtotal, dec!(10));
    assert_eq!(reloaded.items, created.items);
    assert_eq!(reloaded.shipments.len(), 1);
    assert_eq!(reloaded.shipments[0].shipment_id, shipment.id);
    assert!(f.audit.get_invoice_history(created.id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_failed_issue_keeps_draft() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();
    f.store.audit.fail_writes();

    assert!(f.service.issue_invoice(user_id, created.id).await.is_err());

    let reloaded = f.service.get_invoice_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.status, InvoiceStatus::Draft);
    assert_eq!(reloaded.version, 1);
    assert!(f.audit.get_invoice_history(created.id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_update_draft_invoice() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let shipment = f.shipment_repo.insert(Shipment::new("TRK-3".to_string(), None));
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![shipment.id]))
      .await
      .unwrap();

    let updated = f
      .service
      .update_draft_invoice(
        user_id,
        created.id,
        InvoiceUpdateData {
          version: 1,
          invoice: InvoiceData {
            header: header("Client B"),
            items: vec![item(dec!(75.50), 3), item(dec!(0.01), 3)],
            shipment_ids: vec![shipment.id],
          },
        },
      )
      .await
      .unwrap();

    assert_eq!(updated.version, 2);
    assert_eq!(updated.client_name, "Client B");
    assert_eq!(updated.items.len(), 2);
    assert_eq!(updated.subtotal, dec!(226.53));
    assert_eq!(updated.shipments.len(), 1);

    let reloaded = f.service.get_invoice_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.items.len(), 2);
    assert_eq!(reloaded.version, 2);

    let history = f.audit.get_invoice_history(created.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, 2);
    assert_eq!(history[0].invoice_data["client_name"], "Client B");

    let trail = f.audit.get_audit_trail("Invoice", created.id).await.unwrap();
    assert_eq!(trail[0].action, AuditAction::Update);
    assert_eq!(
      trail[0].old_value.as_ref().unwrap()["client_name"],
      "Client A"
    );
  }

  #[tokio::test]
  async fn test_update_with_stale_version() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();

    let update = InvoiceUpdateData {
      version: 1,
      invoice: data(vec![item(dec!(20), 1)], vec![]),
    };
    f.service
      .update_draft_invoice(user_id, created.id, update.clone())
      .await
      .unwrap();

    let result = f
      .service
      .update_draft_invoice(user_id, created.id, update)
      .await;

    let err = result.unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::VersionConflict {
        expected: 1,
        actual: 2
      }
    ));
    assert_eq!(err.kind(), InvoiceErrorKind::Business);
  }

  #[tokio::test]
  async fn test_update_missing_invoice() {
    let f = fixture();

    let result = f
      .service
      .update_draft_invoice(
        Uuid::new_v4(),
        Uuid::new_v4(),
        InvoiceUpdateData {
          version: 1,
          invoice: data(vec![], vec![]),
        },
      )
      .await;

    assert!(matches!(result, Err(InvoiceError::InvoiceNotFound(_))));
  }

  #[tokio::test]
  async fn test_update_issued_invoice_rejected() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();
    let issued = f.service.issue_invoice(user_id, created.id).await.unwrap();

    let result = f
      .service
      .update_draft_invoice(
        user_id,
        created.id,
        InvoiceUpdateData {
          version: issued.version,
          invoice: data(vec![item(dec!(10), 1)], vec![]),
        },
      )
      .await;

    assert!(matches!(result, Err(InvoiceError::CannotEditInvoice(_))));
  }

  #[tokio::test]
  async fn test_issue_invoice() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let created = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 2)], vec![]))
      .await
      .unwrap();

    let issued = f.service.issue_invoice(user_id, created.id).await.unwrap();

    assert_eq!(issued.status, InvoiceStatus::Issued);
    assert_eq!(issued.version, 2);
    assert_eq!(issued.items.len(), 1);

    let history = f.audit.get_invoice_history(created.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].created_by, user_id);

    let trail = f.audit.get_audit_trail("Invoice", created.id).await.unwrap();
    assert_eq!(trail[0].action, AuditAction::Issue);
  }

  #[tokio::test]
  async fn test_issue_without_items_rejected() {
    let f = fixture();
    let created = f
      .service
      .create_draft_invoice(Uuid::new_v4(), data(vec![], vec![]))
      .await
      .unwrap();

    let result = f.service.issue_invoice(Uuid::new_v4(), created.id).await;

    assert!(matches!(result, Err(InvoiceError::CannotIssueInvoice(_))));
  }

  #[tokio::test]
  async fn test_issue_missing_invoice() {
    let f = fixture();

    let result = f.service.issue_invoice(Uuid::new_v4(), Uuid::new_v4()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, InvoiceError::InvoiceNotFound(_)));
    assert_eq!(err.kind(), InvoiceErrorKind::NotFound);
  }

  #[tokio::test]
  async fn test_pay_and_cancel() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let first = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();
    let second = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();

    assert!(matches!(
      f.service.mark_invoice_paid(user_id, first.id).await,
      Err(InvoiceError::InvalidStatusTransition { .. })
    ));

    f.service.issue_invoice(user_id, first.id).await.unwrap();
    let paid = f
      .service
      .change_invoice_status(user_id, first.id, InvoiceStatus::Paid)
      .await
      .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.version, 3);

    let cancelled = f.service.cancel_invoice(user_id, second.id).await.unwrap();
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

    assert!(matches!(
      f.service
        .change_invoice_status(user_id, second.id, InvoiceStatus::Draft)
        .await,
      Err(InvoiceError::InvalidStatusTransition { .. })
    ));
  }

  #[tokio::test]
  async fn test_list_by_status() {
    let f = fixture();
    let user_id = Uuid::new_v4();
    let first = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();
    let second = f
      .service
      .create_draft_invoice(user_id, data(vec![item(dec!(10), 1)], vec![]))
      .await
      .unwrap();
    f.service.issue_invoice(user_id, first.id).await.unwrap();

    let drafts = f
      .service
      .get_invoices_by_status(InvoiceStatus::Draft)
      .await
      .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, second.id);

    let all = f.service.get_all_invoices().await.unwrap();
    assert_eq!(all.len(), 2);
  }

  #[test]
  fn test_unique_ids_preserves_order() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert_eq!(unique_ids(vec![a, b, a]), vec![a, b]);
  }
}
