//! In-memory port implementations used by service and handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::audit::{
  AuditError, AuditLog, AuditLogRepository, AuditService, InvoiceHistory,
  InvoiceHistoryRepository,
};
use crate::domain::auth::{AuthError, RepositoryError, User, ports::UserRepository};
use crate::domain::invoice::{
  Invoice, InvoiceError, InvoiceItem, InvoiceItemRepository, InvoiceRepository,
  InvoiceServiceDependencies, InvoiceShipment, InvoiceShipmentRepository, InvoiceStatus,
  InvoiceUnitOfWork,
};
use crate::domain::shipment::{Shipment, ShipmentError, ShipmentRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.username == user.username) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey {
        constraint: "users_username_key".to_string(),
      }));
    }
    if users.iter().any(|u| u.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey {
        constraint: "users_email_key".to_string(),
      }));
    }
    users.push(user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().find(|u| u.username == username).cloned())
  }

  async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, AuthError> {
    let users = self.users.lock().unwrap();
    let email = identifier.to_lowercase();
    Ok(
      users
        .iter()
        .find(|u| u.username == identifier || u.email == email)
        .cloned(),
    )
  }

  async fn exists_by_username(&self, username: &str) -> Result<bool, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().any(|u| u.username == username))
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().any(|u| u.email == email))
  }

  async fn find_all(&self) -> Result<Vec<User>, AuthError> {
    let mut users = self.users.lock().unwrap().clone();
    users.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(users)
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.id != user.id && u.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey {
        constraint: "users_email_key".to_string(),
      }));
    }
    let slot = users
      .iter_mut()
      .find(|u| u.id == user.id)
      .ok_or(AuthError::Repository(RepositoryError::NotFound))?;
    *slot = user.clone();
    Ok(user)
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    let mut users = self.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct InMemoryShipmentRepository {
  shipments: Mutex<Vec<Shipment>>,
}

impl InMemoryShipmentRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, shipment: Shipment) -> Shipment {
    self.shipments.lock().unwrap().push(shipment.clone());
    shipment
  }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Shipment>, ShipmentError> {
    let shipments = self.shipments.lock().unwrap();
    Ok(shipments.iter().find(|s| s.id == id).cloned())
  }
}

/// Stores invoice headers only, like the relational table does
#[derive(Default)]
pub struct InMemoryInvoiceRepository {
  invoices: Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.invoices.lock().unwrap().is_empty()
  }

  fn header_only(mut invoice: Invoice) -> Invoice {
    invoice.items.clear();
    invoice.shipments.clear();
    invoice
  }

  fn newest_first(invoices: impl Iterator<Item = Invoice>) -> Vec<Invoice> {
    let mut invoices: Vec<Invoice> = invoices.collect();
    invoices.reverse();
    invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    invoices
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let invoices = self.invoices.lock().unwrap();
    Ok(invoices.iter().find(|i| i.id == id).cloned())
  }

  async fn find_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoices.lock().unwrap();
    Ok(Self::newest_first(
      invoices.iter().filter(|i| i.status == status).cloned(),
    ))
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoices.lock().unwrap();
    Ok(Self::newest_first(invoices.iter().cloned()))
  }
}

#[derive(Default)]
pub struct InMemoryInvoiceItemRepository {
  items: Mutex<Vec<InvoiceItem>>,
}

impl InMemoryInvoiceItemRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.lock().unwrap().len()
  }
}

#[async_trait]
impl InvoiceItemRepository for InMemoryInvoiceItemRepository {
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, InvoiceError> {
    let items = self.items.lock().unwrap();
    Ok(
      items
        .iter()
        .filter(|i| i.invoice_id == invoice_id)
        .cloned()
        .collect(),
    )
  }
}

#[derive(Default)]
pub struct InMemoryInvoiceShipmentRepository {
  links: Mutex<Vec<InvoiceShipment>>,
}

impl InMemoryInvoiceShipmentRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InvoiceShipmentRepository for InMemoryInvoiceShipmentRepository {
  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<InvoiceShipment>, InvoiceError> {
    let links = self.links.lock().unwrap();
    Ok(
      links
        .iter()
        .filter(|l| l.invoice_id == invoice_id)
        .cloned()
        .collect(),
    )
  }

  async fn find_by_shipment_id(
    &self,
    shipment_id: Uuid,
  ) -> Result<Option<InvoiceShipment>, InvoiceError> {
    let links = self.links.lock().unwrap();
    Ok(links.iter().find(|l| l.shipment_id == shipment_id).cloned())
  }
}

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
  entries: Mutex<Vec<AuditLog>>,
  failing: AtomicBool,
}

impl InMemoryAuditLogRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes every subsequent write fail
  pub fn fail_writes(&self) {
    self.failing.store(true, Ordering::SeqCst);
  }

  fn is_failing(&self) -> bool {
    self.failing.load(Ordering::SeqCst)
  }

  pub fn entries(&self) -> Vec<AuditLog> {
    self.entries.lock().unwrap().clone()
  }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
  async fn create(&self, entry: AuditLog) -> Result<AuditLog, AuditError> {
    if self.is_failing() {
      return Err(AuditError::Database(sqlx::Error::PoolClosed));
    }
    self.entries.lock().unwrap().push(entry.clone());
    Ok(entry)
  }

  async fn find_by_entity(
    &self,
    entity_type: &str,
    entity_id: Uuid,
  ) -> Result<Vec<AuditLog>, AuditError> {
    let entries = self.entries.lock().unwrap();
    let mut matching: Vec<AuditLog> = entries
      .iter()
      .filter(|e| e.entity_type == entity_type && e.entity_id == entity_id)
      .cloned()
      .collect();
    matching.reverse();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(matching)
  }
}

#[derive(Default)]
pub struct InMemoryInvoiceHistoryRepository {
  history: Mutex<Vec<InvoiceHistory>>,
}

impl InMemoryInvoiceHistoryRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InvoiceHistoryRepository for InMemoryInvoiceHistoryRepository {
  async fn create(&self, history: InvoiceHistory) -> Result<InvoiceHistory, AuditError> {
    self.history.lock().unwrap().push(history.clone());
    Ok(history)
  }

  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceHistory>, AuditError> {
    let history = self.history.lock().unwrap();
    let mut matching: Vec<InvoiceHistory> = history
      .iter()
      .filter(|h| h.invoice_id == invoice_id)
      .cloned()
      .collect();
    matching.sort_by_key(|h| h.version);
    Ok(matching)
  }

  async fn find_by_invoice_id_and_version(
    &self,
    invoice_id: Uuid,
    version: i32,
  ) -> Result<Option<InvoiceHistory>, AuditError> {
    let history = self.history.lock().unwrap();
    Ok(
      history
        .iter()
        .find(|h| h.invoice_id == invoice_id && h.version == version)
        .cloned(),
    )
  }
}

/// Invoice-side repositories sharing one store, plus the unit of work writing into them
#[derive(Default)]
pub struct InMemoryInvoiceStore {
  pub invoices: Arc<InMemoryInvoiceRepository>,
  pub items: Arc<InMemoryInvoiceItemRepository>,
  pub links: Arc<InMemoryInvoiceShipmentRepository>,
  pub history: Arc<InMemoryInvoiceHistoryRepository>,
  pub audit: Arc<InMemoryAuditLogRepository>,
}

impl InMemoryInvoiceStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn audit_service(&self) -> AuditService {
    AuditService::new(self.audit.clone(), self.history.clone())
  }

  pub fn service_dependencies(
    &self,
    shipment_repo: Arc<dyn ShipmentRepository>,
  ) -> InvoiceServiceDependencies {
    InvoiceServiceDependencies {
      invoice_repo: self.invoices.clone(),
      item_repo: self.items.clone(),
      invoice_shipment_repo: self.links.clone(),
      shipment_repo,
      unit_of_work: Arc::new(InMemoryInvoiceUnitOfWork {
        invoices: self.invoices.clone(),
        items: self.items.clone(),
        links: self.links.clone(),
        history: self.history.clone(),
        audit: self.audit.clone(),
      }),
    }
  }
}

/// Checks every write of a change before applying any of them, so a failing
/// change leaves the store untouched
pub struct InMemoryInvoiceUnitOfWork {
  invoices: Arc<InMemoryInvoiceRepository>,
  items: Arc<InMemoryInvoiceItemRepository>,
  links: Arc<InMemoryInvoiceShipmentRepository>,
  history: Arc<InMemoryInvoiceHistoryRepository>,
  audit: Arc<InMemoryAuditLogRepository>,
}

impl InMemoryInvoiceUnitOfWork {
  fn ensure_audit_writable(&self) -> Result<(), InvoiceError> {
    if self.audit.is_failing() {
      return Err(InvoiceError::Database(sqlx::Error::PoolClosed));
    }
    Ok(())
  }

  fn ensure_links_free(stored: &[InvoiceShipment], invoice: &Invoice) -> Result<(), InvoiceError> {
    match invoice.shipments.iter().find(|l| {
      stored
        .iter()
        .any(|s| s.shipment_id == l.shipment_id && s.invoice_id != invoice.id)
    }) {
      Some(taken) => Err(InvoiceError::ShipmentAlreadyLinked(taken.shipment_id)),
      None => Ok(()),
    }
  }

  fn ensure_version(
    invoices: &[Invoice],
    invoice_id: Uuid,
    expected_version: i32,
  ) -> Result<usize, InvoiceError> {
    let index = invoices
      .iter()
      .position(|i| i.id == invoice_id)
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))?;

    if invoices[index].version != expected_version {
      return Err(InvoiceError::VersionConflict {
        expected: expected_version,
        actual: invoices[index].version,
      });
    }
    Ok(index)
  }
}

#[async_trait]
impl InvoiceUnitOfWork for InMemoryInvoiceUnitOfWork {
  async fn create(&self, invoice: &Invoice, audit: AuditLog) -> Result<(), InvoiceError> {
    let mut invoices = self.invoices.invoices.lock().unwrap();
    let mut items = self.items.items.lock().unwrap();
    let mut links = self.links.links.lock().unwrap();

    Self::ensure_links_free(&links, invoice)?;
    self.ensure_audit_writable()?;

    invoices.push(InMemoryInvoiceRepository::header_only(invoice.clone()));
    items.extend(invoice.items.iter().cloned());
    links.extend(invoice.shipments.iter().cloned());
    self.audit.entries.lock().unwrap().push(audit);
    Ok(())
  }

  async fn update(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError> {
    let mut invoices = self.invoices.invoices.lock().unwrap();
    let mut items = self.items.items.lock().unwrap();
    let mut links = self.links.links.lock().unwrap();

    let index = Self::ensure_version(&invoices, invoice.id, expected_version)?;
    Self::ensure_links_free(&links, invoice)?;
    self.ensure_audit_writable()?;

    invoices[index] = InMemoryInvoiceRepository::header_only(invoice.clone());
    items.retain(|i| i.invoice_id != invoice.id);
    items.extend(invoice.items.iter().cloned());
    links.retain(|l| l.invoice_id != invoice.id);
    links.extend(invoice.shipments.iter().cloned());
    self.history.history.lock().unwrap().push(history);
    self.audit.entries.lock().unwrap().push(audit);
    Ok(())
  }

  async fn transition(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError> {
    let mut invoices = self.invoices.invoices.lock().unwrap();

    let index = Self::ensure_version(&invoices, invoice.id, expected_version)?;
    self.ensure_audit_writable()?;

    invoices[index] = InMemoryInvoiceRepository::header_only(invoice.clone());
    self.history.history.lock().unwrap().push(history);
    self.audit.entries.lock().unwrap().push(audit);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::audit::AuditAction;
  use crate::domain::invoice::{Currency, InvoiceHeader};
  use rust_decimal::Decimal;

  fn draft_with_link(shipment_id: Uuid) -> Invoice {
    let mut invoice = Invoice::new_draft(
      Uuid::new_v4(),
      InvoiceHeader {
        fiscal_folio: None,
        invoice_number: None,
        client_name: "Acme".to_string(),
        invoice_date: None,
        due_date: None,
        tax_amount: Decimal::ZERO,
        currency: Currency::default(),
      },
    )
    .unwrap();
    invoice.replace_shipments(&[shipment_id]);
    invoice
  }

  fn created_entry(invoice: &Invoice) -> AuditLog {
    AuditLog::new(
      "Invoice",
      invoice.id,
      AuditAction::Create,
      invoice.created_by,
      None,
      None,
      "created",
    )
  }

  #[tokio::test]
  async fn test_rejected_create_writes_nothing() {
    let store = InMemoryInvoiceStore::new();
    let uow = store
      .service_dependencies(Arc::new(InMemoryShipmentRepository::new()))
      .unit_of_work;
    let shipment_id = Uuid::new_v4();

    let first = draft_with_link(shipment_id);
    uow.create(&first, created_entry(&first)).await.unwrap();

    let second = draft_with_link(shipment_id);
    let result = uow.create(&second, created_entry(&second)).await;

    assert!(matches!(result, Err(InvoiceError::ShipmentAlreadyLinked(id)) if id == shipment_id));
    assert!(store.invoices.find_by_id(second.id).await.unwrap().is_none());
    assert_eq!(store.audit.entries().len(), 1);
  }
}
