use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Shipment;
use super::errors::ShipmentError;

#[async_trait]
pub trait ShipmentRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Shipment>, ShipmentError>;
}
