use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{dtos::ApiResponse, errors::ApiError};
use crate::application::audit::{
  GetInvoiceAuditTrailUseCase, GetInvoiceHistoryUseCase, GetInvoiceHistoryVersionUseCase,
};

/// GET /api/invoices/{id}/history
pub async fn invoice_history_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceHistoryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let history = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Invoice history retrieved successfully",
    history,
  )))
}

/// Handler for a single snapshot
///
/// GET /api/invoices/{id}/history/{version}
/// A missing version answers 404 with the error envelope.
pub async fn invoice_history_version_handler(
  path: web::Path<(Uuid, i32)>,
  use_case: web::Data<Arc<GetInvoiceHistoryVersionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (invoice_id, version) = path.into_inner();

  match use_case.execute(invoice_id, version).await? {
    Some(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(
      "Invoice version retrieved successfully",
      snapshot,
    ))),
    None => Err(ApiError::NotFound("Version not found".to_string())),
  }
}

/// GET /api/invoices/{id}/audit
pub async fn invoice_audit_trail_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceAuditTrailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let entries = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Audit trail retrieved successfully",
    entries,
  )))
}
