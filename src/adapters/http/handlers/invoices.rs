use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ApiResponse, InvoiceRequest, ListInvoicesQuery, UpdateInvoiceRequest},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::invoice::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase, CreateDraftInvoiceCommand,
  CreateDraftInvoiceUseCase, GetInvoiceUseCase, IssueInvoiceUseCase, ListInvoicesCommand,
  ListInvoicesUseCase, UpdateDraftInvoiceCommand, UpdateDraftInvoiceUseCase,
};
use crate::domain::invoice::InvoiceStatus;

/// Handler for draft creation
///
/// POST /api/invoices
/// Body: InvoiceRequest (JSON)
/// Response: the stored invoice with status 201
pub async fn create_invoice_handler(
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<CreateDraftInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user()?;

  let command = CreateDraftInvoiceCommand {
    user_id: user.id,
    invoice: request.into_inner().into(),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(ApiResponse::success(
    "Invoice created successfully",
    invoice,
  )))
}

/// Handler for draft edits
///
/// PUT /api/invoices/{id}
/// Body: UpdateInvoiceRequest; `version` must match the stored one or 409
pub async fn update_invoice_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateInvoiceRequest>,
  use_case: web::Data<Arc<UpdateDraftInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user()?;

  let request = request.into_inner();
  let command = UpdateDraftInvoiceCommand {
    user_id: user.id,
    invoice_id: path.into_inner(),
    version: request.version,
    invoice: request.invoice.into(),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Invoice updated successfully",
    invoice,
  )))
}

/// POST /api/invoices/{id}/issue
pub async fn issue_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<IssueInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user()?;

  let invoice = use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Invoice issued successfully",
    invoice,
  )))
}

/// POST /api/invoices/{id}/pay
pub async fn pay_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  change_status(
    path,
    use_case,
    http_req,
    InvoiceStatus::Paid,
    "Invoice marked as paid",
  )
  .await
}

/// POST /api/invoices/{id}/cancel
pub async fn cancel_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  change_status(
    path,
    use_case,
    http_req,
    InvoiceStatus::Cancelled,
    "Invoice cancelled successfully",
  )
  .await
}

async fn change_status(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
  http_req: HttpRequest,
  new_status: InvoiceStatus,
  message: &str,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user()?;

  let command = ChangeInvoiceStatusCommand {
    user_id: user.id,
    invoice_id: path.into_inner(),
    new_status: new_status.as_str().to_string(),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(message, invoice)))
}

/// GET /api/invoices/{id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Invoice retrieved successfully",
    invoice,
  )))
}

/// Handler for invoice listing
///
/// GET /api/invoices?status=DRAFT
/// Without `status` every invoice is returned; an unknown status is a 400.
pub async fn list_invoices_handler(
  query: web::Query<ListInvoicesQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListInvoicesCommand {
    status_filter: query.into_inner().status,
  };

  let invoices = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Invoices retrieved successfully",
    invoices,
  )))
}
