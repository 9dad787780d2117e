use actix_web::{HttpRequest, error, web};
use std::sync::Arc;

use crate::application::audit::{
  GetInvoiceAuditTrailUseCase, GetInvoiceHistoryUseCase, GetInvoiceHistoryVersionUseCase,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase, ValidateTokenUseCase,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateDraftInvoiceUseCase, GetInvoiceUseCase, IssueInvoiceUseCase,
  ListInvoicesUseCase, UpdateDraftInvoiceUseCase,
};
use crate::application::user::{
  DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};
use crate::domain::audit::AuditService;
use crate::domain::auth::AuthService;
use crate::domain::invoice::InvoiceService;

use super::errors::ApiError;
use super::handlers::{auth, history, invoices, users};
use super::middleware::AuthMiddleware;

/// Every use case the JSON API needs, built once at startup
///
/// Cloning only bumps reference counts, so the struct can be moved into the
/// per-worker `HttpServer` factory.
#[derive(Clone)]
pub struct ApiDependencies {
  pub auth_service: Arc<AuthService>,
  pub register: Arc<RegisterUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub current_user: Arc<GetCurrentUserUseCase>,
  pub validate_token: Arc<ValidateTokenUseCase>,
  pub list_users: Arc<ListUsersUseCase>,
  pub get_user: Arc<GetUserUseCase>,
  pub update_user: Arc<UpdateUserUseCase>,
  pub delete_user: Arc<DeleteUserUseCase>,
  pub create_invoice: Arc<CreateDraftInvoiceUseCase>,
  pub update_invoice: Arc<UpdateDraftInvoiceUseCase>,
  pub issue_invoice: Arc<IssueInvoiceUseCase>,
  pub change_invoice_status: Arc<ChangeInvoiceStatusUseCase>,
  pub get_invoice: Arc<GetInvoiceUseCase>,
  pub list_invoices: Arc<ListInvoicesUseCase>,
  pub invoice_history: Arc<GetInvoiceHistoryUseCase>,
  pub invoice_history_version: Arc<GetInvoiceHistoryVersionUseCase>,
  pub audit_trail: Arc<GetInvoiceAuditTrailUseCase>,
}

impl ApiDependencies {
  pub fn new(
    auth_service: Arc<AuthService>,
    invoice_service: Arc<InvoiceService>,
    audit_service: Arc<AuditService>,
  ) -> Self {
    Self {
      register: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      current_user: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
      validate_token: Arc::new(ValidateTokenUseCase::new(auth_service.clone())),
      list_users: Arc::new(ListUsersUseCase::new(auth_service.clone())),
      get_user: Arc::new(GetUserUseCase::new(auth_service.clone())),
      update_user: Arc::new(UpdateUserUseCase::new(auth_service.clone())),
      delete_user: Arc::new(DeleteUserUseCase::new(auth_service.clone())),
      create_invoice: Arc::new(CreateDraftInvoiceUseCase::new(invoice_service.clone())),
      update_invoice: Arc::new(UpdateDraftInvoiceUseCase::new(invoice_service.clone())),
      issue_invoice: Arc::new(IssueInvoiceUseCase::new(invoice_service.clone())),
      change_invoice_status: Arc::new(ChangeInvoiceStatusUseCase::new(invoice_service.clone())),
      get_invoice: Arc::new(GetInvoiceUseCase::new(invoice_service.clone())),
      list_invoices: Arc::new(ListInvoicesUseCase::new(invoice_service)),
      invoice_history: Arc::new(GetInvoiceHistoryUseCase::new(audit_service.clone())),
      invoice_history_version: Arc::new(GetInvoiceHistoryVersionUseCase::new(
        audit_service.clone(),
      )),
      audit_trail: Arc::new(GetInvoiceAuditTrailUseCase::new(audit_service)),
      auth_service,
    }
  }
}

/// Configure the JSON API
///
/// Mount under `/api`:
///
/// ```no_run
/// # use actix_web::{App, web};
/// # use billdesk::adapters::http::routes::{ApiDependencies, configure_api_routes};
/// # fn example(deps: ApiDependencies) {
/// let app = App::new().service(web::scope("/api").configure(|cfg| configure_api_routes(cfg, deps)));
/// # }
/// ```
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  // Extractor failures answer with the envelope instead of actix's plain text
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler));

  let auth_deps = deps.clone();
  let user_deps = deps.clone();
  let auth_service = deps.auth_service.clone();
  cfg
    .service(web::scope("/auth").configure(|cfg| configure_auth_routes(cfg, auth_deps)))
    .service(
      web::scope("/users")
        .configure(|cfg| configure_user_routes(cfg, user_deps))
        .wrap(AuthMiddleware::new(auth_service.clone())),
    )
    .service(
      web::scope("/invoices")
        .configure(|cfg| configure_invoice_routes(cfg, deps))
        .wrap(AuthMiddleware::new(auth_service)),
    );
}

/// Configure authentication routes
///
/// # Routes
///
/// - POST /register - Create an account and sign a token
/// - POST /login - Exchange credentials for a token
/// - GET /profile - Profile of the bearer (authenticated)
/// - POST /validate?token= - Check a token without failing
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.register))
    .app_data(web::Data::new(deps.login))
    .app_data(web::Data::new(deps.current_user))
    .app_data(web::Data::new(deps.validate_token))
    .route("/register", web::post().to(auth::register_handler))
    .route("/login", web::post().to(auth::login_handler))
    .route("/validate", web::post().to(auth::validate_token_handler))
    .service(
      web::resource("/profile")
        .route(web::get().to(auth::profile_handler))
        .wrap(AuthMiddleware::new(deps.auth_service)),
    );
}

/// Configure user management routes
///
/// Expects to be mounted behind `AuthMiddleware`.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_users))
    .app_data(web::Data::new(deps.get_user))
    .app_data(web::Data::new(deps.update_user))
    .app_data(web::Data::new(deps.delete_user))
    .route("", web::get().to(users::list_users_handler))
    .route("/{id}", web::get().to(users::get_user_handler))
    .route("/{id}", web::put().to(users::update_user_handler))
    .route("/{id}", web::delete().to(users::delete_user_handler));
}

/// Configure invoice routes
///
/// Expects to be mounted behind `AuthMiddleware`.
///
/// # Routes
///
/// - POST / - Create a draft
/// - GET /?status= - List, optionally by status
/// - GET /{id} - Fetch one invoice
/// - PUT /{id} - Edit a draft (optimistic lock on `version`)
/// - POST /{id}/issue, /{id}/pay, /{id}/cancel - Lifecycle transitions
/// - GET /{id}/history, /{id}/history/{version} - Snapshots
/// - GET /{id}/audit - Audit trail
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: ApiDependencies) {
  cfg
    .app_data(web::Data::new(deps.create_invoice))
    .app_data(web::Data::new(deps.update_invoice))
    .app_data(web::Data::new(deps.issue_invoice))
    .app_data(web::Data::new(deps.change_invoice_status))
    .app_data(web::Data::new(deps.get_invoice))
    .app_data(web::Data::new(deps.list_invoices))
    .app_data(web::Data::new(deps.invoice_history))
    .app_data(web::Data::new(deps.invoice_history_version))
    .app_data(web::Data::new(deps.audit_trail))
    .route("", web::post().to(invoices::create_invoice_handler))
    .route("", web::get().to(invoices::list_invoices_handler))
    .route("/{id}", web::get().to(invoices::get_invoice_handler))
    .route("/{id}", web::put().to(invoices::update_invoice_handler))
    .route("/{id}/issue", web::post().to(invoices::issue_invoice_handler))
    .route("/{id}/pay", web::post().to(invoices::pay_invoice_handler))
    .route("/{id}/cancel", web::post().to(invoices::cancel_invoice_handler))
    .route("/{id}/history", web::get().to(history::invoice_history_handler))
    .route(
      "/{id}/history/{version}",
      web::get().to(history::invoice_history_version_handler),
    )
    .route("/{id}/audit", web::get().to(history::invoice_audit_trail_handler));
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(format!("Invalid request body: {}", err)).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(format!("Invalid query string: {}", err)).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(format!("Invalid path parameter: {}", err)).into()
}
