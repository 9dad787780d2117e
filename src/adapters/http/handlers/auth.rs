use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserResponse, ValidateTokenQuery},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, RegisterUserCommand,
  RegisterUserUseCase, ValidateTokenUseCase,
};

/// Handler for user registration
///
/// POST /api/auth/register
/// Body: RegisterRequest (JSON)
/// Response: AuthResponse with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    username: request.username,
    email: request.email,
    full_name: request.full_name,
    password: request.password,
  };

  let response = use_case.execute(command).await?;
  tracing::info!(user_id = %response.user_id, "User registered");

  Ok(HttpResponse::Created().json(ApiResponse::success(
    "User registered successfully",
    AuthResponse::from(response),
  )))
}

/// Handler for user login
///
/// POST /api/auth/login
/// Body: LoginRequest (JSON)
/// Response: AuthResponse with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = LoginUserCommand {
    username_or_email: request.username_or_email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Login successful",
    AuthResponse::from(response),
  )))
}

/// Handler for the caller's own profile
///
/// GET /api/auth/profile
/// Headers: Authorization: Bearer <token>
pub async fn profile_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user()?;

  let profile = use_case.execute(&user.username).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "Profile retrieved successfully",
    UserResponse::from(profile),
  )))
}

/// Handler for token validation
///
/// POST /api/auth/validate?token=...
/// Always 200; `data` tells whether the token is usable
pub async fn validate_token_handler(
  query: web::Query<ValidateTokenQuery>,
  use_case: web::Data<Arc<ValidateTokenUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let valid = use_case.execute(&query.token).await;

  Ok(HttpResponse::Ok().json(ApiResponse::success("Token validation completed", valid)))
}
