use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ApiResponse, UpdateUserRequest, UserResponse},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::user::{
  DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserCommand, UpdateUserUseCase,
};

/// GET /api/users
pub async fn list_users_handler(
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let users: Vec<UserResponse> = use_case
    .execute()
    .await?
    .into_iter()
    .map(UserResponse::from)
    .collect();

  Ok(HttpResponse::Ok().json(ApiResponse::success("Users retrieved successfully", users)))
}

/// GET /api/users/{id}
pub async fn get_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let profile = use_case.execute(path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "User retrieved successfully",
    UserResponse::from(profile),
  )))
}

/// Handler for profile updates
///
/// PUT /api/users/{id}
/// Only the account owner may update it; anyone else gets 403.
pub async fn update_user_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let actor = http_req.authenticated_user()?;

  let request = request.into_inner();
  let command = UpdateUserCommand {
    actor_id: actor.id,
    user_id: path.into_inner(),
    full_name: request.full_name,
    email: request.email,
  };

  let profile = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::success(
    "User updated successfully",
    UserResponse::from(profile),
  )))
}

/// DELETE /api/users/{id}
pub async fn delete_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let actor = http_req.authenticated_user()?;
  let user_id = path.into_inner();

  use_case.execute(actor.id, user_id).await?;
  tracing::info!(%user_id, "User deleted");

  Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("User deleted successfully")))
}
