use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::ApiError,
  domain::auth::{AuthService, User},
};

/// Bearer token authentication
///
/// Resolves the `Authorization: Bearer <jwt>` header to an active user via
/// `AuthService::authenticate` and stores the `User` in request extensions.
/// Requests without a usable token are answered with 401 before reaching
/// the handler.
pub struct AuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl AuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let authenticated = match extract_bearer_token(&req) {
        Ok(token) => auth_service.authenticate(&token).await.map_err(ApiError::from),
        Err(e) => Err(e),
      };

      let user = match authenticated {
        Ok(user) => user,
        Err(e) => {
          tracing::debug!(path = %req.path(), "Rejected unauthenticated request: {}", e);
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".to_string()))
}

/// Extension trait to extract the authenticated user from a request
pub trait AuthUser {
  /// Fails when the route is not wrapped by `AuthMiddleware`
  fn authenticated_user(&self) -> Result<User, ApiError>;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> Result<User, ApiError> {
    self.extensions().get::<User>().cloned().ok_or_else(|| {
      tracing::warn!(path = %self.path(), "No authenticated user in request extensions");
      ApiError::Unauthorized("User not authenticated".to_string())
    })
  }
}
