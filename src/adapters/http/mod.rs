pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::ApiResponse;
pub use errors::ApiError;
pub use middleware::{AuthMiddleware, AuthUser, RequestId, RequestIdMiddleware};
pub use routes::{
  ApiDependencies, configure_api_routes, configure_auth_routes, configure_invoice_routes,
  configure_user_routes,
};
