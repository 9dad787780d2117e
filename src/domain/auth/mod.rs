pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::User;
pub use errors::{AuthError, HashError, RepositoryError};
pub use services::AuthService;
pub use value_objects::{
  AccessToken, Email, FullName, Password, PasswordHash, TokenClaims, Username, ValueObjectError,
};
