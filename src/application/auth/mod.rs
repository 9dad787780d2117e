//! Authentication use cases

mod get_current_user;
mod login_user;
mod register_user;
mod validate_token;

pub use get_current_user::{GetCurrentUserUseCase, UserProfileResponse};
pub use login_user::{LoginUserCommand, LoginUserUseCase};
pub use register_user::{AuthenticatedUserResponse, RegisterUserCommand, RegisterUserUseCase};
pub use validate_token::ValidateTokenUseCase;
