//! User management use cases

mod delete_user;
mod get_user;
mod list_users;
mod update_user;

pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::ListUsersUseCase;
pub use update_user::{UpdateUserCommand, UpdateUserUseCase};
