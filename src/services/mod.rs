//! Business logic services layer

pub mod auth_service;
pub mod password_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use password_service::PasswordService;
pub use user_service::UserService;
