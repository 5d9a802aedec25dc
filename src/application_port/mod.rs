mod auth_service;
mod guard;
mod user_service;

pub use auth_service::*;
pub use guard::*;
pub use user_service::*;
