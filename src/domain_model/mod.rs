mod caller;
mod user;

pub use caller::*;
pub use user::*;
