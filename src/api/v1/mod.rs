mod error;
mod handler;
mod router;

pub use error::{ApiErrorCode, recover_error};
pub use handler::{DeleteUserRequest, MessageResponse};
pub use router::{MAX_BODY_BYTES, routes};
