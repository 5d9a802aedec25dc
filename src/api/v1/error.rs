use crate::api::v1::handler::MessageResponse;
use crate::application_port::*;
use crate::logger::*;
use std::convert::Infallible;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if let Some(code) = err.find::<ApiErrorCode>() {
        (code.status(), code.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, ApiErrorCode::InvalidBody.to_string())
    } else if err.find::<reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::PayloadTooLarge.to_string(),
        )
    } else if err.find::<reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Length required".to_string())
    } else if err.find::<reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type".to_string(),
        )
    } else if err.find::<reject::InvalidHeader>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid header".to_string())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::InternalError.to_string(),
        )
    };

    let json = warp::reply::json(&MessageResponse::new(message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("Username is required")]
    UsernameRequired,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Forbidden")]
    Forbidden,
    #[error("An error occurred while deleting the user")]
    DeleteFailed,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        error!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::UsernameRequired | ApiErrorCode::InvalidBody => StatusCode::BAD_REQUEST,
            ApiErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::Unauthenticated | ApiErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ApiErrorCode::DeleteFailed | ApiErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<UserError> for ApiErrorCode {
    fn from(error: UserError) -> Self {
        match error {
            UserError::Validation => ApiErrorCode::UsernameRequired,
            UserError::NotFound => ApiErrorCode::UserNotFound,
            UserError::Persistence(e) => {
                error!("Error deleting user: {}", e);
                ApiErrorCode::DeleteFailed
            }
        }
    }
}

impl From<GuardError> for ApiErrorCode {
    fn from(error: GuardError) -> Self {
        match error {
            GuardError::Unauthenticated => ApiErrorCode::Unauthenticated,
            GuardError::InvalidToken => ApiErrorCode::InvalidToken,
            GuardError::Forbidden => ApiErrorCode::Forbidden,
            GuardError::Internal(e) => ApiErrorCode::internal(e),
        }
    }
}
