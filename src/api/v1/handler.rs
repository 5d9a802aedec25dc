use super::error::*;
use crate::application_port::UserService;
use crate::domain_model::Caller;
use crate::logger::*;
use crate::ui;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

/// Body shape shared by every response on this API.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

pub async fn delete_user(
    caller: Caller,
    body: DeleteUserRequest,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let username = body.username.as_deref();

    // Any authenticated caller may delete any account unless the route is
    // configured with the admin privilege.
    if let Some(target) = username.filter(|name| !name.is_empty()) {
        if !caller.is_admin && !caller.is_self(target) {
            warn!(
                caller = %caller.username,
                target_user = target,
                "non-admin caller is deleting another user's account"
            );
        }
    }

    user_service
        .delete_user(username)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let json = warp::reply::json(&MessageResponse::new("User deleted successfully"));
    Ok(warp::reply::with_status(json, StatusCode::OK))
}

pub async fn delete_user_page(base_url: Arc<str>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::html(ui::delete_user_page(&base_url)))
}

pub async fn health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&MessageResponse::new("ok")))
}
