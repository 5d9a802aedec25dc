//! Command-line counterpart of the browser form: one request, one alert.

use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACKNOWLEDGED_MESSAGE: &str = "User deleted successfully!";
pub const FALLBACK_FAILURE_MESSAGE: &str = "An error occurred.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Error deleting user";

/// What the user is shown once the exchange finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Acknowledged,
    Failed(String),
}

impl Alert {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, Alert::Acknowledged)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Acknowledged => f.write_str(ACKNOWLEDGED_MESSAGE),
            Alert::Failed(message) => f.write_str(message),
        }
    }
}

#[derive(Serialize)]
struct DeleteUserBody<'a> {
    username: &'a str,
}

#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

pub struct DeleteUserClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DeleteUserClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        DeleteUserClient {
            http,
            base_url,
            token,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/auth/delete/user", self.base_url)
    }

    /// Issues the delete request and folds every outcome into an [`Alert`].
    /// Never retries.
    pub async fn submit(&self, username: &str) -> Alert {
        let mut request = self
            .http
            .post(self.endpoint())
            .json(&DeleteUserBody { username });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error deleting user: {}", e);
                return Alert::Failed(TRANSPORT_FAILURE_MESSAGE.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            return Alert::Acknowledged;
        }

        let message = response
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty());
        debug!(%status, ?message, "delete request failed");

        Alert::Failed(message.unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()))
    }
}
