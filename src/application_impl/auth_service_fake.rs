use crate::application_port::*;
use crate::domain_model::Caller;

const USER_TOKEN_PREFIX: &str = "fake-access-token:";
const ADMIN_TOKEN_PREFIX: &str = "fake-admin-token:";

#[derive(Debug, Default)]
pub struct FakeAuthService;

impl FakeAuthService {
    pub fn new() -> Self {
        Self
    }

    pub fn token_for(caller: &Caller) -> String {
        let prefix = if caller.is_admin {
            ADMIN_TOKEN_PREFIX
        } else {
            USER_TOKEN_PREFIX
        };
        format!("{}{}", prefix, caller.username)
    }
}

// Accepts `fake-access-token:<username>` and `fake-admin-token:<username>`.
#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn verify_token(&self, token: &str) -> Result<Caller, AuthError> {
        let (username, is_admin) = if let Some(username) = token.strip_prefix(USER_TOKEN_PREFIX) {
            (username, false)
        } else if let Some(username) = token.strip_prefix(ADMIN_TOKEN_PREFIX) {
            (username, true)
        } else {
            return Err(AuthError::TokenInvalid);
        };

        if username.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        Ok(Caller {
            username: username.to_string(),
            is_admin,
        })
    }
}
