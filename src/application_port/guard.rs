use crate::application_port::AuthError;
use crate::domain_model::Caller;

/// State threaded through a guard chain for a single request.
#[derive(Debug, Clone, Default)]
pub struct GuardContext {
    pub authorization: Option<String>,
    pub caller: Option<Caller>,
}

impl GuardContext {
    pub fn new(authorization: Option<String>) -> Self {
        GuardContext {
            authorization,
            caller: None,
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for GuardError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken => GuardError::Unauthenticated,
            AuthError::TokenInvalid | AuthError::TokenExpired => GuardError::InvalidToken,
            AuthError::InternalError(e) => GuardError::Internal(e),
        }
    }
}

/// A capability check run before a route handler.
///
/// Guards run in the order they were registered. A guard either passes,
/// possibly enriching the context, or halts the chain with an error.
#[async_trait::async_trait]
pub trait RequestGuard: Send + Sync {
    async fn check(&self, ctx: &mut GuardContext) -> Result<(), GuardError>;
}
