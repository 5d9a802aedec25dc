use crate::domain_port::UserRepoError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("username is required")]
    Validation,
    #[error("user not found")]
    NotFound,
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<UserRepoError> for UserError {
    fn from(err: UserRepoError) -> Self {
        UserError::Persistence(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Permanently delete the user named `username`.
    ///
    /// A missing or empty username fails with [`UserError::Validation`] before
    /// storage is touched; a username with no matching row fails with
    /// [`UserError::NotFound`].
    async fn delete_user(&self, username: Option<&str>) -> Result<(), UserError>;
}
