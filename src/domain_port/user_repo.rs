use crate::domain_model::*;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum UserRepoError {
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Delete every row whose username equals `username`.
    /// Returns the number of rows removed.
    async fn delete_by_username(&self, username: &str) -> Result<u64, UserRepoError>;

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepoError>;
}
