use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use dashmap::DashMap;

/// In-process user table keyed by username. Backs the `fake` user backend.
#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    users: DashMap<String, UserRecord>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usernames<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = Self::new();
        for username in usernames {
            let username = username.into();
            repo.users.insert(
                username.clone(),
                UserRecord {
                    user_id: UserId::new_v4(),
                    username,
                    is_active: true,
                    created_at: Utc::now(),
                },
            );
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn delete_by_username(&self, username: &str) -> Result<u64, UserRepoError> {
        Ok(self.users.remove(username).map_or(0, |_| 1))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepoError> {
        Ok(self.users.contains_key(username))
    }
}
