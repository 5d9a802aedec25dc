use crate::domain_port::*;
use sqlx::MySqlPool;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn delete_by_username(&self, username: &str) -> Result<u64, UserRepoError> {
        let result = sqlx::query("DELETE FROM user WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| UserRepoError::Store(format!("delete user: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepoError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM user WHERE username = ?"#)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserRepoError::Store(e.to_string()))?;

        Ok(count > 0)
    }
}
