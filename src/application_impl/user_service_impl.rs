use crate::application_port::{UserError, UserService};
use crate::domain_port::UserRepo;
use crate::logger::*;
use std::sync::Arc;

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> RealUserService {
        RealUserService { user_repo }
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn delete_user(&self, username: Option<&str>) -> Result<(), UserError> {
        let username = match username {
            Some(name) if !name.is_empty() => name,
            _ => return Err(UserError::Validation),
        };

        let deleted = self.user_repo.delete_by_username(username).await?;
        if deleted == 0 {
            debug!(username, "no user to delete");
            return Err(UserError::NotFound);
        }

        info!(username, deleted, "user deleted");
        Ok(())
    }
}
