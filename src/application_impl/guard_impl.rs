use crate::application_port::*;
use crate::domain_model::{Caller, Privilege};
use crate::logger::*;
use std::sync::Arc;

/// Establishes caller identity from the `Authorization: Bearer` header.
pub struct AuthenticationGuard {
    auth_service: Arc<dyn AuthService>,
}

impl AuthenticationGuard {
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        AuthenticationGuard { auth_service }
    }
}

#[async_trait::async_trait]
impl RequestGuard for AuthenticationGuard {
    async fn check(&self, ctx: &mut GuardContext) -> Result<(), GuardError> {
        let token = ctx.bearer_token().ok_or(GuardError::Unauthenticated)?;
        let caller = self.auth_service.verify_token(token).await.map_err(|e| {
            debug!("token rejected: {}", e);
            GuardError::from(e)
        })?;
        ctx.caller = Some(caller);
        Ok(())
    }
}

/// Requires an authenticated caller holding `required`.
pub struct AuthorizationGuard {
    required: Privilege,
}

impl AuthorizationGuard {
    pub fn new(required: Privilege) -> Self {
        AuthorizationGuard { required }
    }
}

#[async_trait::async_trait]
impl RequestGuard for AuthorizationGuard {
    async fn check(&self, ctx: &mut GuardContext) -> Result<(), GuardError> {
        let caller = ctx.caller.as_ref().ok_or(GuardError::Unauthenticated)?;
        if !self.required.permits(caller) {
            warn!(caller = %caller.username, required = ?self.required, "privilege check failed");
            return Err(GuardError::Forbidden);
        }
        Ok(())
    }
}

/// Ordered list of guards composed in front of a handler.
#[derive(Clone, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn RequestGuard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, guard: Arc<dyn RequestGuard>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Authentication followed by an authorization check for `required`.
    pub fn authenticated(auth_service: Arc<dyn AuthService>, required: Privilege) -> Self {
        Self::new()
            .with(Arc::new(AuthenticationGuard::new(auth_service)))
            .with(Arc::new(AuthorizationGuard::new(required)))
    }

    /// Runs every guard in order, stopping at the first failure, and returns
    /// the caller the chain established.
    pub async fn run(&self, mut ctx: GuardContext) -> Result<Caller, GuardError> {
        for guard in &self.guards {
            guard.check(&mut ctx).await?;
        }
        ctx.caller.ok_or(GuardError::Unauthenticated)
    }
}
