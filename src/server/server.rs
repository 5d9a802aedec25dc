use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::{self, Settings};
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

const DEV_SIGNING_KEY: &str = "my-dev-secret-key";

/// Builds the HS256 codec described by `auth`.
///
/// Without a configured signing key this fails unless `allow_dev_key` is set,
/// in which case the well-known development key is used.
pub fn jwt_codec(auth: &settings::Auth, allow_dev_key: bool) -> anyhow::Result<JwtHs256Codec> {
    let signing_key = match auth.signing_key.as_deref() {
        Some(key) if !key.is_empty() => key.as_bytes().to_vec(),
        _ if allow_dev_key => {
            warn!("auth.signing_key not set, using the development key");
            DEV_SIGNING_KEY.as_bytes().to_vec()
        }
        _ => return Err(anyhow::anyhow!("auth.signing_key is required")),
    };

    Ok(JwtHs256Codec::new(JwtConfig {
        issuer: auth.issuer.clone(),
        audience: auth.audience.clone(),
        access_ttl: Duration::from_secs(auth.access_ttl_secs),
        signing_key,
    }))
}

pub struct Server {
    pub user_service: Arc<dyn UserService>,
    pub delete_user_guards: GuardChain,
    /// Origin the served page posts to. Empty means the page's own origin.
    pub page_base_url: Arc<str>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let mut pool = None;

        let user_repo: Arc<dyn UserRepo> = match settings.user.backend.as_str() {
            "fake" => Arc::new(MemoryUserRepo::with_usernames(settings.user.seed.iter().cloned())),
            "mysql" => {
                let dsn = settings
                    .mysql
                    .as_ref()
                    .map(|m| m.dsn.as_str())
                    .ok_or_else(|| anyhow::anyhow!("user backend \"mysql\" needs a [mysql] section"))?;
                let mysql = Pool::<MySql>::connect(dsn).await?;
                pool = Some(mysql.clone());
                Arc::new(MySqlUserRepo::new(mysql))
            }
            other => return Err(anyhow::anyhow!("Unknown user backend: {}", other)),
        };

        let auth_service: Arc<dyn AuthService> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAuthService::new()),
            "real" => {
                let token_codec: Arc<dyn TokenCodec> =
                    Arc::new(jwt_codec(&settings.auth, cfg!(debug_assertions))?);
                Arc::new(RealAuthService::new(token_codec))
            }
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(user_repo));
        let delete_user_guards =
            GuardChain::authenticated(auth_service, settings.guard.delete_user);

        info!(
            user_backend = %settings.user.backend,
            auth_backend = %settings.auth.backend,
            "backends ready"
        );

        Ok(Self {
            user_service,
            delete_user_guards,
            page_base_url: Arc::from(settings.http.public_base_url.as_deref().unwrap_or("")),
            pool,
        })
    }

    /// Assembles a server from pre-built parts. Used by tests and embedders.
    pub fn from_parts(user_service: Arc<dyn UserService>, delete_user_guards: GuardChain) -> Self {
        Self {
            user_service,
            delete_user_guards,
            page_base_url: Arc::from(""),
            pool: None,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("mysql pool closed");
        }
    }
}
