#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use userdel::api;
use userdel::application_impl::{FakeAuthService, GuardChain, RealUserService};
use userdel::domain_model::{Caller, Privilege};
use userdel::domain_port::{UserRepo, UserRepoError};
use userdel::infra_memory::MemoryUserRepo;
use userdel::server::Server;
use warp::Filter;

pub const DB_FAILURE_DETAIL: &str = "Lost connection to MySQL server at 'reading initial packet'";

/// Full filter stack as served by the binary, with fake backends.
pub fn app(
    repo: Arc<dyn UserRepo>,
    required: Privilege,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Infallible> + Clone + 'static {
    let server = Arc::new(Server::from_parts(
        Arc::new(RealUserService::new(repo)),
        GuardChain::authenticated(Arc::new(FakeAuthService::new()), required),
    ));
    api::v1::routes(server)
        .recover(api::v1::recover_error)
        .map(warp::Reply::into_response)
}

pub fn bearer(username: &str, is_admin: bool) -> String {
    let caller = Caller {
        username: username.to_string(),
        is_admin,
    };
    format!("Bearer {}", FakeAuthService::token_for(&caller))
}

/// Memory repo that counts delete calls.
#[derive(Default)]
pub struct CountingRepo {
    pub inner: MemoryUserRepo,
    deletes: AtomicUsize,
}

impl CountingRepo {
    pub fn with_usernames(usernames: &[&str]) -> Self {
        CountingRepo {
            inner: MemoryUserRepo::with_usernames(usernames.iter().copied()),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserRepo for CountingRepo {
    async fn delete_by_username(&self, username: &str) -> Result<u64, UserRepoError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_username(username).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepoError> {
        self.inner.username_exists(username).await
    }
}

/// Repo whose every call fails the way a dropped connection would.
pub struct FailingRepo;

#[async_trait::async_trait]
impl UserRepo for FailingRepo {
    async fn delete_by_username(&self, _: &str) -> Result<u64, UserRepoError> {
        Err(UserRepoError::Store(DB_FAILURE_DETAIL.to_string()))
    }

    async fn username_exists(&self, _: &str) -> Result<bool, UserRepoError> {
        Err(UserRepoError::Store(DB_FAILURE_DETAIL.to_string()))
    }
}
