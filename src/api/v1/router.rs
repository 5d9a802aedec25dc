use super::error::*;
use super::handler;
use crate::application_impl::GuardChain;
use crate::application_port::GuardContext;
use crate::domain_model::Caller;
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let delete_user = warp::path!("auth" / "delete" / "user")
        .and(warp::post())
        .and(with_guards(server.delete_user_guards.clone()))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(server.user_service.clone()))
        .and_then(handler::delete_user);

    let delete_user_page = warp::path!("auth" / "delete" / "user")
        .and(warp::get())
        .and(with(server.page_base_url.clone()))
        .and_then(handler::delete_user_page);

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handler::health);

    delete_user.or(delete_user_page).or(health)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Runs `guards` against the request headers and extracts the caller.
fn with_guards(
    guards: GuardChain,
) -> impl Filter<Extract = (Caller,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(http::header::AUTHORIZATION.as_str()).and_then(
        move |authorization: Option<String>| {
            let guards = guards.clone();
            async move {
                guards
                    .run(GuardContext::new(authorization))
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)
            }
        },
    )
}
