mod common;

use common::*;
use serde_json::{Value, json};
use std::sync::Arc;
use userdel::domain_model::Privilege;
use userdel::domain_port::UserRepo;
use warp::http::StatusCode;

const PATH: &str = "/auth/delete/user";

fn body(res: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(res.body()).expect("response body is JSON")
}

async fn post<F>(app: &F, auth: Option<&str>, payload: &Value) -> warp::http::Response<warp::hyper::body::Bytes>
where
    F: warp::Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    let mut request = warp::test::request().method("POST").path(PATH).json(payload);
    if let Some(auth) = auth {
        request = request.header("authorization", auth);
    }
    request.reply(app).await
}

#[tokio::test]
async fn end_to_end_scenario() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice", "bob"]));
    let app = app(repo.clone(), Privilege::Any);
    let auth = bearer("bob", false);

    let res = post(&app, Some(auth.as_str()), &json!({ "username": "alice" })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res), json!({ "message": "User deleted successfully" }));
    assert!(!repo.username_exists("alice").await.unwrap());

    let res = post(&app, Some(auth.as_str()), &json!({ "username": "ghost" })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res), json!({ "message": "User not found" }));

    let res = post(&app, Some(auth.as_str()), &json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res), json!({ "message": "Username is required" }));
}

#[tokio::test]
async fn missing_or_empty_username_never_reaches_storage() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Any);
    let auth = bearer("alice", false);

    for payload in [json!({}), json!({ "username": "" }), json!({ "username": null })] {
        let res = post(&app, Some(auth.as_str()), &payload).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body(&res)["message"], "Username is required");
    }
    assert_eq!(repo.deletes(), 0);
}

#[tokio::test]
async fn repeated_delete_is_not_found() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Any);
    let auth = bearer("alice", false);
    let payload = json!({ "username": "alice" });

    assert_eq!(post(&app, Some(auth.as_str()), &payload).await.status(), StatusCode::OK);
    assert_eq!(
        post(&app, Some(auth.as_str()), &payload).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(repo.deletes(), 2);
}

#[tokio::test]
async fn unknown_username_leaves_storage_unchanged() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice", "bob"]));
    let app = app(repo.clone(), Privilege::Any);

    let res = post(&app, Some(bearer("alice", false).as_str()), &json!({ "username": "ALICE" })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(repo.inner.len(), 2);
}

#[tokio::test]
async fn storage_failure_hides_detail() {
    let app = app(Arc::new(FailingRepo), Privilege::Any);

    let res = post(&app, Some(bearer("alice", false).as_str()), &json!({ "username": "alice" })).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body(&res),
        json!({ "message": "An error occurred while deleting the user" })
    );
    let raw = String::from_utf8_lossy(res.body());
    assert!(!raw.contains("MySQL"));
    assert!(!raw.contains(DB_FAILURE_DETAIL));
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected_before_storage() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Any);
    let payload = json!({ "username": "alice" });

    let res = post(&app, None, &payload).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(&res)["message"], "Authentication required");

    let res = post(&app, Some("Bearer not-a-token"), &payload).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body(&res)["message"], "Invalid or expired token");

    assert_eq!(repo.deletes(), 0);
    assert!(repo.username_exists("alice").await.unwrap());
}

#[tokio::test]
async fn guards_run_before_body_validation() {
    let repo = Arc::new(CountingRepo::default());
    let app = app(repo, Privilege::Any);

    let res = post(&app, None, &json!({})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn any_privilege_lets_users_delete_other_accounts() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice", "bob"]));
    let app = app(repo.clone(), Privilege::Any);

    let res = post(&app, Some(bearer("bob", false).as_str()), &json!({ "username": "alice" })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!repo.username_exists("alice").await.unwrap());
}

#[tokio::test]
async fn admin_privilege_rejects_regular_users() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Admin);
    let payload = json!({ "username": "alice" });

    let res = post(&app, Some(bearer("alice", false).as_str()), &payload).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body(&res)["message"], "Forbidden");
    assert_eq!(repo.deletes(), 0);

    let res = post(&app, Some(bearer("root", true).as_str()), &payload).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Any);
    let auth = bearer("alice", false);

    let res = warp::test::request()
        .method("POST")
        .path(PATH)
        .header("authorization", &auth)
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["message"], "Invalid request body");

    let res = post(&app, Some(auth.as_str()), &json!({ "username": 42 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["message"], "Invalid request body");

    assert_eq!(repo.deletes(), 0);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let app = app(Arc::new(CountingRepo::default()), Privilege::Any);
    let huge = "a".repeat(userdel::api::v1::MAX_BODY_BYTES as usize + 1);

    let res = post(&app, Some(bearer("alice", false).as_str()), &json!({ "username": huge })).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body(&res)["message"], "Request body too large");
}

#[tokio::test]
async fn form_page_and_health_are_served() {
    let app = app(Arc::new(CountingRepo::default()), Privilege::Any);

    let res = warp::test::request().method("GET").path(PATH).reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = String::from_utf8_lossy(res.body());
    assert!(page.contains("mountDeleteUserForm"));
    assert!(page.contains(r#"id="other-username""#));

    let res = warp::test::request().method("GET").path("/health").reply(&app).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body(&res)["message"], "ok");
}

#[tokio::test]
async fn unknown_routes_and_methods() {
    let app = app(Arc::new(CountingRepo::default()), Privilege::Any);

    let res = warp::test::request().method("GET").path("/nope").reply(&app).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&res)["message"], "Not found");

    let res = warp::test::request().method("DELETE").path(PATH).reply(&app).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn served_form_posts_to_its_own_origin() {
    let repo = Arc::new(CountingRepo::with_usernames(&["alice"]));
    let app = app(repo.clone(), Privilege::Any);

    let res = warp::test::request()
        .method("GET")
        .path(PATH)
        .header("host", "127.0.0.1:4001")
        .reply(&app)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = String::from_utf8_lossy(res.body());
    assert!(page.contains(r#"baseUrl: "","#));
    assert!(!page.contains(r#"baseUrl: "http://localhost:4001""#));

    // The relative request the page issues lands on this route.
    let res = post(&app, Some(bearer("alice", false).as_str()), &json!({ "username": "alice" })).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!repo.username_exists("alice").await.unwrap());
}
