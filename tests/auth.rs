use actix_cors::Cors;
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use tasklane::auth::{AuthResponse, Tokens};
use tasklane::routes;
use tasklane::routes::health;
use tasklane::store::{TaskStore, UserStore};

const TEST_SECRET: &str = "auth-integration-secret";

macro_rules! test_app {
    ($dir:expr) => {{
        let url = format!("sqlite://{}", $dir.path().join("auth-int.db").display());
        let pool = tasklane::db::connect(&url)
            .await
            .expect("test DB should open");
        test::init_service(
            App::new()
                .app_data(web::Data::new(Tokens::new(TEST_SECRET)))
                .app_data(web::Data::new(UserStore::new(pool.clone())))
                .app_data(web::Data::new(TaskStore::new(pool)))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .service(health::health)
                .service(
                    web::scope("/api")
                        .wrap(tasklane::auth::AuthMiddleware)
                        .configure(routes::config),
                ),
        )
        .await
    }};
}

/// Posts `{email, password}` to a credential endpoint and hands back the
/// status plus the raw body, so callers can assert on either.
async fn post_credentials(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    uri: &str,
    email: &str,
    password: &str,
) -> (StatusCode, actix_web::web::Bytes) {
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, body)
}

#[actix_rt::test]
async fn test_register_duplicate_login_and_token_use() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(dir);

    // A fresh registration answers 201 with a usable token
    let (status, body) = post_credentials(
        &app,
        "/api/auth/register",
        "flow@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "register failed: {}",
        String::from_utf8_lossy(&body)
    );
    let issued: AuthResponse = serde_json::from_slice(&body).unwrap();
    assert!(!issued.token.is_empty(), "registration must auto-login");

    // Registering the same address again is refused...
    let (status, _) = post_credentials(
        &app,
        "/api/auth/register",
        "flow@example.com",
        "Different456!",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // ...and must not have altered the stored credentials
    let (status, body) = post_credentials(
        &app,
        "/api/auth/login",
        "flow@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(
        status,
        StatusCode::OK,
        "login failed: {}",
        String::from_utf8_lossy(&body)
    );
    let session: AuthResponse = serde_json::from_slice(&body).unwrap();

    // The login token opens the task routes
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", session.token)))
        .set_json(json!({ "title": "first task" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["title"], "first task");
    assert_eq!(
        created["order"], 0,
        "a fresh owner's first task takes slot 0"
    );
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(dir);

    let (status, _) = post_credentials(
        &app,
        "/api/auth/register",
        "real@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Wrong password against a real account
    let (wrong_status, wrong_body) = post_credentials(
        &app,
        "/api/auth/login",
        "real@example.com",
        "NotThePassword1",
    )
    .await;

    // Same attempt against an address that was never registered
    let (ghost_status, ghost_body) = post_credentials(
        &app,
        "/api/auth/login",
        "ghost@example.com",
        "NotThePassword1",
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(ghost_status, wrong_status);
    assert_eq!(
        wrong_body, ghost_body,
        "the two login failures must be byte-identical"
    );
}

#[actix_rt::test]
async fn test_email_identity_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app!(dir);

    let (status, _) = post_credentials(
        &app,
        "/api/auth/register",
        "Cased@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The lowercased spelling is a different identity in this design
    let (status, _) = post_credentials(
        &app,
        "/api/auth/login",
        "cased@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // ...and may be registered on its own
    let (status, _) = post_credentials(
        &app,
        "/api/auth/register",
        "cased@example.com",
        "Password123!",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
