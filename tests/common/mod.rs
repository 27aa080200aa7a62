// Shared setup for the integration tests: a throwaway SQLite file, the real
// router, and small helpers to drive it with JSON requests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use mind_assessment::{
    config::Config,
    create_router, db,
    models::user::Role,
    services::user_service,
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    // Keeps the database file alive for the duration of the test.
    pub _dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

pub async fn spawn_app() -> TestApp {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let config = Config {
        database_url: format!("sqlite://{}", db_path.display()),
        static_dir: dir.path().join("no-frontend"),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..Config::default()
    };

    let pool = db::create_db_pool(&config.database_url)
        .await
        .expect("create pool and migrate");
    let state = AppState::new(pool, config);
    let router = create_router(state.clone());
    TestApp {
        _dir: dir,
        state,
        router,
    }
}

impl TestApp {
    pub async fn add_user(&self, username: &str, password: &str, role: Role) -> String {
        user_service::create_user(
            &self.state.db_pool,
            None,
            username,
            &username.to_uppercase(),
            password,
            role,
            TEST_BCRYPT_COST,
        )
        .await
        .expect("create user")
        .id
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, headers, bytes.to_vec())
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(json_request("POST", "/api/login", None, &serde_json::json!({
                "username": username,
                "password": password,
            })))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token in login response").to_string()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    builder.body(Body::from(body.to_string())).expect("build request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    builder.body(Body::empty()).expect("build request")
}
