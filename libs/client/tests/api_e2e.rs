//! End-to-end tests against a running API instance
//!
//! These exercise the full stack (router, middleware, repositories,
//! database), so they need the server up and seeded:
//!
//! ```sh
//! cargo run --bin seed && cargo run --bin api
//! cargo test -p client -- --ignored
//! ```
//!
//! Configuration: `PORTFOLIO_API_URL` (default `http://localhost:5000`),
//! `OWNER_EMAIL`/`OWNER_PASSWORD` (defaults match the seed binary).

use client::{ApiClient, ApiClientError, MemoryTokenStore, TokenStore};
use serde_json::{Value, json};
use std::sync::Arc;

fn api_url() -> String {
    std::env::var("PORTFOLIO_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

fn owner_credentials() -> (String, String) {
    let email = std::env::var("OWNER_EMAIL")
        .unwrap_or_else(|_| "nifazurrahman2872@gmail.com".to_string());
    let password = std::env::var("OWNER_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());
    (email, password)
}

fn new_client() -> ApiClient {
    ApiClient::new(api_url(), Arc::new(MemoryTokenStore::new())).expect("client construction")
}

async fn login(client: &ApiClient) -> Value {
    let (email, password) = owner_credentials();
    let data: Value = client
        .post(
            "/api/v1/auth/login",
            &json!({"email": email, "password": password}),
        )
        .await
        .expect("login should succeed against a seeded server");

    client.set_token(
        data["accessToken"]
            .as_str()
            .expect("accessToken present")
            .to_string(),
    );

    data
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn login_returns_token_pair_and_user() {
    let client = new_client();
    let (email, _) = owner_credentials();

    let data = login(&client).await;

    assert!(data["accessToken"].is_string());
    assert!(data["refreshToken"].is_string());
    assert_eq!(data["user"]["email"], email);
    assert!(data["user"]["password"].is_null());
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn login_with_wrong_password_matches_unknown_email_message() {
    let client = new_client();
    let (email, _) = owner_credentials();

    let wrong_password = client
        .post::<Value, _>(
            "/api/v1/auth/login",
            &json!({"email": email, "password": "Wrong1!pass"}),
        )
        .await
        .unwrap_err();
    let unknown_email = client
        .post::<Value, _>(
            "/api/v1/auth/login",
            &json!({"email": "nobody@example.com", "password": "Wrong1!pass"}),
        )
        .await
        .unwrap_err();

    match (wrong_password, unknown_email) {
        (
            ApiClientError::Api {
                status_code: a,
                message: msg_a,
                ..
            },
            ApiClientError::Api {
                status_code: b,
                message: msg_b,
                ..
            },
        ) => {
            assert_eq!(a, 401);
            assert_eq!(b, 401);
            assert_eq!(msg_a, msg_b, "account enumeration resistance");
            assert_eq!(msg_a, "Invalid credentials");
        }
        other => panic!("expected API errors, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn filtered_blog_list_honors_filters_and_limit() {
    let client = new_client();

    let data: Value = client
        .get("/api/v1/blogs?category=Tutorial&isPublished=true&page=1&limit=5")
        .await
        .expect("public list endpoint");

    let items = data["data"].as_array().expect("data array");
    assert!(items.len() <= 5);
    for item in items {
        assert_eq!(item["isPublished"], true);
        assert_eq!(
            item["category"].as_str().map(str::to_lowercase),
            Some("tutorial".to_string())
        );
    }

    let pagination = &data["pagination"];
    let total = pagination["total"].as_i64().unwrap();
    let limit = pagination["limit"].as_i64().unwrap();
    assert_eq!(
        pagination["totalPages"].as_i64().unwrap(),
        (total + limit - 1) / limit.max(1)
    );
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn project_without_technologies_is_rejected() {
    let client = new_client();
    login(&client).await;

    let err = client
        .post::<Value, _>(
            "/api/v1/projects",
            &json!({
                "title": "Missing tech stack",
                "description": "A project payload with no technologies",
                "thumbnail": "https://example.com/shot.png",
                "category": "Web Apps",
                "technologies": [],
            }),
        )
        .await
        .unwrap_err();

    match err {
        ApiClientError::Api {
            status_code,
            message,
            ..
        } => {
            assert_eq!(status_code, 400);
            assert_eq!(message, "At least one technology is required");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn protected_route_without_token_is_unauthorized() {
    let client = new_client();

    let err = client
        .get::<Value>("/api/v1/contact/stats")
        .await
        .unwrap_err();

    match err {
        ApiClientError::Api {
            status_code,
            message,
            ..
        } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Authentication required");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn stale_token_is_cleared_after_401() {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(api_url(), store.clone()).expect("client construction");

    client.set_token("not.a.valid.token".to_string());
    let err = client
        .get::<Value>("/api/v1/contact/stats")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert_eq!(store.get(), None, "401 clears the held token");
}

#[tokio::test]
#[ignore = "requires a running, seeded API server"]
async fn identical_titles_get_distinct_slugs() {
    let client = new_client();
    login(&client).await;

    let payload = json!({
        "title": "Duplicate Title Check",
        "description": "Created twice to confirm slug disambiguation",
        "thumbnail": "https://example.com/shot.png",
        "category": "Web Apps",
        "technologies": ["Rust"],
    });

    let first: Value = client.post("/api/v1/projects", &payload).await.unwrap();
    let second: Value = client.post("/api/v1/projects", &payload).await.unwrap();

    let first_slug = first["slug"].as_str().unwrap();
    let second_slug = second["slug"].as_str().unwrap();
    assert_ne!(first_slug, second_slug);
    assert!(second_slug.starts_with(first_slug));

    // Clean up both rows.
    for created in [&first, &second] {
        let id = created["id"].as_i64().unwrap();
        let _: Value = client
            .delete(&format!("/api/v1/projects/{id}"))
            .await
            .unwrap();
    }
}
