//! Sign-in, sign-up, and logout against the stub backend.

#![allow(clippy::unwrap_used)]

use freshly_integration_tests::{Backend, TAKEN_EMAIL, TestContext, VALID_PASSWORD};
use reqwest::StatusCode;

fn signup_form(email: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("first_name", "Amaya"),
        ("last_name", "Fernando"),
        ("shop_name", "Fresh Mart"),
        ("address", "12 Market Street, Kandy"),
        ("telephone", "0771234567"),
        ("email", email),
        ("password", "hunter22"),
    ]
}

#[tokio::test]
async fn test_sign_in_lands_on_dashboard() {
    let ctx = TestContext::start(Backend::default()).await;

    let response = ctx.sign_in().await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/dashboard");

    let html = ctx.loaded_dashboard().await;
    assert!(html.contains("Amaya Fernando"));
}

#[tokio::test]
async fn test_sign_in_shows_backend_message() {
    let ctx = TestContext::start(Backend::default()).await;

    let response = ctx
        .post_form(
            "/signin",
            &[("email", "owner@freshly.example"), ("password", "wrong")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.text().await.unwrap().contains("Invalid email or password"));

    // No session was created.
    let response = ctx.get("/dashboard").await;
    assert_eq!(response.url().path(), "/signin");
}

#[tokio::test]
async fn test_sign_in_missing_field() {
    let ctx = TestContext::start(Backend::default()).await;

    let response = ctx
        .post_form("/signin", &[("email", ""), ("password", VALID_PASSWORD)])
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("Please fill in all fields"));
    assert_eq!(ctx.resource_calls(), 0);
}

#[tokio::test]
async fn test_sign_up_success_panel() {
    let ctx = TestContext::start(Backend::default()).await;

    let response = ctx
        .post_form("/signup", &signup_form("new@freshly.example"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Account Created Successfully!"));
    assert!(html.contains(r#"href="/signin""#));
}

#[tokio::test]
async fn test_sign_up_accepts_non_json_success_body() {
    let ctx = TestContext::start(Backend {
        plain_text_signup: true,
        ..Backend::default()
    })
    .await;

    let response = ctx
        .post_form("/signup", &signup_form("new@freshly.example"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("Account Created Successfully!"));
    assert!(!html.contains("Signup failed. Try again."));
}

#[tokio::test]
async fn test_sign_up_rejected_keeps_form() {
    let ctx = TestContext::start(Backend::default()).await;

    let response = ctx.post_form("/signup", &signup_form(TAKEN_EMAIL)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = response.text().await.unwrap();
    assert!(html.contains("Email already registered"));
    assert!(html.contains("12 Market Street, Kandy"));
    assert!(!html.contains("hunter22"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::start(Backend::default()).await;
    ctx.sign_in().await;

    let response = ctx.post_form("/logout", &[]).await;
    assert_eq!(response.url().path(), "/signin");

    let response = ctx.get("/dashboard").await;
    assert_eq!(response.url().path(), "/signin");
}

#[tokio::test]
async fn test_signed_in_user_skips_signin_form() {
    let ctx = TestContext::start(Backend::default()).await;
    ctx.sign_in().await;

    let response = ctx.get("/").await;
    assert_eq!(response.url().path(), "/dashboard");
}
