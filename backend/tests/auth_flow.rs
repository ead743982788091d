//! Integration tests for registration, login, logout, and session gating.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{get, post_json, register_user, session_cookie, test_app};

#[actix_web::test]
async fn registration_returns_the_user_and_a_session() {
    let app = test_app().await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        &json!({
            "username": "new user",
            "email": "user@test.com",
            "password": "test1234",
            "confirmPassword": "test1234",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["username"], "new user");
    assert_eq!(body["email"], "user@test.com");
    assert_eq!(body["slug"], "new-user");

    // The session from registration is immediately usable.
    let response = get(&app, "/api/v1/bucket-lists", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn email_is_normalised_before_uniqueness() {
    let app = test_app().await;
    register_user(&app, "user@test.com", "first user").await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        &json!({
            "username": "second user",
            "email": "  USER@TEST.COM  ",
            "password": "test1234",
            "confirmPassword": "test1234",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "User already exists. Please login.");
}

#[actix_web::test]
async fn validation_failures_name_the_field() {
    let app = test_app().await;

    for (payload, field) in [
        (
            json!({
                "username": "new user",
                "email": "not-an-email",
                "password": "test1234",
                "confirmPassword": "test1234",
            }),
            "email",
        ),
        (
            json!({
                "username": "bad!name",
                "email": "user@test.com",
                "password": "test1234",
                "confirmPassword": "test1234",
            }),
            "username",
        ),
        (
            json!({
                "username": "new user",
                "email": "user@test.com",
                "password": "short",
                "confirmPassword": "short",
            }),
            "password",
        ),
        (
            json!({
                "username": "new user",
                "email": "user@test.com",
                "password": "test1234",
                "confirmPassword": "test12345",
            }),
            "confirmPassword",
        ),
    ] {
        let response = post_json(&app, "/api/v1/auth/register", &payload, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
    }
}

#[actix_web::test]
async fn invalid_email_wins_over_a_bad_username() {
    let app = test_app().await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        &json!({
            "username": "bad!name",
            "email": "not-an-email",
            "password": "short",
            "confirmPassword": "other",
        }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn login_works_with_the_registered_password() {
    let app = test_app().await;
    register_user(&app, "user@test.com", "new user").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        &json!({ "email": "user@test.com", "password": "test1234" }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["username"], "new user");

    let response = get(&app, "/api/v1/bucket-lists", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = test_app().await;
    register_user(&app, "user@test.com", "new user").await;

    let wrong_password = post_json(
        &app,
        "/api/v1/auth/login",
        &json!({ "email": "user@test.com", "password": "wrong-password" }),
        None,
    )
    .await;
    let unknown_email = post_json(
        &app,
        "/api/v1/auth/login",
        &json!({ "email": "nobody@test.com", "password": "test1234" }),
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let first: Value = test::read_body_json(wrong_password).await;
    let second: Value = test::read_body_json(unknown_email).await;
    assert_eq!(first["message"], second["message"]);
}

#[actix_web::test]
async fn logout_invalidates_the_session() {
    let app = test_app().await;
    let cookie = register_user(&app, "user@test.com", "new user").await;

    let response = post_json(&app, "/api/v1/auth/logout", &json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&response);

    let response = get(&app, "/api/v1/bucket-lists", Some(&cleared)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn protected_routes_reject_anonymous_callers() {
    let app = test_app().await;

    for path in [
        "/api/v1/bucket-lists",
        "/api/v1/bucket-lists/recent",
        "/api/v1/bucket-lists/some-slug",
    ] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {path}");
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "You need to be logged in to do that");
    }
}
