//! Shared harness for the HTTP integration tests.
//!
//! Builds the full `/api/v1` service against the in-memory store, with the
//! same session middleware and routes as the real server.

// Each integration test binary uses its own subset of these helpers.
#![allow(dead_code, reason = "shared helpers across test binaries")]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use serde_json::{Value, json};

use backend::inbound::http::routes;
use backend::test_support;

/// Initialise the API service on a fresh in-memory store.
pub async fn test_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(test_support::memory_state()))
            .service(
                web::scope("/api/v1")
                    .wrap(test_support::test_session_middleware())
                    .configure(routes::configure),
            ),
    )
    .await
}

/// POST `body` as JSON, attaching `cookie` when present.
pub async fn post_json<S>(
    app: &S,
    path: &str,
    body: &Value,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut request = test::TestRequest::post().uri(path).set_json(body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}

/// PUT `body` as JSON with the session `cookie`.
pub async fn put_json<S>(
    app: &S,
    path: &str,
    body: &Value,
    cookie: &Cookie<'static>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let request = test::TestRequest::put()
        .uri(path)
        .set_json(body)
        .cookie(cookie.clone());
    test::call_service(app, request.to_request()).await
}

/// GET `path`, attaching `cookie` when present.
pub async fn get<S>(
    app: &S,
    path: &str,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut request = test::TestRequest::get().uri(path);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}

/// DELETE `path` with the session `cookie`.
pub async fn delete<S>(
    app: &S,
    path: &str,
    cookie: &Cookie<'static>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let request = test::TestRequest::delete()
        .uri(path)
        .cookie(cookie.clone());
    test::call_service(app, request.to_request()).await
}

/// Extract the session cookie from a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Register `email` and return the session cookie for the new account.
pub async fn register_user<S>(app: &S, email: &str, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let response = post_json(
        app,
        "/api/v1/auth/register",
        &json!({
            "username": username,
            "email": email,
            "password": "test1234",
            "confirmPassword": "test1234",
        }),
        None,
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::CREATED,
        "registration should succeed"
    );
    session_cookie(&response)
}

/// Create a bucket list and return its response body.
pub async fn create_list<S>(
    app: &S,
    cookie: &Cookie<'static>,
    name: &str,
    description: &str,
) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let response = post_json(
        app,
        "/api/v1/bucket-lists",
        &json!({ "name": name, "description": description }),
        Some(cookie),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::CREATED,
        "list creation should succeed"
    );
    test::read_body_json(response).await
}
