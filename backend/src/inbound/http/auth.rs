//! Registration, login, and logout endpoints.
//!
//! All three endpoints work on the cookie session: registering or logging in
//! stores the authenticated user's id in the session, logging out purges it.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{login_error, missing_field_error, registration_error};
use crate::domain::{ApiResult, LoginCredentials, Registration, User};

/// Body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired display name, 3 to 50 characters.
    #[schema(example = "new user")]
    username: Option<String>,
    /// Account email address.
    #[schema(example = "user@test.com")]
    email: Option<String>,
    /// Password, at least 6 characters.
    password: Option<String>,
    /// Must match `password` exactly.
    confirm_password: Option<String>,
}

/// Body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email address.
    #[schema(example = "user@test.com")]
    email: Option<String>,
    /// Account password.
    password: Option<String>,
}

/// The authenticated user, as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    id: String,
    /// Display name.
    #[schema(example = "new user")]
    username: String,
    /// Email address, normalised to lower case.
    #[schema(example = "user@test.com")]
    email: String,
    /// URL-safe slug derived from the username.
    #[schema(example = "new-user")]
    slug: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            slug: user.slug().to_owned(),
        }
    }
}

/// Register a new account and start a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and session started", body = UserResponse),
        (status = 400, description = "Validation failed", body = crate::domain::Error),
        (status = 409, description = "Email or username already registered", body = crate::domain::Error),
    )
)]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let username = body.username.ok_or_else(|| missing_field_error("username"))?;
    let email = body.email.ok_or_else(|| missing_field_error("email"))?;
    let password = body.password.ok_or_else(|| missing_field_error("password"))?;
    let confirmation = body
        .confirm_password
        .ok_or_else(|| missing_field_error("confirmPassword"))?;

    let registration = Registration::try_from_parts(&username, &email, &password, &confirmation)
        .map_err(registration_error)?;
    let user = state.accounts.register(registration).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate with email and password and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session started", body = UserResponse),
        (status = 400, description = "Validation failed", body = crate::domain::Error),
        (status = 401, description = "Unknown email or wrong password", body = crate::domain::Error),
    )
)]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let email = body.email.ok_or_else(|| missing_field_error("email"))?;
    let password = body.password.ok_or_else(|| missing_field_error("password"))?;

    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(login_error)?;
    let user = state.accounts.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// End the current session.
///
/// Logging out without a session is a success: the end state is the same.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses((status = 204, description = "Session ended"))
)]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
