//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every handler path, the request/response schemas, and the
//! session cookie security scheme. Swagger UI serves the document in debug
//! builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::inbound::http::lists::{
    CreateListRequest, ListPageResponse, ListResponse, RecentListResponse, UpdateListRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bucket-list API",
        description = "Session-authenticated CRUD over per-user bucket lists."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::lists::browse,
        crate::inbound::http::lists::recent,
        crate::inbound::http::lists::create,
        crate::inbound::http::lists::fetch,
        crate::inbound::http::lists::update,
        crate::inbound::http::lists::delete,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        CreateListRequest,
        UpdateListRequest,
        ListResponse,
        ListPageResponse,
        RecentListResponse,
    ))
)]
pub struct ApiDoc;
