//! Bucket-list CRUD endpoints.
//!
//! Every endpoint requires an authenticated session and only ever operates
//! on the caller's own lists. Lists belonging to other users are
//! indistinguishable from lists that do not exist.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use pagination::{DEFAULT_PER_PAGE, Page, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{list_error, missing_field_error};
use crate::domain::{ApiResult, BucketList, Error, ListName, RecentEntry};

/// Body for `POST /api/v1/bucket-lists`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    /// List name, unique among the caller's lists ignoring case.
    #[schema(example = "Go to Borabora for vacay")]
    name: Option<String>,
    /// Free-form description; defaults to empty.
    description: Option<String>,
}

/// Body for `PUT /api/v1/bucket-lists/{slug}`.
///
/// Omitted fields keep their stored values.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListRequest {
    /// Replacement name.
    name: Option<String>,
    /// Replacement description.
    description: Option<String>,
}

/// Pagination controls for `GET /api/v1/bucket-lists`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    page: Option<u32>,
    /// Items per page, 1 to 100; defaults to 10.
    per_page: Option<u32>,
}

impl PageQuery {
    fn into_request(self) -> Result<PageRequest, Error> {
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        PageRequest::new(page, per_page).map_err(|err| {
            let field = match err {
                PageRequestError::ZeroPage => "page",
                PageRequestError::PerPageOutOfRange { .. } => "perPage",
            };
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": field,
                "code": "out_of_range",
            }))
        })
    }
}

/// A bucket list, as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// List identifier.
    id: String,
    /// List name.
    #[schema(example = "Go to Borabora for vacay")]
    name: String,
    /// Free-form description.
    description: String,
    /// URL-safe slug derived from the name.
    #[schema(example = "go-to-borabora-for-vacay")]
    slug: String,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
    /// Last modification timestamp.
    modified_at: DateTime<Utc>,
}

impl From<&BucketList> for ListResponse {
    fn from(list: &BucketList) -> Self {
        Self {
            id: list.id().to_string(),
            name: list.name().as_ref().to_owned(),
            description: list.description().to_owned(),
            slug: list.slug().to_owned(),
            created_at: list.created_at(),
            modified_at: list.modified_at(),
        }
    }
}

/// One page of the caller's bucket lists.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPageResponse {
    /// Lists on this page, ordered by name.
    items: Vec<ListResponse>,
    /// 1-based page number.
    page: u32,
    /// Page size this page was produced with.
    per_page: u32,
    /// Total number of lists across all pages.
    total: u64,
    /// Total number of pages.
    total_pages: u64,
}

impl From<Page<BucketList>> for ListPageResponse {
    fn from(page: Page<BucketList>) -> Self {
        let total_pages = page.total_pages();
        let (items, page_number, per_page, total) =
            page.map(|list| ListResponse::from(&list)).into_parts();
        Self {
            items,
            page: page_number,
            per_page,
            total,
            total_pages,
        }
    }
}

/// A recently modified list, truncated for summary display.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentListResponse {
    /// List identifier.
    id: String,
    /// Name, truncated to 25 characters.
    name: String,
    /// Description, truncated to 90 characters.
    description: String,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
    /// Last modification timestamp.
    modified_at: DateTime<Utc>,
}

impl From<RecentEntry> for RecentListResponse {
    fn from(entry: RecentEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name,
            description: entry.description,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
        }
    }
}

/// Browse the caller's lists one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/bucket-lists",
    tag = "bucket-lists",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of the caller's lists", body = ListPageResponse),
        (status = 400, description = "Pagination out of range", body = Error),
        (status = 401, description = "Not logged in", body = Error),
    )
)]
pub async fn browse(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let request = query.into_inner().into_request()?;
    let page = state.lists.browse(&user_id, request).await?;
    Ok(HttpResponse::Ok().json(ListPageResponse::from(page)))
}

/// The caller's most recently modified lists, truncated for display.
#[utoipa::path(
    get,
    path = "/api/v1/bucket-lists/recent",
    tag = "bucket-lists",
    responses(
        (status = 200, description = "Up to six recently modified lists", body = [RecentListResponse]),
        (status = 401, description = "Not logged in", body = Error),
    )
)]
pub async fn recent(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let entries = state.lists.recent(&user_id).await?;
    let body: Vec<RecentListResponse> = entries.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Create a bucket list owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/bucket-lists",
    tag = "bucket-lists",
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "List created", body = ListResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 409, description = "Name already used by another of the caller's lists", body = Error),
    )
)]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateListRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = body.into_inner();
    let name = body.name.ok_or_else(|| missing_field_error("name"))?;
    let name = ListName::new(name).map_err(list_error)?;
    let description = body.description.unwrap_or_default();

    let list = state.lists.create(&user_id, name, description).await?;
    Ok(HttpResponse::Created().json(ListResponse::from(&list)))
}

/// Fetch one of the caller's lists by slug.
#[utoipa::path(
    get,
    path = "/api/v1/bucket-lists/{slug}",
    tag = "bucket-lists",
    params(("slug" = String, Path, description = "List slug")),
    responses(
        (status = 200, description = "The list", body = ListResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such list for this caller", body = Error),
    )
)]
pub async fn fetch(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list = state.lists.fetch(&user_id, &slug).await?;
    Ok(HttpResponse::Ok().json(ListResponse::from(&list)))
}

/// Update one of the caller's lists; omitted fields keep their values.
#[utoipa::path(
    put,
    path = "/api/v1/bucket-lists/{slug}",
    tag = "bucket-lists",
    params(("slug" = String, Path, description = "List slug")),
    request_body = UpdateListRequest,
    responses(
        (status = 200, description = "The updated list", body = ListResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such list for this caller", body = Error),
        (status = 409, description = "Name already used by another of the caller's lists", body = Error),
    )
)]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
    body: web::Json<UpdateListRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = body.into_inner();
    let name = body
        .name
        .map(|raw| ListName::new(raw).map_err(list_error))
        .transpose()?;

    let list = state
        .lists
        .update(&user_id, &slug, name, body.description)
        .await?;
    Ok(HttpResponse::Ok().json(ListResponse::from(&list)))
}

/// Delete one of the caller's lists.
#[utoipa::path(
    delete,
    path = "/api/v1/bucket-lists/{slug}",
    tag = "bucket-lists",
    params(("slug" = String, Path, description = "List slug")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such list for this caller", body = Error),
    )
)]
pub async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.lists.delete(&user_id, &slug).await?;
    Ok(HttpResponse::NoContent().finish())
}
