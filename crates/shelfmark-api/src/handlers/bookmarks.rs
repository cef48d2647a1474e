//! Bookmark HTTP handlers.
//!
//! Query and body shapes are loose on the wire (numbers as text, tags as a
//! string or a list); everything is normalized here before it reaches the
//! services.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use shelfmark_core::{Bookmark, BookmarkPage, PageRequest, SyncReport};

use crate::error::ApiError;
use crate::services::CreateBookmark;
use crate::state::AppState;

/// Tags as sent by clients: one scalar or a list of scalars.
///
/// Strings pass through and numbers or booleans use their JSON text.
/// Nulls and nested arrays or objects are skipped.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(from = "Value")]
pub struct TagsInput(Vec<String>);

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<Value> for TagsInput {
    fn from(value: Value) -> Self {
        let tags = match value {
            Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
            other => scalar_text(other).into_iter().collect(),
        };
        Self(tags)
    }
}

impl From<TagsInput> for Vec<String> {
    fn from(input: TagsInput) -> Self {
        input.0
    }
}

fn tags_of(input: Option<TagsInput>) -> Vec<String> {
    input.map(Vec::from).unwrap_or_default()
}

/// Lenient integer parse: anything unparsable counts as absent.
fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActressQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActressListQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FetchInfoQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkBody {
    pub url: Option<String>,
    pub tags: Option<TagsInput>,
    pub actress_name: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddTagsBody {
    pub tags: Option<TagsInput>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FetchInfoResponse {
    pub title: String,
}

/// List bookmarks, newest first.
///
/// GET /api/bookmarks?page&limit
#[utoipa::path(get, path = "/api/bookmarks", tag = "Bookmarks",
    params(
        ("page" = Option<i64>, Query, description = "1-indexed page (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10, max 100)")
    ),
    responses((status = 200, description = "One page of bookmarks", body = BookmarkPage)))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BookmarkPage>, ApiError> {
    let page = PageRequest::new(
        parse_number(query.page.as_deref()),
        parse_number(query.limit.as_deref()),
    );
    Ok(Json(state.bookmarks.list(page).await?))
}

/// Create a bookmark, resolving its title unless one is given.
///
/// POST /api/bookmarks
#[utoipa::path(post, path = "/api/bookmarks", tag = "Bookmarks",
    request_body = CreateBookmarkBody,
    responses(
        (status = 201, description = "Created", body = Bookmark),
        (status = 400, description = "Missing or blank url")
    ))]
pub async fn create_bookmark(
    State(state): State<AppState>,
    Json(body): Json<CreateBookmarkBody>,
) -> Result<impl IntoResponse, ApiError> {
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("url is required".to_string()))?;

    let bookmark = state
        .bookmarks
        .create(CreateBookmark {
            url,
            tags: tags_of(body.tags),
            actress_name: body.actress_name,
            title: body.title,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// GET /api/bookmarks/:id
#[utoipa::path(get, path = "/api/bookmarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark id")),
    responses(
        (status = 200, description = "Bookmark", body = Bookmark),
        (status = 404, description = "Not found")
    ))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bookmark>, ApiError> {
    let bookmark = state
        .bookmarks
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Bookmark {} not found", id)))?;
    Ok(Json(bookmark))
}

/// Delete a bookmark; unknown ids succeed too.
///
/// DELETE /api/bookmarks/:id
#[utoipa::path(delete, path = "/api/bookmarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark id")),
    responses((status = 204, description = "Deleted (or never existed)")))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.bookmarks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bookmarks/search?keyword
#[utoipa::path(get, path = "/api/bookmarks/search", tag = "Bookmarks",
    params(("keyword" = Option<String>, Query, description = "Substring of title, url, or actress name")),
    responses((status = 200, description = "Matches", body = Vec<Bookmark>)))]
pub async fn search_bookmarks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let keyword = query.keyword.unwrap_or_default();
    Ok(Json(state.bookmarks.search(&keyword).await?))
}

/// GET /api/bookmarks/actress?name
#[utoipa::path(get, path = "/api/bookmarks/actress", tag = "Actresses",
    params(("name" = Option<String>, Query, description = "Name tokens, any order")),
    responses((status = 200, description = "Matches", body = Vec<Bookmark>)))]
pub async fn search_by_actress(
    State(state): State<AppState>,
    Query(query): Query<ActressQuery>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let name = query.name.unwrap_or_default();
    Ok(Json(state.actresses.search_by_actress(&name).await?))
}

/// GET /api/bookmarks/actress-list?query
#[utoipa::path(get, path = "/api/bookmarks/actress-list", tag = "Actresses",
    params(("query" = Option<String>, Query, description = "Optional name filter")),
    responses((status = 200, description = "Distinct names", body = Vec<String>)))]
pub async fn list_actresses(
    State(state): State<AppState>,
    Query(query): Query<ActressListQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(
        state
            .actresses
            .list_unique_actresses(query.query.as_deref())
            .await?,
    ))
}

/// Merge tags into a bookmark.
///
/// POST /api/bookmarks/:id/tags
#[utoipa::path(post, path = "/api/bookmarks/{id}/tags", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark id")),
    request_body = AddTagsBody,
    responses((status = 204, description = "Tags merged (no-op for unknown ids)")))]
pub async fn add_tags(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddTagsBody>,
) -> Result<StatusCode, ApiError> {
    state.bookmarks.add_tags(id, &tags_of(body.tags)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a page title without saving anything.
///
/// GET /api/bookmarks/fetch-info?url
#[utoipa::path(get, path = "/api/bookmarks/fetch-info", tag = "Bookmarks",
    params(("url" = String, Query, description = "Page to resolve")),
    responses(
        (status = 200, description = "Resolved title (the url itself on failure)", body = FetchInfoResponse),
        (status = 400, description = "Missing url")
    ))]
pub async fn fetch_info(
    State(state): State<AppState>,
    Query(query): Query<FetchInfoQuery>,
) -> Result<Json<FetchInfoResponse>, ApiError> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("url is required".to_string()))?;

    let title = state.bookmarks.fetch_title(&url).await;
    Ok(Json(FetchInfoResponse { title }))
}

/// Re-resolve every bookmark with a missing or URL-like title.
///
/// POST /api/bookmarks/sync-titles
#[utoipa::path(post, path = "/api/bookmarks/sync-titles", tag = "Bookmarks",
    responses((status = 200, description = "Tally", body = SyncReport)))]
pub async fn sync_titles(State(state): State<AppState>) -> Result<Json<SyncReport>, ApiError> {
    Ok(Json(state.sync.run().await?))
}
