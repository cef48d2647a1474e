//! OpenAPI document for the bookmark API.

use utoipa::OpenApi;

use shelfmark_core::{Bookmark, BookmarkPage, SyncReport};

use crate::handlers::bookmarks::{self, AddTagsBody, CreateBookmarkBody, FetchInfoResponse, TagsInput};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "shelfmark API",
        description = "Personal bookmark manager with best-effort page title resolution"
    ),
    paths(
        bookmarks::list_bookmarks,
        bookmarks::create_bookmark,
        bookmarks::get_bookmark,
        bookmarks::delete_bookmark,
        bookmarks::search_bookmarks,
        bookmarks::search_by_actress,
        bookmarks::list_actresses,
        bookmarks::add_tags,
        bookmarks::fetch_info,
        bookmarks::sync_titles,
    ),
    components(schemas(
        Bookmark,
        BookmarkPage,
        SyncReport,
        CreateBookmarkBody,
        AddTagsBody,
        TagsInput,
        FetchInfoResponse,
    )),
    tags(
        (name = "Bookmarks", description = "Bookmark CRUD, search, tagging, and title sync"),
        (name = "Actresses", description = "Actress name lookup")
    )
)]
pub struct ApiDoc;
