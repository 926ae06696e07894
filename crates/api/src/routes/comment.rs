//! Route definitions for the `/comments` resource.
//!
//! Listing is public; mutations require authentication.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /       -> list_comments (public)
/// POST   /       -> create_comment
/// PATCH  /{id}   -> update_comment (author only)
/// DELETE /{id}   -> delete_comment (author or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/{id}",
            patch(comment::update_comment).delete(comment::delete_comment),
        )
}
