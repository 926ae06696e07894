pub mod comment;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /notifications                list (?page, limit, unread_only)
///                               mark read (PATCH, body action)
///                               delete (?id= or ?all=true)
///                               create (POST, internal API key)
/// /notifications/unread-count   unread count (GET)
///
/// /comments                     list (?target_type, target_id, page, limit)
///                               create (POST, requires auth)
/// /comments/{id}                edit (PATCH, author), delete (author or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Notification feed and read-state management.
        .nest("/notifications", notification::router())
        // Comments and replies across product, tutorial, and post pages.
        .nest("/comments", comment::router())
}
