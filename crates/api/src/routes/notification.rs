//! Route definitions for the `/notifications` resource.
//!
//! User endpoints require authentication; creation is server-to-server
//! and requires the internal API key.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /              -> list_notifications
/// PATCH  /              -> update_notifications (mark read)
/// DELETE /              -> delete_notifications (?id= or ?all=true)
/// POST   /              -> create_notification (internal)
/// GET    /unread-count  -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification::list_notifications)
                .patch(notification::update_notifications)
                .delete(notification::delete_notifications)
                .post(notification::create_notification),
        )
        .route("/unread-count", get(notification::unread_count))
}
