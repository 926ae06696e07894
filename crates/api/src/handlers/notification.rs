//! Handlers for the `/notifications` resource.
//!
//! User-facing endpoints require authentication via [`AuthUser`]; the
//! producer endpoint authenticates with [`InternalService`] instead.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maru_core::error::CoreError;
use maru_core::pagination::PageRequest;
use maru_core::types::DbId;
use maru_db::models::notification::{CreateNotification, Notification};
use maru_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::internal::InternalService;
use crate::response::{DataResponse, PageInfo};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// Bulk read-state actions for `PATCH /notifications`.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    MarkAsRead,
    MarkAllAsRead,
}

/// Request body for `PATCH /notifications`.
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationsRequest {
    pub action: NotificationAction,
    /// Ids to mark read. Omitting the list with `mark_as_read` marks all.
    pub notification_ids: Option<Vec<DbId>>,
}

/// Query parameters for `DELETE /notifications`.
#[derive(Debug, Deserialize)]
pub struct DeleteNotificationQuery {
    /// Delete a single notification by id.
    pub id: Option<DbId>,
    /// Delete all of the caller's notifications.
    pub all: Option<bool>,
}

/// Payload of `GET /notifications`: the page plus the live unread count the
/// client bell polls for.
#[derive(Debug, Serialize)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
    pub pagination: PageInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<NotificationFeed>>> {
    let page = PageRequest::new(params.page, params.limit)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        unread_only,
        page.limit,
        page.offset(),
    )
    .await?;
    let total = NotificationRepo::count_for_user(&state.pool, auth.user_id, unread_only).await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse::new(NotificationFeed {
        notifications,
        unread_count,
        pagination: PageInfo::new(page.page, page.limit, total),
    })))
}

/// GET /api/v1/notifications/unread-count
///
/// Return the number of unread notifications for the authenticated user.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "unread_count": count }
    })))
}

/// PATCH /api/v1/notifications
///
/// Mark notifications as read. Only rows owned by the caller are touched;
/// already-read rows are skipped, so retries are harmless. Returns the
/// number of rows actually updated.
pub async fn update_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateNotificationsRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = match (input.action, input.notification_ids) {
        (NotificationAction::MarkAllAsRead, _) | (NotificationAction::MarkAsRead, None) => {
            NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?
        }
        (NotificationAction::MarkAsRead, Some(ids)) => {
            if ids.is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "notification_ids must not be empty".into(),
                )));
            }
            NotificationRepo::mark_read(&state.pool, auth.user_id, &ids).await?
        }
    };

    tracing::info!(user_id = auth.user_id, updated, "marked notifications read");

    Ok(Json(serde_json::json!({
        "data": { "updated": updated }
    })))
}

/// DELETE /api/v1/notifications?id={id} or ?all=true
///
/// Delete a single notification or all of the caller's notifications.
/// Returns the number of rows removed. Deleting a notification that is
/// not the caller's returns 404 without revealing whether it exists.
pub async fn delete_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DeleteNotificationQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if params.all.unwrap_or(false) {
        let deleted = NotificationRepo::delete_all(&state.pool, auth.user_id).await?;
        tracing::info!(user_id = auth.user_id, deleted, "deleted all notifications");
        return Ok(Json(serde_json::json!({
            "data": { "deleted": deleted }
        })));
    }

    if let Some(id) = params.id {
        let found = NotificationRepo::delete_one(&state.pool, auth.user_id, id).await?;
        if !found {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Notification",
                id,
            }));
        }
        tracing::info!(user_id = auth.user_id, notification_id = id, "deleted notification");
        return Ok(Json(serde_json::json!({
            "data": { "deleted": 1 }
        })));
    }

    Err(AppError::BadRequest(
        "Specify 'id' or 'all=true'".to_string(),
    ))
}

/// POST /api/v1/notifications
///
/// Create a notification for a user. Server-to-server only; callers
/// authenticate with the internal API key, not a user token.
pub async fn create_notification(
    _service: InternalService,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = notification.user_id,
        notification_id = notification.id,
        kind = ?notification.kind,
        "created notification"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}
