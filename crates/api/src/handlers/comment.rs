//! Handlers for the `/comments` resource.
//!
//! Listing is public; creating, editing, and deleting require
//! authentication. Edits are author-only, deletion is author-or-admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use maru_core::comments::{check_reply_depth, group_by_parent, normalize_content};
use maru_core::error::CoreError;
use maru_core::pagination::PageRequest;
use maru_core::types::DbId;
use maru_db::models::comment::{
    Comment, CommentWithAuthor, CreateComment, TargetType, UpdateComment,
};
use maru_db::repositories::CommentRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageInfo};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /comments`.
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub target_type: TargetType,
    pub target_id: DbId,
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// A top-level comment with its replies attached, as served to clients.
#[derive(Debug, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: CommentWithAuthor,
    /// Direct replies, oldest first.
    pub replies: Vec<CommentWithAuthor>,
}

/// Payload of `GET /comments`: one page of top-level threads.
#[derive(Debug, Serialize)]
pub struct CommentPage {
    pub comments: Vec<CommentNode>,
    pub pagination: PageInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/comments?target_type=&target_id=
///
/// List a page of top-level comments for a target, newest first, each with
/// its replies attached oldest first. No authentication required.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentQuery>,
) -> AppResult<Json<DataResponse<CommentPage>>> {
    let page = PageRequest::new(params.page, params.limit)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let top_level = CommentRepo::list_top_level(
        &state.pool,
        params.target_type,
        params.target_id,
        page.limit,
        page.offset(),
    )
    .await?;
    let total =
        CommentRepo::count_top_level(&state.pool, params.target_type, params.target_id).await?;

    // One query for all replies on this page, grouped in memory.
    let parent_ids: Vec<DbId> = top_level.iter().map(|c| c.id).collect();
    let mut replies = if parent_ids.is_empty() {
        std::collections::HashMap::new()
    } else {
        let rows = CommentRepo::list_replies(&state.pool, &parent_ids).await?;
        group_by_parent(rows, |r| r.parent_id)
    };

    let comments: Vec<CommentNode> = top_level
        .into_iter()
        .map(|comment| {
            let replies = replies.remove(&comment.id).unwrap_or_default();
            CommentNode { comment, replies }
        })
        .collect();

    Ok(Json(DataResponse::new(CommentPage {
        comments,
        pagination: PageInfo::new(page.page, page.limit, total),
    })))
}

/// POST /api/v1/comments
///
/// Create a comment or reply. Replies must target the same content as
/// their parent and stay within the configured nesting depth.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let content = normalize_content(&input.content)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if let Some(parent_id) = input.parent_id {
        let parent = CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: parent_id,
            }))?;

        if parent.target_type != input.target_type || parent.target_id != input.target_id {
            return Err(AppError::Core(CoreError::Validation(
                "Reply must target the same content as its parent.".into(),
            )));
        }

        let parent_depth = CommentRepo::depth_of(&state.pool, parent_id).await?;
        check_reply_depth(parent_depth, state.config.comment_max_depth)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let comment = CommentRepo::create(
        &state.pool,
        auth.user_id,
        input.target_type,
        input.target_id,
        &content,
        input.parent_id,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id = comment.id,
        target_type = ?comment.target_type,
        target_id = comment.target_id,
        is_reply = comment.parent_id.is_some(),
        "created comment"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(comment))))
}

/// PATCH /api/v1/comments/{id}
///
/// Edit a comment's content. Only the author may edit; the stored
/// `updated_at` is bumped so clients can show an edited marker.
pub async fn update_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let content = normalize_content(&input.content)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let existing = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    if existing.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit this comment.".into(),
        )));
    }

    let updated = CommentRepo::update_content(&state.pool, comment_id, &content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    tracing::info!(user_id = auth.user_id, comment_id, "updated comment");

    Ok(Json(DataResponse::new(updated)))
}

/// DELETE /api/v1/comments/{id}
///
/// Delete a comment. The author may always delete their own; admins may
/// delete any. Replies are removed along with their parent.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    if existing.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin can delete this comment.".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id,
        as_admin = existing.user_id != auth.user_id,
        "deleted comment"
    );

    Ok(StatusCode::NO_CONTENT)
}
