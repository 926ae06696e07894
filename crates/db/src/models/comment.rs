//! Comment entity models and DTOs.

use maru_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of content a comment attaches to, stored as the PostgreSQL
/// `comment_target` enum.
///
/// `Comment` makes a comment itself a commentable target; the stored tree
/// stays flat (rows grouped by `parent_id`) rather than a recursive join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comment_target", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    Product,
    Tutorial,
    Post,
    Comment,
}

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub target_type: TargetType,
    pub target_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Comment {
    /// Whether the comment has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// A comment row joined with author attribution and its reply count.
///
/// `reply_count` is computed in the same query as the row so it cannot
/// drift from the stored set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub target_type: TargetType,
    pub target_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub author_image: Option<String>,
    pub content: String,
    pub parent_id: Option<DbId>,
    pub reply_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub target_type: TargetType,
    pub target_id: DbId,
    pub content: String,
    /// Present when the comment is a reply.
    pub parent_id: Option<DbId>,
}

/// DTO for editing a comment's content.
#[derive(Debug, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}
