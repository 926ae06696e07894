//! Repository for the `comments` table.
//!
//! Listing joins author attribution and computes `reply_count` with a
//! correlated subquery in the same statement as the row. Deleting a parent
//! cascades to its replies via the `parent_id` foreign key.

use maru_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor, TargetType};

/// Column list for bare `comments` queries.
const COLUMNS: &str = "id, target_type, target_id, user_id, content, parent_id, \
    created_at, updated_at";

/// Column list for author-joined queries (alias `c` for comments, `u` for users).
const JOINED_COLUMNS: &str = "c.id, c.target_type, c.target_id, c.user_id, \
    u.name AS author_name, u.image AS author_image, c.content, c.parent_id, \
    (SELECT COUNT(*) FROM comments r WHERE r.parent_id = c.id) AS reply_count, \
    c.created_at, c.updated_at";

/// Upper bound on parent-chain walks; far beyond any configured depth.
const DEPTH_WALK_LIMIT: u32 = 64;

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Create a comment (or reply), returning the created row.
    ///
    /// Target/parent consistency and depth limits are validated by the
    /// caller before insertion.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        target_type: TargetType,
        target_id: DbId,
        content: &str,
        parent_id: Option<DbId>,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (target_type, target_id, user_id, content, parent_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(target_type)
            .bind(target_id)
            .bind(user_id)
            .bind(content)
            .bind(parent_id)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment by id with author attribution and reply count.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a page of top-level comments for a target, newest first.
    pub async fn list_top_level(
        pool: &PgPool,
        target_type: TargetType,
        target_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.target_type = $1 AND c.target_id = $2 AND c.parent_id IS NULL \
             ORDER BY c.created_at DESC, c.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(target_type)
            .bind(target_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count top-level comments for a target.
    pub async fn count_top_level(
        pool: &PgPool,
        target_type: TargetType,
        target_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments \
             WHERE target_type = $1 AND target_id = $2 AND parent_id IS NULL",
        )
        .bind(target_type)
        .bind(target_id)
        .fetch_one(pool)
        .await
    }

    /// List replies for a set of parent comments, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.parent_id = ANY($1) \
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's content, bumping `updated_at` in the same
    /// statement. `created_at` is immutable.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Replies cascade via the parent foreign key.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Depth of a comment in its thread: a top-level comment has depth 1.
    ///
    /// Walks the parent chain row by row; the chain is bounded by the
    /// configured max depth in practice, with a hard cap as a safety net.
    pub async fn depth_of(pool: &PgPool, id: DbId) -> Result<u32, sqlx::Error> {
        let mut depth: u32 = 1;
        let mut current = id;
        for _ in 0..DEPTH_WALK_LIMIT {
            let parent: Option<DbId> =
                sqlx::query_scalar("SELECT parent_id FROM comments WHERE id = $1")
                    .bind(current)
                    .fetch_one(pool)
                    .await?;
            match parent {
                Some(parent_id) => {
                    depth += 1;
                    current = parent_id;
                }
                None => return Ok(depth),
            }
        }
        Ok(depth)
    }
}
