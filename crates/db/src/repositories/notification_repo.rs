//! Repository for the `notifications` table.
//!
//! The unread count is always recomputed from the stored rows rather than
//! maintained as a separate counter, and mark-read sets `read_at` in the
//! same UPDATE that flips `is_read`, so the count can never drift.

use maru_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, kind, title, message, data, is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, title, message, data) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(input.kind)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.data.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// List a page of a user's notifications, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a user's notifications, optionally unread-only.
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
    ) -> Result<i64, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!("SELECT COUNT(*) FROM notifications WHERE user_id = $1 {filter}");
        sqlx::query_scalar(&query).bind(user_id).fetch_one(pool).await
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        Self::count_for_user(pool, user_id, true).await
    }

    /// Mark the given notifications as read, scoped to the owning user.
    ///
    /// Rows that are already read, or that belong to another user, are left
    /// untouched. Returns the number of rows that actually transitioned.
    pub async fn mark_read(
        pool: &PgPool,
        user_id: DbId,
        notification_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND id = ANY($2) AND is_read = false",
        )
        .bind(user_id)
        .bind(notification_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark all of a user's unread notifications as read.
    ///
    /// Returns the number of notifications that transitioned.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a single notification owned by the user.
    ///
    /// Returns `true` if a row was deleted, `false` if the id does not exist
    /// or belongs to another user.
    pub async fn delete_one(
        pool: &PgPool,
        user_id: DbId,
        notification_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a user's notifications, returning the number removed.
    pub async fn delete_all(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
