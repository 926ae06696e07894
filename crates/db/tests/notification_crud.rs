//! Integration tests for the notification repository.
//!
//! Exercises counter consistency, mark-read idempotence, ownership
//! isolation, and the schema-level read-state invariant against a real
//! database.

use assert_matches::assert_matches;
use sqlx::PgPool;

use maru_db::models::notification::CreateNotification;
use maru_db::models::user::CreateUser;
use maru_db::repositories::{NotificationRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            image: None,
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_notifications(pool: &PgPool, user_id: i64, count: usize) -> Vec<i64> {
    let mut ids = Vec::new();
    for i in 0..count {
        let created = NotificationRepo::create(
            pool,
            &CreateNotification::purchase(user_id, i as i64 + 1, "Icon Pack", 9900),
        )
        .await
        .unwrap();
        ids.push(created.id);
    }
    ids
}

// ---------------------------------------------------------------------------
// Counter consistency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn unread_count_tracks_mutations(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let ids = seed_notifications(&pool, user, 5).await;

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 5);

    // Mark two read: count drops by exactly the number transitioned.
    let marked = NotificationRepo::mark_read(&pool, user, &ids[..2]).await.unwrap();
    assert_eq!(marked, 2);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 3);

    // Delete one unread: count drops by one.
    assert!(NotificationRepo::delete_one(&pool, user, ids[2]).await.unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);

    // Delete one already-read: count unchanged.
    assert!(NotificationRepo::delete_one(&pool, user, ids[0]).await.unwrap());
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);

    // Mark all: count reaches zero and stays consistent with the rows.
    let marked = NotificationRepo::mark_all_read(&pool, user).await.unwrap();
    assert_eq!(marked, 2);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);

    let unread = NotificationRepo::list_for_user(&pool, user, true, 100, 0)
        .await
        .unwrap();
    assert!(unread.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_read_is_idempotent(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let ids = seed_notifications(&pool, user, 1).await;

    assert_eq!(NotificationRepo::mark_read(&pool, user, &ids).await.unwrap(), 1);
    // Second call transitions nothing and does not error.
    assert_eq!(NotificationRepo::mark_read(&pool, user, &ids).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn read_at_set_with_read_flag(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let ids = seed_notifications(&pool, user, 1).await;

    let rows = NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap();
    assert!(!rows[0].is_read);
    assert!(rows[0].read_at.is_none());

    NotificationRepo::mark_read(&pool, user, &ids).await.unwrap();

    let rows = NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap();
    assert!(rows[0].is_read);
    assert!(rows[0].read_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn schema_rejects_read_flag_without_timestamp(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;

    // The CHECK constraint makes the invariant unrepresentable even for
    // raw SQL that bypasses the repository.
    let result = sqlx::query(
        "INSERT INTO notifications (user_id, kind, title, message, is_read) \
         VALUES ($1, 'system', 't', 'm', true)",
    )
    .bind(user)
    .execute(&pool)
    .await;

    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Ownership isolation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn other_user_cannot_mark_or_delete(pool: PgPool) {
    let alice = seed_user(&pool, "Alice", "alice@example.com").await;
    let bob = seed_user(&pool, "Bob", "bob@example.com").await;
    let ids = seed_notifications(&pool, alice, 2).await;

    // Bob marking Alice's notifications is a no-op.
    assert_eq!(NotificationRepo::mark_read(&pool, bob, &ids).await.unwrap(), 0);
    assert_eq!(NotificationRepo::mark_all_read(&pool, bob).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, alice).await.unwrap(), 2);

    // Bob deleting Alice's notification does not remove the row.
    assert!(!NotificationRepo::delete_one(&pool, bob, ids[0]).await.unwrap());
    assert_eq!(NotificationRepo::count_for_user(&pool, alice, false).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Listing and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn listing_is_newest_first_and_complete(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let ids = seed_notifications(&pool, user, 7).await;

    // Iterate pages of size 3: every id exactly once, newest first.
    let mut seen = Vec::new();
    for page in 0..3 {
        let rows = NotificationRepo::list_for_user(&pool, user, false, 3, page * 3)
            .await
            .unwrap();
        seen.extend(rows.iter().map(|n| n.id));
    }
    let mut expected: Vec<i64> = ids.clone();
    expected.reverse();
    assert_eq!(seen, expected);
}

#[sqlx::test(migrations = "./migrations")]
async fn unread_filter_excludes_read_rows(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let ids = seed_notifications(&pool, user, 5).await;
    NotificationRepo::mark_read(&pool, user, &ids[..2]).await.unwrap();

    let unread = NotificationRepo::list_for_user(&pool, user, true, 100, 0)
        .await
        .unwrap();
    assert_eq!(unread.len(), 3);
    assert!(unread.iter().all(|n| !n.is_read));
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_all_removes_only_own_rows(pool: PgPool) {
    let alice = seed_user(&pool, "Alice", "alice@example.com").await;
    let bob = seed_user(&pool, "Bob", "bob@example.com").await;
    seed_notifications(&pool, alice, 3).await;
    seed_notifications(&pool, bob, 2).await;

    assert_eq!(NotificationRepo::delete_all(&pool, alice).await.unwrap(), 3);
    assert_eq!(NotificationRepo::count_for_user(&pool, alice, false).await.unwrap(), 0);
    assert_eq!(NotificationRepo::count_for_user(&pool, bob, false).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Payload round trip through JSONB
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn payload_survives_storage(pool: PgPool) {
    let user = seed_user(&pool, "수민", "sumin@example.com").await;
    let input = CreateNotification::sale(user, 42, "브러시 세트", "민준", 15000);
    let created = NotificationRepo::create(&pool, &input).await.unwrap();

    let rows = NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap();
    let stored = rows.iter().find(|n| n.id == created.id).unwrap();
    let payload = stored.data.as_ref().unwrap();
    assert_eq!(payload.0, input.data.clone().unwrap());
    assert_eq!(payload.0.link().unwrap(), "/dashboard/sales?product=42");
}
