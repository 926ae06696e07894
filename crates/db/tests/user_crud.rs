//! Integration tests for the users repository.

use maru_db::models::user::{CreateUser, ROLE_ADMIN, ROLE_USER};
use maru_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn created_user_is_findable_by_id(pool: PgPool) {
    let created = UserRepo::create(
        &pool,
        &CreateUser {
            name: "수민".to_string(),
            email: "sumin@example.com".to_string(),
            image: Some("/avatars/sumin.png".to_string()),
            role: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.role, ROLE_USER);

    let found = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "수민");
    assert_eq!(found.email, "sumin@example.com");
    assert_eq!(found.image.as_deref(), Some("/avatars/sumin.png"));
}

#[sqlx::test(migrations = "./migrations")]
async fn explicit_role_is_kept(pool: PgPool) {
    let created = UserRepo::create(
        &pool,
        &CreateUser {
            name: "관리자".to_string(),
            email: "admin@example.com".to_string(),
            image: None,
            role: Some(ROLE_ADMIN.to_string()),
        },
    )
    .await
    .unwrap();

    let found = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.role, ROLE_ADMIN);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_user_is_none(pool: PgPool) {
    assert!(UserRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}
