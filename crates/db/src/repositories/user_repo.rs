//! Repository for the `users` table.

use maru_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, ROLE_USER};

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, image, role, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let role = input.role.as_deref().unwrap_or(ROLE_USER);
        let query = format!(
            "INSERT INTO users (name, email, image, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.image)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
