//! User entity model and DTOs.

use maru_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role name granted moderator powers (e.g. deleting any comment).
pub const ROLE_ADMIN: &str = "admin";

/// Default role for ordinary marketplace users.
pub const ROLE_USER: &str = "user";

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    /// Defaults to [`ROLE_USER`] when omitted.
    pub role: Option<String>,
}
