//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Any enums stored as PostgreSQL enum types

pub mod comment;
pub mod notification;
pub mod user;
