//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Ownership checks live in
//! the WHERE clause of every user-scoped mutation, and every mutation is a
//! single statement, so no partial state is visible to concurrent readers.

pub mod comment_repo;
pub mod notification_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use notification_repo::NotificationRepo;
pub use user_repo::UserRepo;
