//! Domain logic for the maru marketplace backend.
//!
//! Pure functions and shared types only -- no I/O. The database layer
//! (`maru-db`) and HTTP layer (`maru-api`) build on top of this crate.

pub mod comments;
pub mod error;
pub mod pagination;
pub mod types;
