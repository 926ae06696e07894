//! Token handling for the API.
//!
//! Identity issuance (signup, login, refresh) lives in an external
//! provider; this module only validates the access tokens it mints.

pub mod jwt;
