//! safecare-auth
//!
//! Bearer token issuing/validation and password hashing for the backend.

pub mod error;
pub mod jwt;
pub mod password;
