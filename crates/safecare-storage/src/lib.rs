//! safecare-storage
//!
//! Key/value object storage for the backend. Objects live in memory and are
//! optionally mirrored to a JSON snapshot file after every write.

pub mod error;
pub mod objects;
pub mod state;
