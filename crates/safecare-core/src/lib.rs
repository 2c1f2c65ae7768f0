//! safecare-core
//!
//! Pure domain types, form field schema vocabulary, REST endpoint paths and
//! storage key conventions. No HTTP or storage dependency: this is the shared
//! vocabulary of the Safe Care system.

pub mod endpoints;
pub mod error;
pub mod models;
pub mod schema;
pub mod store_keys;
