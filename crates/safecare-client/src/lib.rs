//! safecare-client
//!
//! Client side of the intake forms: the session context, the submission
//! gateway that talks to the REST backend, the dashboard selectors, the
//! form editor and the notification slot.

pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod session;
