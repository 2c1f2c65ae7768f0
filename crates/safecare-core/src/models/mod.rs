pub mod form_kind;
pub mod submission;
pub mod user;
