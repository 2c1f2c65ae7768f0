//! Object store key conventions.
//!
//! Pure string functions with no storage dependency. These define the
//! canonical layout of objects in the backend store.

use uuid::Uuid;

use crate::models::form_kind::FormKind;

pub fn user(id: Uuid) -> String {
    format!("users/{id}.json")
}

/// Index entry mapping a normalized email to a user id.
pub fn user_email(email: &str) -> String {
    format!("users_by_email/{email}")
}

pub fn submission(kind: FormKind, user_id: Uuid, id: Uuid) -> String {
    format!("submissions/{}/{user_id}/{id}.json", kind.slug())
}

pub fn submissions_prefix(kind: FormKind, user_id: Uuid) -> String {
    format!("submissions/{}/{user_id}/", kind.slug())
}

pub const REVOKED_TOKENS: &str = "_state/revoked_tokens.json";
