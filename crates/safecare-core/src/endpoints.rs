//! REST path conventions, relative to the API base URL (which already
//! carries the `/api` prefix).
//!
//! Pure string functions shared by the server router and the client gateway.

use uuid::Uuid;

use crate::models::form_kind::FormKind;

/// Header carrying the authenticated user's id next to the bearer token.
pub const USER_ID_HEADER: &str = "userId";

pub const SIGNIN: &str = "/signin";

pub const SIGNUP: &str = "/signup";

pub const SIGNOUT: &str = "/signout";

pub const GET_USER: &str = "/get_user";

pub const HEALTH: &str = "/health";

pub const FORMS: &str = "/forms";

pub fn form_schema(kind: FormKind) -> String {
    format!("/forms/{}", kind.slug())
}

pub fn list(kind: FormKind) -> String {
    format!("/get_{}", kind.slug())
}

pub fn get(kind: FormKind, id: Uuid) -> String {
    format!("/get_{}/{id}", kind.slug())
}

pub fn add(kind: FormKind) -> String {
    format!("/add_{}", kind.slug())
}

pub fn update(kind: FormKind, id: Uuid) -> String {
    format!("/update_{}/{id}", kind.slug())
}

pub fn delete(kind: FormKind, id: Uuid) -> String {
    format!("/delete_{}/{id}", kind.slug())
}

/// Route patterns (axum `{id}` syntax) for one form kind, used to build
/// the server router: `(list, get, add, update, delete)`.
pub fn route_patterns(kind: FormKind) -> [String; 5] {
    let slug = kind.slug();
    [
        format!("/get_{slug}"),
        format!("/get_{slug}/{{id}}"),
        format!("/add_{slug}"),
        format!("/update_{slug}/{{id}}"),
        format!("/delete_{slug}/{{id}}"),
    ]
}
