//! CRUD handlers shared by every intake form.
//!
//! Each handler takes the [`FormKind`] it serves as a plain argument; the
//! router binds one set of routes per kind. Submissions are stored per user,
//! so a caller can never read or touch another user's records.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Map, Value};
use uuid::Uuid;

use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::{Submission, strip_system_fields};
use safecare_core::store_keys;
use safecare_forms::get_form;
use safecare_forms::validation::retain_declared;
use safecare_storage::error::StorageError;
use safecare_storage::state::{load_all, load_state, save_state};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_submissions(
    state: AppState,
    kind: FormKind,
    user: AuthUser,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let prefix = store_keys::submissions_prefix(kind, user.id);
    let mut submissions: Vec<Submission> = load_all(&state.store, &prefix).await?;
    submissions.sort_by_key(|s| s.date_created);
    Ok(Json(submissions))
}

pub async fn get_submission(
    state: AppState,
    kind: FormKind,
    user: AuthUser,
    id: Uuid,
) -> Result<Json<Submission>, ApiError> {
    Ok(Json(load_submission(&state, kind, user.id, id).await?))
}

pub async fn create_submission(
    state: AppState,
    kind: FormKind,
    user: AuthUser,
    body: Value,
) -> Result<(StatusCode, Json<Submission>), ApiError> {
    let fields = accept_fields(kind, body)?;
    let submission = Submission::new(user.id, fields);
    let key = store_keys::submission(kind, user.id, submission.id);
    save_state(&state.store, &key, &submission).await?;
    tracing::info!(form = %kind, submission_id = %submission.id, "submission created");
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn update_submission(
    state: AppState,
    kind: FormKind,
    user: AuthUser,
    id: Uuid,
    body: Value,
) -> Result<Json<Submission>, ApiError> {
    let fields = accept_fields(kind, body)?;
    let mut submission = load_submission(&state, kind, user.id, id).await?;
    submission.replace_fields(fields);
    let key = store_keys::submission(kind, user.id, id);
    save_state(&state.store, &key, &submission).await?;
    tracing::info!(form = %kind, submission_id = %id, "submission updated");
    Ok(Json(submission))
}

pub async fn delete_submission(
    state: AppState,
    kind: FormKind,
    user: AuthUser,
    id: Uuid,
) -> Result<Json<()>, ApiError> {
    let key = store_keys::submission(kind, user.id, id);
    state.store.delete_object(&key).await.map_err(|e| not_found(kind, id, e))?;
    tracing::info!(form = %kind, submission_id = %id, "submission deleted");
    Ok(Json(()))
}

async fn load_submission(
    state: &AppState,
    kind: FormKind,
    user_id: Uuid,
    id: Uuid,
) -> Result<Submission, ApiError> {
    let key = store_keys::submission(kind, user_id, id);
    let submission: Submission = load_state(&state.store, &key)
        .await
        .map_err(|e| not_found(kind, id, e))?;
    Ok(submission)
}

/// Turn a request body into the stored field map: client-sent system
/// fields are dropped, the declared shape is enforced, and undeclared keys
/// are discarded.
fn accept_fields(kind: FormKind, body: Value) -> Result<Map<String, Value>, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::BadRequest("request body must be a JSON object".to_string()));
    };
    strip_system_fields(&mut fields);
    let form = get_form(kind);
    form.check_shape(&fields)?;
    retain_declared(form.fields(), &mut fields);
    Ok(fields)
}

fn not_found(kind: FormKind, id: Uuid, e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound { .. } => {
            ApiError::NotFound(format!("{} {id} not found", kind.display_name()))
        }
        other => other.into(),
    }
}
