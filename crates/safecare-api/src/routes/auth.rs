use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{Value, json};
use uuid::Uuid;

use safecare_auth::error::AuthError;
use safecare_auth::password;
use safecare_core::models::user::{
    AuthResponse, SignInRequest, SignUpRequest, UserProfile, UserRecord, normalize_email,
};
use safecare_core::store_keys;
use safecare_storage::error::StorageError;
use safecare_storage::state::{load_state, save_state};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = req.name.trim().to_string();
    let email = normalize_email(&req.email);
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("name, email and password are required".to_string()));
    }

    let cost = state.bcrypt_cost;
    let password = req.password;
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&password, cost)).await??;

    let _guard = state.signup_lock.lock().await;
    let email_key = store_keys::user_email(&email);
    if state.store.exists(&email_key).await {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let user = UserRecord {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash,
        created_at: jiff::Timestamp::now(),
    };
    save_state(&state.store, &store_keys::user(user.id), &user).await?;
    save_state(&state.store, &email_key, &user.id).await?;
    tracing::info!(user_id = %user.id, "user signed up");

    let (access_token, _) = state.tokens.issue(user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.profile(),
            access_token,
        }),
    ))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = normalize_email(&req.email);
    let user_id: Uuid = match load_state(&state.store, &store_keys::user_email(&email)).await {
        Ok(id) => id,
        Err(StorageError::NotFound { .. }) => return Err(AuthError::InvalidCredentials.into()),
        Err(e) => return Err(e.into()),
    };
    let user: UserRecord = load_state(&state.store, &store_keys::user(user_id)).await?;

    let password = req.password;
    let hash = user.password_hash.clone();
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash)).await??;

    let (access_token, _) = state.tokens.issue(user.id)?;
    tracing::info!(user_id = %user.id, "user signed in");
    Ok(Json(AuthResponse {
        user: user.profile(),
        access_token,
    }))
}

pub async fn sign_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    state.revoke(&user.jti, user.exp).await?;
    Ok(Json(json!({ "message": "Signed out" })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let record: UserRecord = load_state(&state.store, &store_keys::user(user.id))
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::NotFound("user not found".to_string()),
            other => other.into(),
        })?;
    Ok(Json(record.profile()))
}
