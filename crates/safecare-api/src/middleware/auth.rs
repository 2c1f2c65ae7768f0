use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use safecare_core::endpoints::USER_ID_HEADER;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer token middleware.
///
/// Extracts the `Authorization: Bearer <token>` header, validates the JWT
/// and rejects revoked tokens. When the client also sends a `userId` header
/// it must name the token's subject. On success, inserts [`AuthUser`] into
/// request extensions for handlers to use.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let claims = state.tokens.validate(token)?;
    if state.is_revoked(&claims.jti).await {
        return Err(ApiError::Unauthorized("token revoked".to_string()));
    }
    let id = claims.user_id()?;

    if let Some(header) = req.headers().get(USER_ID_HEADER) {
        let claimed = header.to_str().ok().and_then(|v| v.parse::<Uuid>().ok());
        if claimed != Some(id) {
            tracing::warn!(user_id = %id, "userId header does not match token subject");
            return Err(ApiError::Unauthorized("user id does not match token".to_string()));
        }
    }

    req.extensions_mut().insert(AuthUser {
        id,
        jti: claims.jti,
        exp: claims.exp,
    });

    Ok(next.run(req).await)
}

/// Authenticated user extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub jti: String,
    pub exp: i64,
}
