//! safecare-api
//!
//! HTTP backend for the intake forms: account sign-up and sign-in with
//! bearer tokens, per-user CRUD for every form kind, and the published form
//! schemas. Everything is mounted under `/api`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::{Path, State};
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use safecare_core::endpoints;
use safecare_core::models::form_kind::FormKind;

use middleware::auth::AuthUser;
use routes::submissions;
use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        // Health (no auth)
        .route(endpoints::HEALTH, get(routes::health::health_check))
        // Form schemas (no auth, no patient data)
        .route(endpoints::FORMS, get(routes::forms::list_forms))
        .route("/forms/{form}", get(routes::forms::get_form_detail))
        .route(endpoints::SIGNUP, post(routes::auth::sign_up))
        .route(endpoints::SIGNIN, post(routes::auth::sign_in));

    let mut protected = Router::new()
        .route(endpoints::SIGNOUT, post(routes::auth::sign_out))
        .route(
            endpoints::GET_USER,
            get(routes::auth::get_user).post(routes::auth::get_user),
        );
    for kind in FormKind::ALL {
        protected = submission_routes(protected, kind);
    }
    let protected = protected.route_layer(axum_mw::from_fn_with_state(
        state.clone(),
        middleware::auth::require_auth,
    ));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

/// Bind list/get/add/update/delete for one form kind.
fn submission_routes(router: Router<AppState>, kind: FormKind) -> Router<AppState> {
    let [list, one, add, update, remove] = endpoints::route_patterns(kind);
    router
        .route(
            &list,
            get(move |State(state): State<AppState>, Extension(user): Extension<AuthUser>| {
                submissions::list_submissions(state, kind, user)
            }),
        )
        .route(
            &one,
            get(
                move |State(state): State<AppState>,
                      Extension(user): Extension<AuthUser>,
                      Path(id): Path<Uuid>| {
                    submissions::get_submission(state, kind, user, id)
                },
            ),
        )
        .route(
            &add,
            post(
                move |State(state): State<AppState>,
                      Extension(user): Extension<AuthUser>,
                      Json(body): Json<Value>| {
                    submissions::create_submission(state, kind, user, body)
                },
            ),
        )
        .route(
            &update,
            put(
                move |State(state): State<AppState>,
                      Extension(user): Extension<AuthUser>,
                      Path(id): Path<Uuid>,
                      Json(body): Json<Value>| {
                    submissions::update_submission(state, kind, user, id, body)
                },
            ),
        )
        .route(
            &remove,
            delete(
                move |State(state): State<AppState>,
                      Extension(user): Extension<AuthUser>,
                      Path(id): Path<Uuid>| {
                    submissions::delete_submission(state, kind, user, id)
                },
            ),
        )
}
