//! Submission gateway.
//!
//! [`SubmissionBackend`] is the seam between the dashboard/editor and the
//! network; [`HttpGateway`] implements it against the REST backend. Every
//! submission request carries the session's bearer token and user id, and
//! every response is checked against the form's declared shape before it is
//! handed back.

use std::future::Future;
use std::pin::Pin;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use safecare_core::endpoints::{self, USER_ID_HEADER};
use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use safecare_core::models::user::{AuthResponse, SignInRequest, SignUpRequest, UserProfile};
use safecare_forms::get_form;
use safecare_forms::validation::ShapeError;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{Session, SessionContext};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// CRUD over stored submissions of one user.
///
/// Methods return boxed futures for dyn compatibility.
pub trait SubmissionBackend: Send + Sync {
    /// All of the user's submissions of `kind`.
    fn list(&self, kind: FormKind) -> BoxFuture<'_, Result<Vec<Submission>, ClientError>>;

    fn fetch(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<Submission, ClientError>>;

    /// Store a new submission. The backend assigns its id and timestamps.
    fn create(
        &self,
        kind: FormKind,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>>;

    /// Overwrite the fields of an existing submission.
    fn update(
        &self,
        kind: FormKind,
        id: Uuid,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>>;

    fn delete(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<(), ClientError>>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// REST implementation of [`SubmissionBackend`], plus the account calls.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: ClientConfig,
    session: SessionContext,
}

impl HttpGateway {
    pub fn new(config: ClientConfig, session: SessionContext) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// App start: build the session store from the config and restore any
    /// persisted session before the first request.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let session = SessionContext::from_config(&config);
        if session.restore().await? {
            tracing::info!(api_url = %config.api_url, "resuming persisted session");
        }
        Self::new(config, session)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.config.url(endpoints::SIGNIN))
            .json(&body)
            .send()
            .await?;
        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ClientError::InvalidCredentials);
        }
        let auth: AuthResponse = parse_body(check_status(response).await?).await?;
        self.start_session(auth).await
    }

    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let body = SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.config.url(endpoints::SIGNUP))
            .json(&body)
            .send()
            .await?;
        let auth: AuthResponse = parse_body(check_status(response).await?).await?;
        self.start_session(auth).await
    }

    async fn start_session(&self, auth: AuthResponse) -> Result<UserProfile, ClientError> {
        let user = auth.user.clone();
        self.session
            .begin(Session {
                user: auth.user,
                access_token: auth.access_token,
            })
            .await?;
        Ok(user)
    }

    /// Revoke the token on the backend and end the local session. The local
    /// session ends even when the backend call fails.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self.authorized(Method::POST, endpoints::SIGNOUT).await?;
        let result = match request.send().await {
            Ok(response) => check_status(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        self.session.end().await?;
        result
    }

    /// The signed-in user's profile, as the backend knows it.
    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        let response = self.authorized(Method::POST, endpoints::GET_USER).await?.send().await?;
        parse_body(check_status(response).await?).await
    }

    /// Build a request carrying the session's credentials. Fails before any
    /// network I/O when nobody is signed in.
    async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session = self.session.require().await?;
        Ok(self
            .client
            .request(method, self.config.url(path))
            .bearer_auth(&session.access_token)
            .header(USER_ID_HEADER, session.user.id.to_string()))
    }

    async fn send_submission(&self, kind: FormKind, request: RequestBuilder) -> Result<Submission, ClientError> {
        let response = check_status(request.send().await?).await?;
        let body: Value = response.json().await?;
        Ok(get_form(kind).parse_submission(body)?)
    }

    async fn list_submissions(&self, kind: FormKind) -> Result<Vec<Submission>, ClientError> {
        let request = self.authorized(Method::GET, &endpoints::list(kind)).await?;
        let response = check_status(request.send().await?).await?;
        let Value::Array(items) = response.json::<Value>().await? else {
            return Err(ShapeError {
                path: String::new(),
                reason: "expected a list of submissions".to_string(),
            }
            .into());
        };
        let form = get_form(kind);
        let submissions = items
            .into_iter()
            .map(|item| form.parse_submission(item))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(form = %kind, count = submissions.len(), "submissions listed");
        Ok(submissions)
    }

    async fn fetch_submission(&self, kind: FormKind, id: Uuid) -> Result<Submission, ClientError> {
        let request = self.authorized(Method::GET, &endpoints::get(kind, id)).await?;
        self.send_submission(kind, request).await
    }

    async fn create_submission(
        &self,
        kind: FormKind,
        record: Map<String, Value>,
    ) -> Result<Submission, ClientError> {
        let request = self.authorized(Method::POST, &endpoints::add(kind)).await?.json(&record);
        let submission = self.send_submission(kind, request).await?;
        tracing::info!(form = %kind, submission_id = %submission.id, "submission created");
        Ok(submission)
    }

    async fn update_submission(
        &self,
        kind: FormKind,
        id: Uuid,
        record: Map<String, Value>,
    ) -> Result<Submission, ClientError> {
        let request = self
            .authorized(Method::PUT, &endpoints::update(kind, id))
            .await?
            .json(&record);
        let submission = self.send_submission(kind, request).await?;
        tracing::info!(form = %kind, submission_id = %id, "submission updated");
        Ok(submission)
    }

    async fn delete_submission(&self, kind: FormKind, id: Uuid) -> Result<(), ClientError> {
        let request = self.authorized(Method::DELETE, &endpoints::delete(kind, id)).await?;
        check_status(request.send().await?).await?;
        tracing::info!(form = %kind, submission_id = %id, "submission deleted");
        Ok(())
    }
}

impl SubmissionBackend for HttpGateway {
    fn list(&self, kind: FormKind) -> BoxFuture<'_, Result<Vec<Submission>, ClientError>> {
        Box::pin(self.list_submissions(kind))
    }

    fn fetch(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.fetch_submission(kind, id))
    }

    fn create(
        &self,
        kind: FormKind,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.create_submission(kind, record))
    }

    fn update(
        &self,
        kind: FormKind,
        id: Uuid,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.update_submission(kind, id, record))
    }

    fn delete(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(self.delete_submission(kind, id))
    }
}

/// Map non-success statuses onto the error taxonomy.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    tracing::warn!(status = status.as_u16(), message = %message, "backend request failed");
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

/// Decode a JSON body, reporting a malformed one as a shape error.
async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let value: Value = response.json().await?;
    serde_json::from_value(value).map_err(|e| {
        ShapeError {
            path: String::new(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Liveness check against the backend's `/health` endpoint.
pub async fn health(config: &ClientConfig) -> Result<bool, ClientError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let response = client.get(config.url(endpoints::HEALTH)).send().await?;
    let body: Value = check_status(response).await?.json().await?;
    Ok(body == json!({ "status": "ok" }))
}
