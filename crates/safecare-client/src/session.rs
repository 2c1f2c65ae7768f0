//! Explicit session context.
//!
//! The signed-in user and their bearer token live in one shared handle that
//! is restored on start, filled on sign-in and cleared on sign-out. Clones
//! share the same session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use safecare_core::models::user::UserProfile;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<Mutex<Option<Session>>>,
    path: Option<PathBuf>,
}

impl SessionContext {
    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session persisted to `path` between runs.
    pub fn persisted(path: impl Into<PathBuf>) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            path: Some(path.into()),
        }
    }

    /// The session store the config asks for: persisted when it names a
    /// session file, in memory otherwise.
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.session_file {
            Some(path) => Self::persisted(path.clone()),
            None => Self::in_memory(),
        }
    }

    /// Load a previously persisted session. Returns whether one was found.
    /// An unreadable session file is discarded.
    pub async fn restore(&self) -> Result<bool, ClientError> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "session restored");
                *self.current.lock().await = Some(session);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable session file");
                remove_session_file(path).await?;
                Ok(false)
            }
        }
    }

    /// Start a session after sign-in or sign-up.
    pub async fn begin(&self, session: Session) -> Result<(), ClientError> {
        if let Some(path) = &self.path {
            save_session_file(path, &session).await?;
        }
        tracing::info!(user_id = %session.user.id, "session started");
        *self.current.lock().await = Some(session);
        Ok(())
    }

    /// End the session, in memory and on disk. Returns the session that was
    /// active, if any.
    pub async fn end(&self) -> Result<Option<Session>, ClientError> {
        let previous = self.current.lock().await.take();
        if let Some(path) = &self.path {
            remove_session_file(path).await?;
        }
        if let Some(session) = &previous {
            tracing::info!(user_id = %session.user.id, "session ended");
        }
        Ok(previous)
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.lock().await.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.current.lock().await.is_some()
    }

    /// The active session, or `Unauthorized` when nobody is signed in.
    pub async fn require(&self) -> Result<Session, ClientError> {
        self.current()
            .await
            .ok_or_else(|| ClientError::Unauthorized("no active session".to_string()))
    }
}

async fn save_session_file(path: &Path, session: &Session) -> Result<(), ClientError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir).await?;
    }
    let json = serde_json::to_vec_pretty(session)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json).await?;

    // The file holds a bearer token
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600)).await?;
    }

    tokio::fs::rename(&tmp_path, path).await?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

async fn remove_session_file(path: &Path) -> Result<(), ClientError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "session file deleted");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
