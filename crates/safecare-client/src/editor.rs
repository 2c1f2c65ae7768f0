//! Form editor: one form state bound to a backend.
//!
//! Opening an existing submission fetches it once and populates the state;
//! submitting validates first and only then creates or updates.

use std::sync::Arc;

use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use safecare_forms::state::{FormState, SubmitMode};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ClientError;
use crate::gateway::SubmissionBackend;
use crate::notify::Notifications;

pub struct FormEditor {
    backend: Arc<dyn SubmissionBackend>,
    notifications: Notifications,
    state: FormState,
    /// Submission to load, for editors opened on an existing record.
    target: Option<Uuid>,
    fetched: bool,
}

impl FormEditor {
    /// A blank editor that creates a new submission on submit.
    pub fn open_new(
        kind: FormKind,
        backend: Arc<dyn SubmissionBackend>,
        notifications: Notifications,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            backend,
            notifications,
            state: FormState::new(kind)?,
            target: None,
            fetched: false,
        })
    }

    /// An editor on a stored submission, loaded immediately.
    pub async fn open_existing(
        kind: FormKind,
        id: Uuid,
        backend: Arc<dyn SubmissionBackend>,
        notifications: Notifications,
    ) -> Result<Self, ClientError> {
        let mut editor = Self::open_new(kind, backend, notifications)?;
        editor.target = Some(id);
        editor.load().await?;
        Ok(editor)
    }

    /// Fetch the target submission if it has not been fetched yet. Once it
    /// has, this does nothing. A failed fetch is reported and may be retried.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let Some(id) = self.target else {
            return Ok(());
        };
        if self.fetched {
            return Ok(());
        }
        let kind = self.kind();
        let loaded = match self.backend.fetch(kind, id).await {
            Ok(submission) => FormState::from_submission(kind, &submission).map_err(ClientError::from),
            Err(e) => Err(e),
        };
        match loaded {
            Ok(state) => {
                self.state = state;
                self.fetched = true;
                tracing::debug!(form = %kind, submission_id = %id, "submission loaded into editor");
                Ok(())
            }
            Err(e) => {
                self.notifications.report(&e).await;
                Err(e)
            }
        }
    }

    pub fn kind(&self) -> FormKind {
        self.state.kind()
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn mode(&self) -> SubmitMode {
        self.state.mode()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Set a field. Returns the paths cleared because they became hidden.
    pub fn set(&mut self, path: &str, value: Value) -> Result<Vec<String>, ClientError> {
        Ok(self.state.set(path, value)?)
    }

    pub fn append_entry(&mut self, group: &str) -> Result<u64, ClientError> {
        Ok(self.state.append_entry(group)?)
    }

    pub fn remove_entry(&mut self, group: &str, index: usize) -> Result<Map<String, Value>, ClientError> {
        Ok(self.state.remove_entry(group, index)?)
    }

    /// Validate and save. Field errors come back as
    /// [`ClientError::Validation`] without any request being made. On any
    /// failure the form contents are left as they were.
    pub async fn submit(&mut self) -> Result<Submission, ClientError> {
        self.load().await?;

        let payload = match self.state.prepare_submit() {
            Ok(payload) => payload,
            Err(e) => {
                let e = ClientError::from(e);
                self.notifications.report(&e).await;
                return Err(e);
            }
        };

        let kind = self.kind();
        let (result, verb) = match self.state.mode() {
            SubmitMode::Create => (self.backend.create(kind, payload).await, "added"),
            SubmitMode::Update(id) => (self.backend.update(kind, id, payload).await, "updated"),
        };

        match result {
            Ok(saved) => {
                self.state.mark_saved(&saved);
                self.target = Some(saved.id);
                self.fetched = true;
                self.notifications
                    .success(format!("{} {verb} successfully!", self.state.form().name()))
                    .await;
                Ok(saved)
            }
            Err(e) => {
                self.notifications.report(&e).await;
                Err(e)
            }
        }
    }
}
