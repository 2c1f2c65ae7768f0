//! Dashboard aggregator.
//!
//! One [`FormSelector`] per form kind lists the user's prior submissions,
//! tracks which one is active and routes to the editor. A selector fetches
//! its list the first time it is expanded and never again on its own; only
//! a delete triggers a reload.

use std::collections::BTreeMap;
use std::sync::Arc;

use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use uuid::Uuid;

use crate::error::ClientError;
use crate::gateway::SubmissionBackend;
use crate::notify::Notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// Never expanded, or the last fetch failed.
    Unopened,
    Loading,
    Empty,
    Populated,
}

#[derive(Debug)]
pub struct FormSelector {
    kind: FormKind,
    state: SelectorState,
    /// Sorted by `date_created`, oldest first.
    submissions: Vec<Submission>,
    active: Option<Uuid>,
}

impl FormSelector {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            state: SelectorState::Unopened,
            submissions: Vec::new(),
            active: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active
    }

    pub fn active(&self) -> Option<&Submission> {
        let id = self.active?;
        self.submissions.iter().find(|s| s.id == id)
    }

    /// Fetch the list on first expansion. Later calls do nothing. A failed
    /// fetch leaves the selector unopened so the user can try again.
    pub async fn expand(&mut self, backend: &dyn SubmissionBackend) -> Result<(), ClientError> {
        if self.state != SelectorState::Unopened {
            return Ok(());
        }
        self.reload(backend).await
    }

    /// Make a cached submission the active one. No network call.
    pub fn select(&mut self, id: Uuid) -> Result<(), ClientError> {
        if !self.submissions.iter().any(|s| s.id == id) {
            return Err(ClientError::NotFound(format!(
                "{} {id} is not listed",
                self.kind.display_name()
            )));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Delete the active submission, reload the list and select the newest
    /// remaining entry.
    pub async fn delete_active(&mut self, backend: &dyn SubmissionBackend) -> Result<(), ClientError> {
        let id = self
            .active
            .ok_or_else(|| ClientError::NotFound(format!("no active {}", self.kind.display_name())))?;
        backend.delete(self.kind, id).await?;
        tracing::info!(form = %self.kind, submission_id = %id, "deleted from dashboard");
        self.reload(backend).await
    }

    /// Editor route for the active submission.
    pub fn edit_path(&self) -> Option<String> {
        self.active.map(|id| format!("{}/{id}", self.kind.route()))
    }

    /// Editor route for a new submission.
    pub fn new_path(&self) -> &'static str {
        self.kind.route()
    }

    async fn reload(&mut self, backend: &dyn SubmissionBackend) -> Result<(), ClientError> {
        self.state = SelectorState::Loading;
        match backend.list(self.kind).await {
            Ok(submissions) => {
                self.populate(submissions);
                Ok(())
            }
            Err(e) => {
                self.state = SelectorState::Unopened;
                self.submissions.clear();
                self.active = None;
                Err(e)
            }
        }
    }

    fn populate(&mut self, mut submissions: Vec<Submission>) {
        submissions.sort_by_key(|s| s.date_created);
        self.active = submissions.last().map(|s| s.id);
        self.state = if submissions.is_empty() {
            SelectorState::Empty
        } else {
            SelectorState::Populated
        };
        tracing::debug!(form = %self.kind, count = submissions.len(), "selector populated");
        self.submissions = submissions;
    }
}

/// Every form's selector, in catalogue order, bound to one backend.
/// Failures are posted to the notification slot before being returned.
pub struct Dashboard {
    backend: Arc<dyn SubmissionBackend>,
    notifications: Notifications,
    selectors: BTreeMap<FormKind, FormSelector>,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn SubmissionBackend>, notifications: Notifications) -> Self {
        let selectors = FormKind::ALL
            .into_iter()
            .map(|kind| (kind, FormSelector::new(kind)))
            .collect();
        Self {
            backend,
            notifications,
            selectors,
        }
    }

    /// Selectors in catalogue order.
    pub fn selectors(&self) -> impl Iterator<Item = &FormSelector> {
        self.selectors.values()
    }

    pub fn selector(&self, kind: FormKind) -> &FormSelector {
        &self.selectors[&kind]
    }

    pub async fn expand(&mut self, kind: FormKind) -> Result<(), ClientError> {
        let backend = Arc::clone(&self.backend);
        let result = self.selector_mut(kind).expand(backend.as_ref()).await;
        self.surface(result).await
    }

    pub fn select(&mut self, kind: FormKind, id: Uuid) -> Result<(), ClientError> {
        self.selector_mut(kind).select(id)
    }

    pub async fn delete_active(&mut self, kind: FormKind) -> Result<(), ClientError> {
        let backend = Arc::clone(&self.backend);
        let result = self.selector_mut(kind).delete_active(backend.as_ref()).await;
        self.surface(result).await
    }

    fn selector_mut(&mut self, kind: FormKind) -> &mut FormSelector {
        self.selectors.entry(kind).or_insert_with(|| FormSelector::new(kind))
    }

    async fn surface(&self, result: Result<(), ClientError>) -> Result<(), ClientError> {
        if let Err(e) = &result {
            self.notifications.report(e).await;
        }
        result
    }
}
