//! The notification slot.
//!
//! One notice is shown at a time; posting a new one replaces the old.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Default)]
struct Slot {
    notice: Option<Notice>,
    sign_in_required: bool,
}

/// Shared handle to the notification slot. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    slot: Arc<Mutex<Slot>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Success, message.into()).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.post(NoticeLevel::Error, message.into()).await;
    }

    async fn post(&self, level: NoticeLevel, message: String) {
        let mut slot = self.slot.lock().await;
        if let Some(previous) = &slot.notice {
            tracing::debug!(replaced = %previous.message, "notice replaced");
        }
        slot.notice = Some(Notice { level, message });
    }

    /// Surface a failed action. Validation errors post nothing; they are
    /// shown inline. Authorization failures also flag that the user has to
    /// sign in again. Returns the notice that was posted.
    pub async fn report(&self, error: &ClientError) -> Option<Notice> {
        let message = error.user_message()?;
        tracing::warn!(error = %error, "action failed");
        let notice = Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
        };
        let mut slot = self.slot.lock().await;
        slot.notice = Some(notice.clone());
        if error.requires_sign_in() {
            slot.sign_in_required = true;
        }
        Some(notice)
    }

    pub async fn current(&self) -> Option<Notice> {
        self.slot.lock().await.notice.clone()
    }

    /// Remove and return the active notice.
    pub async fn dismiss(&self) -> Option<Notice> {
        self.slot.lock().await.notice.take()
    }

    pub async fn requires_sign_in(&self) -> bool {
        self.slot.lock().await.sign_in_required
    }

    /// Acknowledge a sign-in request, e.g. after routing to the sign-in
    /// screen. Returns whether one was pending.
    pub async fn take_sign_in_request(&self) -> bool {
        std::mem::take(&mut self.slot.lock().await.sign_in_required)
    }
}
