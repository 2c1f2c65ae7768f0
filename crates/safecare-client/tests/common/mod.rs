//! In-memory backend used by the dashboard and editor tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use safecare_client::error::ClientError;
use safecare_client::gateway::{BoxFuture, SubmissionBackend};
use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use serde_json::{Map, Value, json};
use uuid::Uuid;

#[derive(Default)]
pub struct FakeBackend {
    pub records: Mutex<BTreeMap<(FormKind, Uuid), Submission>>,
    pub user_id: Uuid,
    pub list_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    /// Every create/update payload, in call order.
    pub writes: Mutex<Vec<(FormKind, Option<Uuid>, Map<String, Value>)>>,
    pub fail: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    /// Store a submission created `seconds` after the epoch.
    pub fn seed(&self, kind: FormKind, seconds: i64, fields: Value) -> Submission {
        let fields = fields.as_object().cloned().expect("fixture is an object");
        let mut submission = Submission::new(self.user_id, fields);
        let created = jiff::Timestamp::from_second(seconds).expect("valid timestamp");
        submission.date_created = created;
        submission.date_last_modified = created;
        self.records
            .lock()
            .expect("lock")
            .insert((kind, submission.id), submission.clone());
        submission
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().expect("lock").len()
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 500,
                message: "backend down".to_string(),
            });
        }
        Ok(())
    }

    async fn list_records(&self, kind: FormKind) -> Result<Vec<Submission>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        // Newest first, so callers must sort.
        let mut list: Vec<Submission> = self
            .records
            .lock()
            .expect("lock")
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, s)| s.clone())
            .collect();
        list.sort_by_key(|s| std::cmp::Reverse(s.date_created));
        Ok(list)
    }

    async fn fetch_record(&self, kind: FormKind, id: Uuid) -> Result<Submission, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.records
            .lock()
            .expect("lock")
            .get(&(kind, id))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn create_record(&self, kind: FormKind, record: Map<String, Value>) -> Result<Submission, ClientError> {
        self.writes.lock().expect("lock").push((kind, None, record.clone()));
        self.check()?;
        let submission = Submission::new(self.user_id, record);
        self.records
            .lock()
            .expect("lock")
            .insert((kind, submission.id), submission.clone());
        Ok(submission)
    }

    async fn update_record(
        &self,
        kind: FormKind,
        id: Uuid,
        record: Map<String, Value>,
    ) -> Result<Submission, ClientError> {
        self.writes.lock().expect("lock").push((kind, Some(id), record.clone()));
        self.check()?;
        let mut records = self.records.lock().expect("lock");
        let submission = records
            .get_mut(&(kind, id))
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        submission.replace_fields(record);
        Ok(submission.clone())
    }

    async fn delete_record(&self, kind: FormKind, id: Uuid) -> Result<(), ClientError> {
        self.check()?;
        self.records
            .lock()
            .expect("lock")
            .remove(&(kind, id))
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }
}

impl SubmissionBackend for FakeBackend {
    fn list(&self, kind: FormKind) -> BoxFuture<'_, Result<Vec<Submission>, ClientError>> {
        Box::pin(self.list_records(kind))
    }

    fn fetch(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.fetch_record(kind, id))
    }

    fn create(
        &self,
        kind: FormKind,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.create_record(kind, record))
    }

    fn update(
        &self,
        kind: FormKind,
        id: Uuid,
        record: Map<String, Value>,
    ) -> BoxFuture<'_, Result<Submission, ClientError>> {
        Box::pin(self.update_record(kind, id, record))
    }

    fn delete(&self, kind: FormKind, id: Uuid) -> BoxFuture<'_, Result<(), ClientError>> {
        Box::pin(self.delete_record(kind, id))
    }
}

pub fn relapse_plan(caregiver: &str) -> Value {
    json!({
        "three_things_that_trigger_desire_to_use": "Stress, old friends, paydays",
        "three_skills_you_enjoy": "Knitting, running, cooking",
        "three_people_to_talk_to": "Sam, Alex, Pat",
        "safe_caregivers": [
            { "name": caregiver, "contact_number": "555-0100", "relationship": "Sister" }
        ],
        "have_naloxone": "Yes",
        "comments": null,
    })
}

pub fn screening(reviewed: &str, date_reviewed: Value) -> Value {
    json!({
        "tests": [{
            "test_ordered": "Urine panel",
            "date_collected": "2024-04-01",
            "provider": "Dr. Reyes",
            "provider_location": "County Clinic",
            "results": "Negative",
            "specify_results": null,
            "provider_reviewed": reviewed,
            "date_reviewed": date_reviewed,
        }]
    })
}
