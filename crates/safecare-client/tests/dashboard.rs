//! Dashboard selectors: fetch-once expansion, default selection, deletes
//! and failure handling.

mod common;

use std::sync::Arc;

use common::{FakeBackend, relapse_plan, screening};
use safecare_client::dashboard::{Dashboard, FormSelector, SelectorState};
use safecare_client::error::{ClientError, GENERIC_ERROR};
use safecare_client::notify::{NoticeLevel, Notifications};
use safecare_core::models::form_kind::FormKind;
use serde_json::Value;

#[tokio::test]
async fn expand_selects_the_most_recently_created_submission() {
    let backend = FakeBackend::new();
    let older = backend.seed(FormKind::RelapsePreventionPlan, 1_700_000_000, relapse_plan("Ana"));
    let newest = backend.seed(FormKind::RelapsePreventionPlan, 1_700_000_500, relapse_plan("Lee"));
    let middle = backend.seed(FormKind::RelapsePreventionPlan, 1_700_000_200, relapse_plan("Kim"));

    let mut selector = FormSelector::new(FormKind::RelapsePreventionPlan);
    assert_eq!(selector.state(), SelectorState::Unopened);
    selector.expand(&backend).await.expect("expand should succeed");

    assert_eq!(selector.state(), SelectorState::Populated);
    assert_eq!(selector.active_id(), Some(newest.id));
    let order: Vec<_> = selector.submissions().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![older.id, middle.id, newest.id]);
    assert_eq!(
        selector.edit_path(),
        Some(format!("/relapse-prevention-plan/{}", newest.id))
    );
}

#[tokio::test]
async fn expand_fetches_only_once() {
    let backend = FakeBackend::new();
    let mut selector = FormSelector::new(FormKind::InfantInformation);

    selector.expand(&backend).await.expect("expand should succeed");
    selector.expand(&backend).await.expect("expand should succeed");

    assert_eq!(selector.state(), SelectorState::Empty);
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(selector.edit_path(), None);
    assert_eq!(selector.new_path(), "/infant-information");
}

#[tokio::test]
async fn select_swaps_the_active_submission_without_fetching() {
    let backend = FakeBackend::new();
    let first = backend.seed(FormKind::DrugScreeningResults, 100, screening("No", Value::Null));
    backend.seed(FormKind::DrugScreeningResults, 200, screening("No", Value::Null));

    let mut selector = FormSelector::new(FormKind::DrugScreeningResults);
    selector.expand(&backend).await.expect("expand should succeed");
    selector.select(first.id).expect("listed submission should be selectable");

    assert_eq!(selector.active().map(|s| s.id), Some(first.id));
    assert_eq!(backend.list_calls(), 1);
    assert!(matches!(
        selector.select(uuid::Uuid::new_v4()),
        Err(ClientError::NotFound(_))
    ));
    assert_eq!(selector.active_id(), Some(first.id));
}

#[tokio::test]
async fn deleting_the_only_submission_empties_the_selector() {
    let backend = FakeBackend::new();
    backend.seed(FormKind::DrugScreeningResults, 100, screening("No", Value::Null));

    let mut selector = FormSelector::new(FormKind::DrugScreeningResults);
    selector.expand(&backend).await.expect("expand should succeed");
    assert_eq!(selector.state(), SelectorState::Populated);

    selector.delete_active(&backend).await.expect("delete should succeed");

    assert_eq!(selector.state(), SelectorState::Empty);
    assert!(selector.submissions().is_empty());
    assert_eq!(selector.active_id(), None);
    assert_eq!(backend.list_calls(), 2);
}

#[tokio::test]
async fn delete_resets_selection_to_the_newest_remaining() {
    let backend = FakeBackend::new();
    let older = backend.seed(FormKind::RelapsePreventionPlan, 100, relapse_plan("Ana"));
    let middle = backend.seed(FormKind::RelapsePreventionPlan, 200, relapse_plan("Kim"));
    backend.seed(FormKind::RelapsePreventionPlan, 300, relapse_plan("Lee"));

    let mut selector = FormSelector::new(FormKind::RelapsePreventionPlan);
    selector.expand(&backend).await.expect("expand should succeed");
    selector.select(older.id).expect("select should succeed");

    selector.delete_active(&backend).await.expect("delete should succeed");

    assert_eq!(selector.submissions().len(), 2);
    assert_eq!(selector.active_id(), Some(selector.submissions()[1].id));
    assert_ne!(selector.active_id(), Some(middle.id));
}

#[tokio::test]
async fn failed_fetch_returns_to_unopened_without_retrying() {
    let backend = FakeBackend::new();
    backend.set_failing(true);

    let mut selector = FormSelector::new(FormKind::FamilyAndSupports);
    let err = selector.expand(&backend).await.expect_err("fetch should fail");
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert_eq!(selector.state(), SelectorState::Unopened);
    assert_eq!(backend.list_calls(), 1);

    backend.set_failing(false);
    selector.expand(&backend).await.expect("manual retry should succeed");
    assert_eq!(selector.state(), SelectorState::Empty);
    assert_eq!(backend.list_calls(), 2);
}

#[tokio::test]
async fn dashboard_reports_failures_to_the_notification_slot() {
    let backend = Arc::new(FakeBackend::new());
    backend.set_failing(true);
    let notifications = Notifications::new();
    let mut dashboard = Dashboard::new(backend.clone(), notifications.clone());

    assert!(dashboard.expand(FormKind::PsychiatricHistory).await.is_err());

    let notice = notifications.current().await.expect("a notice should be posted");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, GENERIC_ERROR);
    assert_eq!(
        dashboard.selector(FormKind::PsychiatricHistory).state(),
        SelectorState::Unopened
    );
}

#[tokio::test]
async fn dashboard_lists_every_form_in_catalogue_order() {
    let backend = Arc::new(FakeBackend::new());
    let mut dashboard = Dashboard::new(backend.clone(), Notifications::new());

    let kinds: Vec<_> = dashboard.selectors().map(FormSelector::kind).collect();
    assert_eq!(kinds, FormKind::ALL.to_vec());

    let seeded = backend.seed(FormKind::InfantInformation, 100, Value::Object(Default::default()));
    dashboard
        .expand(FormKind::InfantInformation)
        .await
        .expect("expand should succeed");
    dashboard
        .select(FormKind::InfantInformation, seeded.id)
        .expect("select should succeed");
    assert_eq!(
        dashboard.selector(FormKind::InfantInformation).active_id(),
        Some(seeded.id)
    );
    assert_eq!(
        dashboard.selector(FormKind::MaternalDemographics).state(),
        SelectorState::Unopened
    );
}
