use safecare_core::schema::{Condition, FieldDef, FieldKind, blank_record};
use serde_json::json;

#[test]
fn condition_holds_only_for_matching_controller_value() {
    let condition = Condition::equals("ever_used", "Yes");
    let yes = json!({ "ever_used": "Yes" });
    let no = json!({ "ever_used": "No" });
    let null = json!({ "ever_used": null });

    assert!(condition.holds(yes.as_object().unwrap()));
    assert!(!condition.holds(no.as_object().unwrap()));
    assert!(!condition.holds(null.as_object().unwrap()));
    assert!(!condition.holds(json!({}).as_object().unwrap()));
}

#[test]
fn one_of_condition_accepts_any_listed_value() {
    let condition = Condition::one_of("mat_engaged", &["Currently", "Prior MAT use"]);
    assert!(condition.holds(json!({ "mat_engaged": "Currently" }).as_object().unwrap()));
    assert!(!condition.holds(json!({ "mat_engaged": "Never" }).as_object().unwrap()));
}

#[test]
fn min_entries_raises_initial_entries() {
    let field = FieldDef::list("safe_caregivers", "Safe Caregivers", vec![FieldDef::text("name", "Name")])
        .min_entries(1);
    match field.kind {
        FieldKind::List {
            min_entries,
            initial_entries,
            ..
        } => {
            assert_eq!(min_entries, 1);
            assert_eq!(initial_entries, 1);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn blank_record_builds_nested_defaults() {
    let fields = vec![
        FieldDef::text("name", "Name"),
        FieldDef::section(
            "alcohol",
            "Alcohol",
            vec![FieldDef::choice("ever_used", "Ever Used", &["Yes", "No"])],
        ),
        FieldDef::list("tests", "Tests", vec![FieldDef::date("date_collected", "Date Collected")])
            .initial_entries(1),
        FieldDef::list("medications", "Medications", vec![FieldDef::text("dose", "Dose")]),
    ];

    let record = blank_record(&fields);
    assert_eq!(
        serde_json::Value::Object(record),
        json!({
            "name": "",
            "alcohol": { "ever_used": "" },
            "tests": [{ "date_collected": "" }],
            "medications": [],
        })
    );
}
