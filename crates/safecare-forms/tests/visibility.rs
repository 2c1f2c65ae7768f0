use safecare_core::schema::{Condition, FieldDef};
use safecare_forms::visibility::{self, Visibility};
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("fixture is an object")
}

fn review_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::choice("provider_reviewed", "Reviewed", &["Yes", "No"]),
        FieldDef::date("date_reviewed", "Date Reviewed")
            .visible_when(Condition::equals("provider_reviewed", "Yes")),
    ]
}

#[test]
fn unconditional_fields_are_always_visible() {
    let field = FieldDef::text("name", "Name");
    assert_eq!(
        visibility::evaluate(&field, &Map::new()),
        Visibility {
            visible: true,
            clear_on_hide: false
        }
    );
}

#[test]
fn conditional_field_follows_its_controller() {
    let fields = review_fields();
    let dependent = &fields[1];

    let shown = visibility::evaluate(dependent, &object(json!({ "provider_reviewed": "Yes" })));
    assert!(shown.visible);
    assert!(!shown.clear_on_hide);

    let hidden = visibility::evaluate(dependent, &object(json!({ "provider_reviewed": "No" })));
    assert!(!hidden.visible);
    assert!(hidden.clear_on_hide);

    let unanswered = visibility::evaluate(dependent, &object(json!({ "provider_reviewed": "" })));
    assert!(!unanswered.visible);
}

#[test]
fn apply_clears_hidden_values_and_reports_them() {
    let fields = review_fields();
    let mut record = object(json!({ "provider_reviewed": "No", "date_reviewed": "2024-01-02" }));

    let cleared = visibility::apply(&fields, &mut record);

    assert_eq!(cleared, vec!["date_reviewed".to_string()]);
    assert!(record["date_reviewed"].is_null());

    // Already-null fields are not reported again.
    assert!(visibility::apply(&fields, &mut record).is_empty());
}

#[test]
fn apply_keeps_visible_values() {
    let fields = review_fields();
    let mut record = object(json!({ "provider_reviewed": "Yes", "date_reviewed": "2024-01-02" }));
    assert!(visibility::apply(&fields, &mut record).is_empty());
    assert_eq!(record["date_reviewed"], "2024-01-02");
}

#[test]
fn apply_descends_into_sections_and_list_entries() {
    let fields = vec![
        FieldDef::section(
            "alcohol",
            "Alcohol",
            vec![
                FieldDef::choice("ever_used", "Ever Used", &["Yes", "No"]),
                FieldDef::date("date_last_used", "Date Last Used")
                    .visible_when(Condition::equals("ever_used", "Yes")),
            ],
        ),
        FieldDef::list("tests", "Tests", review_fields()),
    ];
    let mut record = object(json!({
        "alcohol": { "ever_used": "No", "date_last_used": "2023-05-05" },
        "tests": [
            { "provider_reviewed": "Yes", "date_reviewed": "2024-01-01" },
            { "provider_reviewed": "No", "date_reviewed": "2024-02-02" },
        ],
    }));

    let cleared = visibility::apply(&fields, &mut record);

    assert_eq!(cleared, vec!["alcohol.date_last_used", "tests.1.date_reviewed"]);
    assert!(record["alcohol"]["date_last_used"].is_null());
    assert_eq!(record["tests"][0]["date_reviewed"], "2024-01-01");
    assert!(record["tests"][1]["date_reviewed"].is_null());
}

#[test]
fn apply_settles_chained_conditions() {
    let fields = vec![
        FieldDef::choice("a", "A", &["on", "off"]),
        FieldDef::choice("b", "B", &["on", "off"]).visible_when(Condition::equals("a", "on")),
        FieldDef::text("c", "C").visible_when(Condition::equals("b", "on")),
    ];
    let mut record = object(json!({ "a": "off", "b": "on", "c": "kept?" }));

    let cleared = visibility::apply(&fields, &mut record);

    assert_eq!(cleared, vec!["b", "c"]);
    assert!(record["b"].is_null());
    assert!(record["c"].is_null());
}

#[test]
fn visibility_map_lists_every_reachable_path() {
    let fields = vec![FieldDef::list("tests", "Tests", review_fields())];
    let record = object(json!({
        "tests": [
            { "provider_reviewed": "Yes", "date_reviewed": "" },
            { "provider_reviewed": "No", "date_reviewed": null },
        ],
    }));

    let map = visibility::visibility_map(&fields, &record);

    assert_eq!(map.get("tests"), Some(&true));
    assert_eq!(map.get("tests.0.date_reviewed"), Some(&true));
    assert_eq!(map.get("tests.1.date_reviewed"), Some(&false));
    assert_eq!(map.get("tests.1.provider_reviewed"), Some(&true));
}
