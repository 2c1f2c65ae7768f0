use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::{Condition, FieldDef};

use super::YES_NO;
use crate::IntakeForm;

pub struct DrugScreeningResults;

impl IntakeForm for DrugScreeningResults {
    fn kind(&self) -> FormKind {
        FormKind::DrugScreeningResults
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::list(
                    "tests",
                    "Tests",
                    vec![
                        FieldDef::text("test_ordered", "Test Ordered"),
                        FieldDef::date("date_collected", "Date Collected"),
                        FieldDef::text("provider", "Provider"),
                        FieldDef::text("provider_location", "Provider Location"),
                        FieldDef::choice("results", "Results", &["Positive", "Negative"]),
                        FieldDef::text("specify_results", "Specify Results").optional(),
                        FieldDef::choice("provider_reviewed", "Reviewed with Provider", YES_NO),
                        FieldDef::date("date_reviewed", "Date Reviewed")
                            .visible_when(Condition::equals("provider_reviewed", "Yes")),
                    ],
                )
                .initial_entries(1),
            ]
        });
        &FIELDS
    }
}
