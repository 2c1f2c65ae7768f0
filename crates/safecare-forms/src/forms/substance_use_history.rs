use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::{Condition, FieldDef};

use super::YES_NO;
use crate::IntakeForm;

/// Lifetime and in-pregnancy use per substance, plus up to two others.
pub struct SubstanceUseHistory;

impl IntakeForm for SubstanceUseHistory {
    fn kind(&self) -> FormKind {
        FormKind::SubstanceUseHistory
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                substance("alcohol", "Alcohol"),
                substance("benzodiazepines", "Benzodiazepines"),
                substance("cocaine", "Cocaine"),
                substance("heroin", "Heroin"),
                substance("kush", "Kush"),
                substance("marijuana", "Marijuana"),
                substance("methamphetamine", "Methamphetamine"),
                substance("prescription_drugs", "Prescription Drugs"),
                substance("tobacco", "Tobacco"),
                FieldDef::list(
                    "other_drugs",
                    "Other",
                    vec![
                        FieldDef::text("drug_used", "Substance"),
                        FieldDef::choice("used_during_pregnancy", "Used During Pregnancy", YES_NO),
                        FieldDef::date("date_last_used", "Date Last Used"),
                        FieldDef::text("notes", "Notes"),
                    ],
                )
                .max_entries(2),
                FieldDef::text("notes", "Notes").optional(),
            ]
        });
        &FIELDS
    }
}

fn substance(name: &str, label: &str) -> FieldDef {
    FieldDef::section(
        name,
        label,
        vec![
            FieldDef::choice("ever_used", "Ever Used", YES_NO),
            FieldDef::choice("used_during_pregnancy", "Used During Pregnancy", YES_NO),
            FieldDef::date("date_last_used", "Date Last Used")
                .visible_when(Condition::equals("ever_used", "Yes")),
            FieldDef::text("notes", "Notes"),
        ],
    )
}
