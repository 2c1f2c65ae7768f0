use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;

use super::YES_NO;
use crate::IntakeForm;

pub struct PsychiatricHistory;

impl IntakeForm for PsychiatricHistory {
    fn kind(&self) -> FormKind {
        FormKind::PsychiatricHistory
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::list(
                    "diagnosis",
                    "Diagnosis",
                    vec![
                        FieldDef::text("diagnosis", "Diagnosis"),
                        FieldDef::text("provider", "Provider"),
                        FieldDef::text("phone_number", "Phone Number"),
                        FieldDef::date("date_of_diagnosis", "Date of Diagnosis"),
                        FieldDef::choice("taking_medication", "Taking Medication", YES_NO),
                    ],
                ),
                FieldDef::text("notes", "Notes").optional(),
            ]
        });
        &FIELDS
    }
}
