use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;

use crate::IntakeForm;

/// Household members, children living elsewhere and the support system.
pub struct FamilyAndSupports;

impl IntakeForm for FamilyAndSupports {
    fn kind(&self) -> FormKind {
        FormKind::FamilyAndSupports
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::list(
                    "people_living_in_home",
                    "List of People Living in the Home",
                    vec![
                        FieldDef::text("person", "Household Member"),
                        FieldDef::date("date_of_birth", "Date of Birth"),
                        FieldDef::text("relation", "Relation"),
                    ],
                ),
                FieldDef::list(
                    "clients_children_not_living_in_home",
                    "List of Clients Children NOT Living in the Home",
                    vec![
                        FieldDef::text("name", "Child Name"),
                        FieldDef::date("date_of_birth", "Date of Birth"),
                        FieldDef::text("caregiver", "Caregiver"),
                        FieldDef::text("caregiver_number", "Caregiver Number"),
                    ],
                ),
                FieldDef::text("notes", "Notes").optional(),
                FieldDef::text("current_support_system", "Current Support System"),
                FieldDef::text(
                    "strength_of_client_and_support_system",
                    "Strengths of Client and Support System",
                ),
                FieldDef::text("goals", "Goals"),
            ]
        });
        &FIELDS
    }
}
