use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::{Condition, FieldDef};

use super::YES_NO;
use crate::IntakeForm;

const DELIVERY_MODES: &[&str] = &["Vaginal", "Cesarean"];

/// Pregnancy, delivery and postpartum history with current medications.
pub struct MaternalMedicalHistory;

impl IntakeForm for MaternalMedicalHistory {
    fn kind(&self) -> FormKind {
        FormKind::MaternalMedicalHistory
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            let attended = || Condition::equals("attended_postpartum_visit", "Yes");

            vec![
                FieldDef::text("gestational_age", "Gestational Age"),
                FieldDef::date("anticipated_delivery_date", "Anticipated Delivery Date"),
                FieldDef::choice("planned_mode_delivery", "Planned Mode of Delivery", DELIVERY_MODES),
                FieldDef::choice("actual_mode_delivery", "Actual Mode of Delivery", DELIVERY_MODES),
                FieldDef::choice("attended_postpartum_visit", "Attended Postpartum Visit", YES_NO),
                FieldDef::text("postpartum_visit_location", "Postpartum Visit Location")
                    .visible_when(attended()),
                FieldDef::date("postpartum_visit_date", "Postpartum Visit Date").visible_when(attended()),
                FieldDef::text("total_num_pregnancies", "Total Number of Pregnancies"),
                FieldDef::text("total_num_live_births", "Number of Live Births"),
                FieldDef::text(
                    "total_num_children_with_mother",
                    "Number of Children Currently Living with Mother",
                ),
                FieldDef::text("prior_complications", "Complications During Prior Pregnancies").optional(),
                FieldDef::text("med_problems_diagnosis", "Medical Problems Requiring Ongoing Care"),
                FieldDef::list(
                    "current_medication_list",
                    "Current Medication List",
                    vec![
                        FieldDef::text("name", "Name"),
                        FieldDef::text("dose", "Dose"),
                        FieldDef::text("prescriber", "Prescriber"),
                        FieldDef::text("notes", "Notes"),
                    ],
                ),
                FieldDef::text("notes", "Notes").optional(),
            ]
        });
        &FIELDS
    }
}
