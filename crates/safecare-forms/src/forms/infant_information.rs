use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::{Condition, FieldDef};

use super::{SCREENING_RESULT, YES_NO, YES_NO_PENDING};
use crate::IntakeForm;

/// Birth details, screening, care needs and father information for the infant.
pub struct InfantInformation;

impl IntakeForm for InfantInformation {
    fn kind(&self) -> FormKind {
        FormKind::InfantInformation
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::text("child_name", "Child's Name"),
                FieldDef::date("date_of_birth", "Date of Birth"),
                FieldDef::choice("sex", "Sex", &["Male", "Female"]),
                FieldDef::text("birth_weight", "Birth Weight"),
                FieldDef::text("gestational_age_at_birth", "Gestational Age at Birth"),
                FieldDef::choice("NICU_stay", "NICU", YES_NO),
                FieldDef::text("NICU_length_of_stay", "NICU Length of Stay")
                    .visible_when(Condition::equals("NICU_stay", "Yes")),
                FieldDef::text("pediatrician_name", "Pediatrician Name"),
                FieldDef::text("pediatrician_contact_info", "Pediatrician Contact Number"),
                FieldDef::choice(
                    "infant_urine_drug_screening_at_birth",
                    "Infant Urine Drug Screening at Birth",
                    SCREENING_RESULT,
                ),
                FieldDef::text(
                    "infant_urine_drug_screening_at_birth_specify",
                    "Specify Infant Urine Drug Screening at Birth",
                )
                .optional(),
                FieldDef::choice("meconium_results", "Meconium Results", SCREENING_RESULT),
                FieldDef::text("meconium_results_specify", "Specify Meconium Results").optional(),
                FieldDef::choice("neonatal_opiod_withdraw", "Neonatal Opiod Withdraw", YES_NO),
                FieldDef::text(
                    "neonatal_opiod_withdraw_treatment_method",
                    "Neonatal Opiod Withdraw Treatment Method",
                )
                .optional(),
                FieldDef::text(
                    "DX_problems_additional_information",
                    "DX/Problems and Additional Information",
                ),
                FieldDef::list("infant_care_needs_items", "Infant Care Needs", care_needs())
                    .min_entries(1)
                    .max_entries(1),
                FieldDef::choice(
                    "where_will_baby_sleep",
                    "Where Will Baby Sleep",
                    &["Crib/Bassinet", "Sharing a Bed With Others", "Other"],
                ),
                FieldDef::text("where_will_baby_sleep_specify", "Specify Where Baby Will Sleep").optional(),
                FieldDef::text(
                    "infant_care_needs_additional_notes",
                    "Infant Care Needs Additional Notes",
                )
                .optional(),
                FieldDef::list(
                    "infant_medications",
                    "Infant Medications",
                    vec![
                        FieldDef::text("medication", "Medication"),
                        FieldDef::text("dose", "Dose"),
                        FieldDef::text("prescriber", "Prescriber"),
                        FieldDef::text("notes", "Notes"),
                    ],
                )
                .initial_entries(1),
                FieldDef::text("infant_medication_notes", "Infant Medications Notes").optional(),
                FieldDef::text("father_name", "Father's Name"),
                FieldDef::date("father_date_of_birth", "Father's DOB"),
                FieldDef::text("father_street_address", "Father's Street Address"),
                FieldDef::text("father_city", "Father's City"),
                FieldDef::text("father_state", "Father's State"),
                FieldDef::text("father_zip_code", "Father's Zip Code"),
                FieldDef::text("father_primary_phone_numbers", "Father's Primary Phone Numbers"),
                FieldDef::choice(
                    "father_involved_in_babys_life",
                    "Father Involved in Baby's Life",
                    &["Yes", "No", "Unsure"],
                ),
                FieldDef::text(
                    "father_involved_in_babys_life_comments",
                    "Father Involved in Baby's Life Comments",
                )
                .optional(),
                FieldDef::text("father_notes", "Father Notes").optional(),
            ]
        });
        &FIELDS
    }
}

/// One checklist of items the household still needs for the baby.
fn care_needs() -> Vec<FieldDef> {
    let items = [
        ("breast_pump", "Breast Pump"),
        ("breastfeeding_support", "Breastfeeding Support"),
        ("car_seat", "Car Seat"),
        ("childcare", "Childcare"),
        ("clothing", "Clothing"),
        ("crib", "Crib"),
        ("diapers", "Diapers"),
        ("infant_formula", "Infant Formula"),
        ("infant_stroller", "Infant Stroller"),
    ];

    let mut fields = Vec::new();
    for (name, label) in items {
        fields.push(FieldDef::choice(name, label, YES_NO_PENDING));
        fields.push(FieldDef::text(&format!("{name}_notes"), &format!("{label} Notes")).optional());
    }
    fields.push(FieldDef::choice("other", "Other", YES_NO_PENDING).optional());
    fields.push(FieldDef::text("other_name", "Other Item").optional());
    fields.push(FieldDef::text("other_notes", "Other Notes").optional());
    fields
}
