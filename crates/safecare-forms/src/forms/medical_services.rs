use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::{Condition, FieldDef};

use crate::IntakeForm;

/// Medication-assisted treatment (MAT) and addiction medicine services.
pub struct MedicalServicesForSubstanceUse;

impl IntakeForm for MedicalServicesForSubstanceUse {
    fn kind(&self) -> FormKind {
        FormKind::MedicalServicesForSubstanceUse
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            let prior_mat = || Condition::equals("mat_engaged", "Prior MAT use");
            let prior_service = || Condition::equals("used_addiction_medicine_services", "Prior Use");

            vec![
                FieldDef::choice("mat_engaged", "MAT Engaged", &["Never", "Currently", "Prior MAT use"]),
                FieldDef::date("date_used_mat", "Date of Last MAT Use").visible_when(prior_mat()),
                FieldDef::list(
                    "medications",
                    "Medications",
                    vec![
                        FieldDef::text("medication", "Medication"),
                        FieldDef::text("dose", "Dose"),
                    ],
                ),
                FieldDef::text("mat_clinic_name", "MAT Clinic Name").visible_when(prior_mat()),
                FieldDef::text("mat_clinic_phone", "MAT Clinic Contact Information")
                    .visible_when(prior_mat()),
                FieldDef::choice(
                    "used_addiction_medicine_services",
                    "Addiction Medicine Services",
                    &["Never", "Currently", "Prior Use"],
                ),
                FieldDef::date("date_used_medicine_service", "Date of Last Medicine Service")
                    .visible_when(prior_service()),
                FieldDef::text("addiction_medicine_clinic", "Addiction Medicine Clinic")
                    .visible_when(prior_service()),
                FieldDef::text(
                    "addiction_medicine_clinic_phone",
                    "Addiction Medicine Clinic Contact Info",
                )
                .visible_when(prior_service()),
            ]
        });
        &FIELDS
    }
}
