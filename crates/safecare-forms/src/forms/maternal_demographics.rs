use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;

use crate::IntakeForm;

/// Identifying, contact and insurance details of the mother.
pub struct MaternalDemographics;

impl IntakeForm for MaternalDemographics {
    fn kind(&self) -> FormKind {
        FormKind::MaternalDemographics
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::text("name", "Name"),
                FieldDef::date("date_of_birth", "Date of Birth"),
                FieldDef::choice(
                    "current_living_arrangement",
                    "Current Living Arrangement",
                    &[
                        "Rent/Own a Home",
                        "Living with Relatives or Friends",
                        "Residential Treatment Center",
                        "Correctional Facility",
                        "Emergency Shelter",
                        "Homeless",
                        "Other",
                    ],
                ),
                FieldDef::text("street_address", "Street Address"),
                FieldDef::text("city", "City"),
                FieldDef::text("state", "State"),
                FieldDef::text("zip_code", "Zip Code"),
                FieldDef::text("county", "County"),
                FieldDef::text("primary_phone_number", "Primary Phone Number"),
                FieldDef::choice("phone_type", "Phone Type", &["Mobile", "Home", "Other"]),
                FieldDef::text("emergency_contact", "Emergency Contact"),
                FieldDef::text("emergency_contact_phone", "Emergency Contact Phone Number"),
                FieldDef::text("relationship", "Relationship"),
                FieldDef::choice(
                    "marital_status",
                    "Marital Status",
                    &["Single", "Married", "Divorced", "Widowed", "Separated"],
                ),
                FieldDef::text("insurance_plan", "Insurance Plan"),
                FieldDef::date("effective_date", "Effective Date"),
                FieldDef::text("subscriber_id", "Subscriber ID"),
                FieldDef::text("group_id", "Group ID"),
            ]
        });
        &FIELDS
    }
}
