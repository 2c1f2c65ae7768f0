use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;

use super::YES_NO;
use crate::IntakeForm;

pub struct RelapsePreventionPlan;

impl IntakeForm for RelapsePreventionPlan {
    fn kind(&self) -> FormKind {
        FormKind::RelapsePreventionPlan
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDef::text(
                    "three_things_that_trigger_desire_to_use",
                    "Three things that trigger your desire to use",
                ),
                FieldDef::text("three_skills_you_enjoy", "Three skills you enjoy"),
                FieldDef::text("three_people_to_talk_to", "Three people to talk to"),
                // At least one safe caregiver must always be listed.
                FieldDef::list(
                    "safe_caregivers",
                    "Safe Caregivers",
                    vec![
                        FieldDef::text("name", "Name"),
                        FieldDef::text("contact_number", "Contact Number"),
                        FieldDef::text("relationship", "Relationship"),
                    ],
                )
                .min_entries(1),
                FieldDef::choice("have_naloxone", "Have Naloxone", YES_NO),
                FieldDef::text("comments", "Comments").optional(),
            ]
        });
        &FIELDS
    }
}
