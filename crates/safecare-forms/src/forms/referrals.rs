use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;

use super::SERVICE_STATUS;
use crate::IntakeForm;

/// Referral status for every service category, grouped by area of need.
/// Each area also takes a free list of other services.
pub struct ReferralsAndServices;

impl IntakeForm for ReferralsAndServices {
    fn kind(&self) -> FormKind {
        FormKind::ReferralsAndServices
    }

    fn fields(&self) -> &[FieldDef] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDef>> = std::sync::LazyLock::new(|| {
            vec![
                // Support services
                service("parenting_classes", "Parenting Classes"),
                service("transportation_services", "Transportation Services"),
                service("ssi_disability", "SSI Disability"),
                service(
                    "temporary_assistance_for_needy_families",
                    "Temporary Assistance for Needy Families",
                ),
                service("personal_safety", "Personal Safety"),
                service("home_visitation_program", "Home Visitation Program"),
                service("housing_assistance", "Housing Assistance"),
                service("healthy_start_program", "Healthy Start Program"),
                other_services("support_services_other", "Support Services Other"),
                // Food and nutrition
                service("breastfeeding_support", "Breastfeeding Support"),
                service("local_food_pantries", "Local Food Pantries"),
                service("snap", "SNAP"),
                service("women_infants_children", "Women, Infants, and Children"),
                other_services("food_nutrition_other", "Food Nutrition Other"),
                // Healthcare
                service("health_insurance_enrollment", "Health Insurance Enrollment"),
                service("prenatal_healthcare", "Prenatal Healthcare"),
                service("family_planning", "Family Planning"),
                service("primary_care", "Primary Care"),
                service("mental_health_counseling", "Mental Health Counseling"),
                service("smoking_cessation", "Smoking Cessation"),
                other_services("healthcare_other", "Healthcare Other"),
                // Substance use treatment
                service("residential", "Residential"),
                service("outpatient", "Outpatient"),
                service("caring_for_two_program", "Caring for Two Program"),
                service("the_cradles_program", "The Cradles Program"),
                service("recovery_support_services", "Recovery Support Services"),
                service("medication_assisted_treatment", "Medication Assisted Treatment"),
                other_services("substance_use_treatment_other", "Substance Use Treatment Other"),
                // Child related
                service("early_childhood_intervention", "Early Childhood Intervention"),
                service("early_head_start", "Early Head Start"),
                service("NCI_childcare_subsidy", "NCI Childcare Subsidy"),
                service("pediatrician_primary_care", "Pediatrician Primary Care"),
                service("safe_sleep_education", "Safe Sleep Education"),
                other_services("child_related_other", "Child Related Other"),
                // Legal assistance
                service("child_protective_service", "Child Protective Service"),
                service("legal_aid", "Legal Aid"),
                service("specialty_court", "Specialty Court"),
                other_services("legal_assistance_other", "Legal Assistance Other"),
                FieldDef::text("additional_notes", "Additional Notes").optional(),
            ]
        });
        &FIELDS
    }
}

fn service_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::choice("service_status", "Service Status", SERVICE_STATUS),
        FieldDef::text("organization", "Organization"),
        FieldDef::text("organization_contact_information", "Organization Contact Information"),
    ]
}

fn service(name: &str, label: &str) -> FieldDef {
    FieldDef::section(name, label, service_fields())
}

fn other_services(name: &str, label: &str) -> FieldDef {
    let mut fields = vec![FieldDef::text("name", "Service Name")];
    fields.extend(service_fields());
    FieldDef::list(name, label, fields)
}
