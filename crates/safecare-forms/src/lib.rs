//! safecare-forms
//!
//! The conditional dynamic form engine. Pure data and logic, no I/O:
//! definitions of every intake form, client-side validation, conditional
//! visibility with clear-on-hide, repeatable groups and per-form editing
//! state.

pub mod error;
pub mod forms;
pub mod groups;
pub mod path;
pub mod state;
pub mod validation;
pub mod visibility;

use safecare_core::models::form_kind::FormKind;
use safecare_core::models::submission::Submission;
use safecare_core::schema::{self, FieldDef};
use serde_json::{Map, Value};

use validation::{ShapeError, ValidationError};

/// Trait implemented by each intake form.
pub trait IntakeForm: Send + Sync {
    fn kind(&self) -> FormKind;

    /// Human-readable name (e.g., "Drug Screening Results").
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Top-level field definitions in display order.
    fn fields(&self) -> &[FieldDef];

    /// Values of a freshly opened, unsaved form.
    fn blank_record(&self) -> Map<String, Value> {
        schema::blank_record(self.fields())
    }

    /// Validate a record the way the form does before submitting.
    /// Hidden conditional fields are skipped.
    fn validate(&self, record: &Map<String, Value>) -> Vec<ValidationError> {
        validation::validate_record(self.fields(), record)
    }

    /// Check that a record has the structure this form declares: every
    /// field present, scalars as string or null, sections as objects,
    /// lists as arrays of objects. Required-ness is not checked.
    fn check_shape(&self, record: &Map<String, Value>) -> Result<(), ShapeError> {
        validation::check_shape(self.fields(), record)
    }

    /// Parse a stored submission returned by the backend, rejecting any
    /// response that does not match the declared shape.
    fn parse_submission(&self, value: Value) -> Result<Submission, ShapeError> {
        let submission = Submission::from_value(value).map_err(|e| ShapeError {
            path: String::new(),
            reason: e.to_string(),
        })?;
        self.check_shape(&submission.fields)?;
        Ok(submission)
    }
}

/// Return all intake forms in dashboard order.
pub fn all_forms() -> Vec<Box<dyn IntakeForm>> {
    FormKind::ALL.into_iter().map(get_form).collect()
}

/// Look up the definition of a form.
pub fn get_form(kind: FormKind) -> Box<dyn IntakeForm> {
    match kind {
        FormKind::MaternalDemographics => Box::new(forms::maternal_demographics::MaternalDemographics),
        FormKind::MaternalMedicalHistory => {
            Box::new(forms::maternal_medical_history::MaternalMedicalHistory)
        }
        FormKind::PsychiatricHistory => Box::new(forms::psychiatric_history::PsychiatricHistory),
        FormKind::SubstanceUseHistory => Box::new(forms::substance_use_history::SubstanceUseHistory),
        FormKind::MedicalServicesForSubstanceUse => {
            Box::new(forms::medical_services::MedicalServicesForSubstanceUse)
        }
        FormKind::DrugScreeningResults => Box::new(forms::drug_screening::DrugScreeningResults),
        FormKind::FamilyAndSupports => Box::new(forms::family_and_supports::FamilyAndSupports),
        FormKind::InfantInformation => Box::new(forms::infant_information::InfantInformation),
        FormKind::ReferralsAndServices => Box::new(forms::referrals::ReferralsAndServices),
        FormKind::RelapsePreventionPlan => Box::new(forms::relapse_prevention::RelapsePreventionPlan),
    }
}

/// Look up a form by its slug (e.g. "infant_information").
pub fn find_form(slug: &str) -> Option<Box<dyn IntakeForm>> {
    FormKind::from_slug(slug).map(get_form)
}
