use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The intake forms that make up a Plan of Safe Care, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormKind {
    MaternalDemographics,
    MaternalMedicalHistory,
    PsychiatricHistory,
    SubstanceUseHistory,
    MedicalServicesForSubstanceUse,
    DrugScreeningResults,
    FamilyAndSupports,
    InfantInformation,
    ReferralsAndServices,
    RelapsePreventionPlan,
}

impl FormKind {
    pub const ALL: [FormKind; 10] = [
        FormKind::MaternalDemographics,
        FormKind::MaternalMedicalHistory,
        FormKind::PsychiatricHistory,
        FormKind::SubstanceUseHistory,
        FormKind::MedicalServicesForSubstanceUse,
        FormKind::DrugScreeningResults,
        FormKind::FamilyAndSupports,
        FormKind::InfantInformation,
        FormKind::ReferralsAndServices,
        FormKind::RelapsePreventionPlan,
    ];

    /// Identifier used in REST paths and storage keys
    /// (e.g. `get_drug_screening_results`).
    pub fn slug(&self) -> &'static str {
        match self {
            FormKind::MaternalDemographics => "maternal_demographics",
            FormKind::MaternalMedicalHistory => "maternal_medical_history",
            FormKind::PsychiatricHistory => "psychiatric_history",
            FormKind::SubstanceUseHistory => "substance_use_history",
            FormKind::MedicalServicesForSubstanceUse => "medical_services_for_substance_use",
            FormKind::DrugScreeningResults => "drug_screening_results",
            FormKind::FamilyAndSupports => "family_and_supports",
            FormKind::InfantInformation => "infant_information",
            FormKind::ReferralsAndServices => "referrals_and_services",
            FormKind::RelapsePreventionPlan => "relapse_prevention_plan",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FormKind::MaternalDemographics => "Maternal Demographics",
            FormKind::MaternalMedicalHistory => "Maternal Medical History",
            FormKind::PsychiatricHistory => "Psychiatric History",
            FormKind::SubstanceUseHistory => "Substance Use History",
            FormKind::MedicalServicesForSubstanceUse => "Medical Services For Substance Use",
            FormKind::DrugScreeningResults => "Drug Screening Results",
            FormKind::FamilyAndSupports => "Family & Supports",
            FormKind::InfantInformation => "Infant Information",
            FormKind::ReferralsAndServices => "Referrals and Services",
            FormKind::RelapsePreventionPlan => "Relapse Prevention Plan",
        }
    }

    /// Frontend route of the form editor. An existing submission is edited
    /// at `<route>/<id>`.
    pub fn route(&self) -> &'static str {
        match self {
            FormKind::MaternalDemographics => "/maternal-demographics",
            FormKind::MaternalMedicalHistory => "/maternal-medical-history",
            FormKind::PsychiatricHistory => "/psychiatric-history",
            FormKind::SubstanceUseHistory => "/substance-use-history",
            FormKind::MedicalServicesForSubstanceUse => "/medical-services-for-substance-use",
            FormKind::DrugScreeningResults => "/drug-screening-results",
            FormKind::FamilyAndSupports => "/family-and-supports",
            FormKind::InfantInformation => "/infant-information",
            FormKind::ReferralsAndServices => "/referrals-and-services",
            FormKind::RelapsePreventionPlan => "/relapse-prevention-plan",
        }
    }

    pub fn from_slug(slug: &str) -> Option<FormKind> {
        FormKind::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FormKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::from_slug(s).ok_or_else(|| CoreError::UnknownForm(s.to_string()))
    }
}
