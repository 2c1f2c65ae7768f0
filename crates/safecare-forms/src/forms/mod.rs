pub mod drug_screening;
pub mod family_and_supports;
pub mod infant_information;
pub mod maternal_demographics;
pub mod maternal_medical_history;
pub mod medical_services;
pub mod psychiatric_history;
pub mod referrals;
pub mod relapse_prevention;
pub mod substance_use_history;

pub const YES_NO: &[&str] = &["Yes", "No"];

pub const YES_NO_PENDING: &[&str] = &["Yes", "No", "Pending"];

pub const SCREENING_RESULT: &[&str] = &["Negative", "Not Completed", "Positive"];

pub const SERVICE_STATUS: &[&str] = &["Discussed", "Needed", "Referred", "Participating", "Completed"];
