use serde::{Deserialize, Serialize};

use crate::profile::model::Profile;

/// Required fields, in the order the profile form shows them.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "age",
    "location",
    "graduationStatus",
    "skills",
    "languages",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub complete: bool,
    pub has_profile: bool,
    pub missing_fields: Vec<String>,
}

/// Names the required fields that are absent or blank.
/// With no profile held, every required field is missing.
pub fn missing_fields(profile: Option<&Profile>) -> Vec<&'static str> {
    let Some(profile) = profile else {
        return REQUIRED_FIELDS.to_vec();
    };

    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match *field {
            "name" => profile.name.trim().is_empty(),
            "age" => profile.age == 0,
            "location" => profile.location.trim().is_empty(),
            // Always a vocabulary member once typed.
            "graduationStatus" => false,
            "skills" => profile.skills.is_empty(),
            "languages" => profile.languages.is_empty(),
            _ => false,
        })
        .collect()
}

/// The completeness gate consulted before any generation call.
pub fn is_complete(profile: Option<&Profile>) -> bool {
    profile.is_some() && missing_fields(profile).is_empty()
}

pub fn compute_completeness_report(profile: Option<&Profile>) -> CompletenessReport {
    let missing = missing_fields(profile);
    CompletenessReport {
        complete: is_complete(profile),
        has_profile: profile.is_some(),
        missing_fields: missing.into_iter().map(String::from).collect(),
    }
}
