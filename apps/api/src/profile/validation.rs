//! Profile validation: raw form input in, typed `Profile` or every field
//! error out. Fields are independent; there are no cross-field rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::model::{GraduationStatus, Profile, ProfileUpdate};
use crate::profile::normalize::{
    is_malformed_list, normalize_category, normalize_items, normalize_list, read_number,
    read_text, RawList, RawProfileForm, RawScalar,
};

pub const MIN_AGE: f64 = 14.0;
pub const MAX_AGE: f64 = 100.0;
pub const MAX_MARKS: f64 = 100.0;
pub const MAX_CONFIDENCE: f64 = 100.0;

/// One failed constraint, tagged with the camelCase field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field error found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, field: &str, messages: Vec<&'static str>) {
        for message in messages {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg(test)]
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.messages_for(field).next().is_some()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

// ────────────────────────────────────────────────────────────────────────────
// Range checks. Each returns every violated message, in declaration order.
// ────────────────────────────────────────────────────────────────────────────

pub fn check_age(age: f64) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if age < MIN_AGE {
        messages.push("Age must be at least 14");
    }
    if age > MAX_AGE {
        messages.push("Age must be at most 100");
    }
    if age <= 0.0 {
        messages.push("Age must be positive");
    }
    if age.fract() != 0.0 {
        messages.push("Age must be a whole number");
    }
    messages
}

pub fn check_marks(marks: f64) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if marks < 0.0 {
        messages.push("Marks must be non-negative");
    }
    if marks > MAX_MARKS {
        messages.push("Marks cannot exceed 100");
    }
    messages
}

pub fn check_points(points: f64) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if points.fract() != 0.0 {
        messages.push("Points must be a whole number");
    }
    if points < 0.0 {
        messages.push("Points must be non-negative");
    }
    if points > u32::MAX as f64 {
        messages.push("Points value is too large");
    }
    messages
}

pub fn check_confidence(score: f64) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if score < 0.0 {
        messages.push("Confidence score must be non-negative");
    }
    if score > MAX_CONFIDENCE {
        messages.push("Confidence score cannot exceed 100");
    }
    messages
}

// ────────────────────────────────────────────────────────────────────────────
// Full form validation
// ────────────────────────────────────────────────────────────────────────────

/// Validates and normalizes a submitted profile form.
///
/// Never injects defaults for `points` or `confidenceScore`; the session
/// store does that when the profile is stored.
pub fn validate_profile(form: &RawProfileForm) -> Result<Profile, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = required_text(&mut errors, "name", "Name", form.name.as_ref());
    let location = required_text(&mut errors, "location", "Location", form.location.as_ref());

    let age = match read_number(form.age.as_ref()) {
        Ok(None) => {
            errors.push("age", "Age is required");
            None
        }
        Err(_) => {
            errors.push("age", "Age must be a number");
            None
        }
        Ok(Some(value)) => checked(&mut errors, "age", value, check_age).map(|v| v as u8),
    };

    let tenth_marks = optional_number(
        &mut errors,
        "tenthMarks",
        "Marks",
        form.tenth_marks.as_ref(),
        check_marks,
    );
    let twelfth_marks = optional_number(
        &mut errors,
        "twelfthMarks",
        "Marks",
        form.twelfth_marks.as_ref(),
        check_marks,
    );

    let graduation_status = match read_text(form.graduation_status.as_ref()) {
        Ok(None) => {
            errors.push("graduationStatus", "Graduation status is required");
            None
        }
        Err(_) => {
            errors.push("graduationStatus", "Graduation status must be text");
            None
        }
        Ok(Some(value)) => {
            let status = GraduationStatus::parse(&value);
            if status.is_none() {
                errors.push(
                    "graduationStatus",
                    format!(
                        "Graduation status must be one of: {}",
                        GraduationStatus::ALL.map(|s| s.as_str()).join(", ")
                    ),
                );
            }
            status
        }
    };

    let skills = required_list(
        &mut errors,
        "skills",
        "Skills",
        "At least one skill is required",
        form.skills.as_ref(),
    );
    let languages = required_list(
        &mut errors,
        "languages",
        "Languages",
        "At least one language is required",
        form.languages.as_ref(),
    );
    if is_malformed_list(form.projects.as_ref()) {
        errors.push("projects", "Projects must be a list or comma-separated text");
    }
    let projects = normalize_list(form.projects.as_ref());

    let category = match normalize_category(form.category.as_ref()) {
        Ok(category) => category,
        Err(rejected) => {
            errors.push(
                "category",
                format!("'{rejected}' is not a valid category (General, SC, ST, OBC, EWS)"),
            );
            None
        }
    };

    let points = optional_number(
        &mut errors,
        "points",
        "Points",
        form.points.as_ref(),
        check_points,
    )
    .map(|p| p as u32);
    let confidence_score = optional_number(
        &mut errors,
        "confidenceScore",
        "Confidence score",
        form.confidence_score.as_ref(),
        check_confidence,
    );

    match (name, age, location, graduation_status) {
        (Some(name), Some(age), Some(location), Some(graduation_status)) if errors.is_empty() => {
            Ok(Profile {
                name,
                age,
                location,
                tenth_marks,
                twelfth_marks,
                graduation_status,
                skills,
                languages,
                projects,
                category,
                points,
                confidence_score,
            })
        }
        _ => Err(errors),
    }
}

/// Validates a partial update before it is merged into the held profile.
///
/// Text is trimmed and list elements normalized. Lists are not required to be
/// non-empty here: an update may leave the profile incomplete.
pub fn validate_update(mut update: ProfileUpdate) -> Result<ProfileUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, label, value) in [
        ("name", "Name", update.name.as_mut()),
        ("location", "Location", update.location.as_mut()),
    ] {
        if let Some(text) = value {
            *text = text.trim().to_string();
            if text.is_empty() {
                errors.push(field, format!("{label} cannot be blank"));
            }
        }
    }

    if let Some(age) = update.age {
        errors.extend("age", check_age(age));
    }
    if let Some(Some(points)) = update.points {
        errors.extend("points", check_points(points));
    }
    if let Some(Some(marks)) = update.tenth_marks {
        errors.extend("tenthMarks", check_marks(marks));
    }
    if let Some(Some(marks)) = update.twelfth_marks {
        errors.extend("twelfthMarks", check_marks(marks));
    }
    if let Some(Some(score)) = update.confidence_score {
        errors.extend("confidenceScore", check_confidence(score));
    }

    for list in [
        update.skills.as_mut(),
        update.languages.as_mut(),
        update.projects.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
        *list = normalize_items(list.iter());
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    raw: Option<&RawScalar>,
) -> Option<String> {
    match read_text(raw) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            errors.push(field, format!("{label} is required"));
            None
        }
        Err(_) => {
            errors.push(field, format!("{label} must be text"));
            None
        }
    }
}

fn required_list(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    empty_message: &str,
    raw: Option<&RawList>,
) -> Vec<String> {
    if is_malformed_list(raw) {
        errors.push(field, format!("{label} must be a list or comma-separated text"));
        return Vec::new();
    }
    let items = normalize_list(raw);
    if items.is_empty() {
        errors.push(field, empty_message);
    }
    items
}

fn optional_number(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    raw: Option<&RawScalar>,
    check: fn(f64) -> Vec<&'static str>,
) -> Option<f64> {
    match read_number(raw) {
        Ok(None) => None,
        Ok(Some(value)) => checked(errors, field, value, check),
        Err(_) => {
            errors.push(field, format!("{label} must be a number"));
            None
        }
    }
}

fn checked(
    errors: &mut ValidationErrors,
    field: &str,
    value: f64,
    check: fn(f64) -> Vec<&'static str>,
) -> Option<f64> {
    let messages = check(value);
    if messages.is_empty() {
        Some(value)
    } else {
        errors.extend(field, messages);
        None
    }
}
