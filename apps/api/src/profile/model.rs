use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the user currently stands with graduation. Serialized with the
/// labels the profile form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraduationStatus {
    Completed,
    Pursuing,
    #[serde(rename = "Not Pursuing")]
    NotPursuing,
    #[serde(rename = "Planning to Pursue")]
    PlanningToPursue,
    #[serde(rename = "Dropped Out")]
    DroppedOut,
}

impl GraduationStatus {
    pub const ALL: [GraduationStatus; 5] = [
        GraduationStatus::Completed,
        GraduationStatus::Pursuing,
        GraduationStatus::NotPursuing,
        GraduationStatus::PlanningToPursue,
        GraduationStatus::DroppedOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraduationStatus::Completed => "Completed",
            GraduationStatus::Pursuing => "Pursuing",
            GraduationStatus::NotPursuing => "Not Pursuing",
            GraduationStatus::PlanningToPursue => "Planning to Pursue",
            GraduationStatus::DroppedOut => "Dropped Out",
        }
    }

    /// Exact match against the form vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for GraduationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation category, relevant for government schemes and scholarships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    General,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "OBC")]
    Obc,
    #[serde(rename = "EWS")]
    Ews,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Sc,
        Category::St,
        Category::Obc,
        Category::Ews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Sc => "SC",
            Category::St => "ST",
            Category::Obc => "OBC",
            Category::Ews => "EWS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated user profile that drives every personalised feature.
///
/// Only `validate_profile` constructs one from form input. `points` and
/// `confidence_score` stay `None` until the session store fills its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub location: String,
    pub tenth_marks: Option<f64>,
    pub twelfth_marks: Option<f64>,
    pub graduation_status: GraduationStatus,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    pub category: Option<Category>,
    pub points: Option<u32>,
    pub confidence_score: Option<f64>,
}

/// A partial profile update.
///
/// An omitted key leaves the field untouched. For optional fields an explicit
/// `null` clears the value back to absent. `age` and `points` arrive as plain
/// numbers so the range checks see out-of-width values; `validate_update`
/// must pass before `merged_with` narrows them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub location: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub tenth_marks: Option<Option<f64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub twelfth_marks: Option<Option<f64>>,
    pub graduation_status: Option<GraduationStatus>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub category: Option<Option<Category>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub points: Option<Option<f64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub confidence_score: Option<Option<f64>>,
}

impl ProfileUpdate {
    pub fn confidence_score(score: f64) -> Self {
        Self {
            confidence_score: Some(Some(score)),
            ..Self::default()
        }
    }
}

impl Profile {
    /// Shallow merge: every field present in `update` replaces the held one.
    pub fn merged_with(mut self, update: ProfileUpdate) -> Self {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age as u8;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(marks) = update.tenth_marks {
            self.tenth_marks = marks;
        }
        if let Some(marks) = update.twelfth_marks {
            self.twelfth_marks = marks;
        }
        if let Some(status) = update.graduation_status {
            self.graduation_status = status;
        }
        if let Some(skills) = update.skills {
            self.skills = skills;
        }
        if let Some(languages) = update.languages {
            self.languages = languages;
        }
        if let Some(projects) = update.projects {
            self.projects = projects;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(points) = update.points {
            self.points = points.map(|p| p as u32);
        }
        if let Some(score) = update.confidence_score {
            self.confidence_score = score;
        }
        self
    }
}
