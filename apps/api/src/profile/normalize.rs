//! Coercion rules for loosely typed form input.
//!
//! Each rule is a small pure function so the validator in `validation.rs`
//! can compose them field by field.

use serde::Deserialize;
use serde_json::Value;

use crate::profile::model::Category;

/// A single form value as the browser sends it: usually a string, sometimes
/// a JSON number when the client already parsed a numeric input.
///
/// Anything else lands in `Other` so the validator can report it against
/// its field instead of failing the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Text(String),
    Other(Value),
}

/// A list-shaped form value: either one comma-separated string or an array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawList {
    Joined(String),
    Items(Vec<RawScalar>),
    Other(Value),
}

/// Raw profile form body. Every field may be missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProfileForm {
    pub name: Option<RawScalar>,
    pub age: Option<RawScalar>,
    pub location: Option<RawScalar>,
    pub tenth_marks: Option<RawScalar>,
    pub twelfth_marks: Option<RawScalar>,
    pub graduation_status: Option<RawScalar>,
    pub skills: Option<RawList>,
    pub languages: Option<RawList>,
    pub projects: Option<RawList>,
    pub category: Option<RawScalar>,
    pub points: Option<RawScalar>,
    pub confidence_score: Option<RawScalar>,
}

/// Maps missing, `null` and blank strings to "no value provided".
pub fn blank_to_none(raw: Option<&RawScalar>) -> Option<&RawScalar> {
    match raw {
        Some(RawScalar::Text(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// Coerces a present value to a finite number. `None` means "not a number".
pub fn coerce_number(raw: &RawScalar) -> Option<f64> {
    let n = match raw {
        RawScalar::Number(n) => *n,
        RawScalar::Text(s) => s.trim().parse::<f64>().ok()?,
        RawScalar::Other(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// A value was provided but does not coerce to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotANumber;

/// Reads an optional numeric field. `Ok(None)` means no value was provided.
pub fn read_number(raw: Option<&RawScalar>) -> Result<Option<f64>, NotANumber> {
    match blank_to_none(raw) {
        None => Ok(None),
        Some(value) => coerce_number(value).map(Some).ok_or(NotANumber),
    }
}

/// A value was provided but is neither text nor a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotText;

/// Reads a text field, trimmed. Blank and missing both yield `Ok(None)`.
/// Numbers are accepted and rendered back to text.
pub fn read_text(raw: Option<&RawScalar>) -> Result<Option<String>, NotText> {
    match blank_to_none(raw) {
        None => Ok(None),
        Some(RawScalar::Text(s)) => Ok(Some(s.trim().to_string())),
        Some(RawScalar::Number(n)) => Ok(Some(scalar_to_string(*n))),
        Some(RawScalar::Other(_)) => Err(NotText),
    }
}

/// Splits comma-separated input, trims each piece and drops blank pieces.
pub fn split_list(input: &str) -> Vec<String> {
    normalize_items(input.split(','))
}

/// Trims every element and drops blanks, keeping the original order.
/// Duplicates are kept.
pub fn normalize_items<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Canonical normalization for every list-shaped field.
/// Non-scalar array elements are dropped; a non-list value yields nothing.
pub fn normalize_list(raw: Option<&RawList>) -> Vec<String> {
    match raw {
        None | Some(RawList::Other(_)) => Vec::new(),
        Some(RawList::Joined(s)) => split_list(s),
        Some(RawList::Items(items)) => normalize_items(items.iter().filter_map(|item| match item {
            RawScalar::Text(s) => Some(s.clone()),
            RawScalar::Number(n) => Some(scalar_to_string(*n)),
            RawScalar::Other(_) => None,
        })),
    }
}

/// True when a list field was sent as something other than text or an array.
pub fn is_malformed_list(raw: Option<&RawList>) -> bool {
    matches!(raw, Some(RawList::Other(_)))
}

/// Sentinel the category select sends for "no category".
pub const CATEGORY_NONE: &str = "none";

/// `""` and `"none"` map to absent before membership is checked.
/// Returns the rejected value when it is not a known category.
pub fn normalize_category(raw: Option<&RawScalar>) -> Result<Option<Category>, String> {
    let value = match blank_to_none(raw) {
        None => return Ok(None),
        Some(RawScalar::Text(s)) => s.trim(),
        Some(RawScalar::Number(n)) => return Err(scalar_to_string(*n)),
        Some(RawScalar::Other(v)) => return Err(v.to_string()),
    };
    if value == CATEGORY_NONE {
        return Ok(None);
    }
    Category::parse(value)
        .map(Some)
        .ok_or_else(|| value.to_string())
}

fn scalar_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
