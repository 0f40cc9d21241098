use chrono::{DateTime, Utc};

use crate::profile::completeness::{compute_completeness_report, is_complete, CompletenessReport};
use crate::profile::model::{Profile, ProfileUpdate};

pub const DEFAULT_POINTS: u32 = 0;
pub const DEFAULT_CONFIDENCE_SCORE: f64 = 0.0;

/// Holder of at most one profile for a single session.
///
/// Mutations are whole-value: the next profile is computed first and then
/// swapped in, so readers never see a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profile: Option<Profile>,
    updated_at: Option<DateTime<Utc>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Stores `profile` outright. `None` drops the held profile.
    pub fn replace(&mut self, profile: Option<Profile>) {
        self.profile = profile.map(with_defaults);
        self.updated_at = Some(Utc::now());
    }

    /// Shallow-merges `update` into the held profile.
    ///
    /// Returns `false` and changes nothing when no profile is held.
    pub fn merge(&mut self, update: ProfileUpdate) -> bool {
        let Some(current) = self.profile.take() else {
            return false;
        };
        self.profile = Some(with_defaults(current.merged_with(update)));
        self.updated_at = Some(Utc::now());
        true
    }

    /// Recomputed from the held profile on every call.
    pub fn is_complete(&self) -> bool {
        is_complete(self.profile.as_ref())
    }

    pub fn completeness(&self) -> CompletenessReport {
        compute_completeness_report(self.profile.as_ref())
    }
}

/// Fills `points` and `confidence_score` only when absent. A present value,
/// zero included, is kept.
pub fn with_defaults(mut profile: Profile) -> Profile {
    profile.points.get_or_insert(DEFAULT_POINTS);
    profile.confidence_score.get_or_insert(DEFAULT_CONFIDENCE_SCORE);
    profile
}
