// Generation features: profile-derived inputs, typed outputs, and the
// pluggable `CareerGenerator` capability behind them.
// LLM calls go through llm_client only; the template backend makes none.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod capability;
pub mod handlers;
pub mod inputs;
pub mod llm;
pub mod outputs;
pub mod prompts;
pub mod template;

/// One user-triggerable generation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    CareerPlan,
    MentorAdvice,
    Schemes,
    Resume,
    Confidence,
    DreamMap,
    Simulation,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::CareerPlan => "career-plan",
            Feature::MentorAdvice => "mentor-advice",
            Feature::Schemes => "schemes",
            Feature::Resume => "resume",
            Feature::Confidence => "confidence",
            Feature::DreamMap => "dream-map",
            Feature::Simulation => "simulation",
        }
    }

    /// Simulation works without a profile; every other feature is gated.
    pub fn requires_complete_profile(&self) -> bool {
        !matches!(self, Feature::Simulation)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_serde_matches_route_segment() {
        for feature in [
            Feature::CareerPlan,
            Feature::MentorAdvice,
            Feature::Schemes,
            Feature::Resume,
            Feature::Confidence,
            Feature::DreamMap,
            Feature::Simulation,
        ] {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.as_str()));
        }
    }

    #[test]
    fn test_only_simulation_skips_the_gate() {
        assert!(!Feature::Simulation.requires_complete_profile());
        assert!(Feature::Resume.requires_complete_profile());
    }
}
