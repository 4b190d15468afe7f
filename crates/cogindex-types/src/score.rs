// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Score Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::numeric::clamp_percent;
use crate::state::CognitiveStates;

/// Headline tier of the Synthesized Cognitive Index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SciLevel {
    Early,
    Developing,
    Moderate,
    High,
    Elite,
}

impl SciLevel {
    /// Classify an SCI total: elite ≥ 85, high ≥ 70, moderate ≥ 55,
    /// developing ≥ 40, early otherwise.
    pub fn from_total(total: f64) -> Self {
        if total >= 85.0 {
            SciLevel::Elite
        } else if total >= 70.0 {
            SciLevel::High
        } else if total >= 55.0 {
            SciLevel::Moderate
        } else if total >= 40.0 {
            SciLevel::Developing
        } else {
            SciLevel::Early
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SciLevel::Elite => "elite",
            SciLevel::High => "high",
            SciLevel::Moderate => "moderate",
            SciLevel::Developing => "developing",
            SciLevel::Early => "early",
        }
    }
}

/// Balance between the fast and slow systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualProcessClass {
    Elite,
    Good,
    Unbalanced,
}

impl DualProcessClass {
    /// elite ≥ 85, good ≥ 70, unbalanced otherwise.
    pub fn from_balance(balance: f64) -> Self {
        if balance >= 85.0 {
            DualProcessClass::Elite
        } else if balance >= 70.0 {
            DualProcessClass::Good
        } else {
            DualProcessClass::Unbalanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DualProcessClass::Elite => "elite",
            DualProcessClass::Good => "good",
            DualProcessClass::Unbalanced => "unbalanced",
        }
    }
}

/// Synthesized Cognitive Index with its components.
///
/// Recomputed daily; every field is derivable from the skill states,
/// behavioral engagement and recovery, so none of it is a store of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SciResult {
    /// Composite 0–100: `0.5·CP + 0.3·BE + 0.2·REC`.
    pub total: f64,
    pub cognitive_performance: f64,
    pub behavioral_engagement: f64,
    pub recovery_factor: f64,
    pub dual_process_balance: f64,
    pub level: SciLevel,
}

/// Captured once, at the end of onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveAgeBaseline {
    /// Chronological age at capture, in years.
    pub age: f64,
    /// Skill values at capture.
    pub states: CognitiveStates,
}

impl CognitiveAgeBaseline {
    pub fn new(age: f64, states: CognitiveStates) -> Self {
        Self { age, states }
    }

    pub fn performance_avg(&self) -> f64 {
        self.states.performance_avg()
    }
}

/// Live estimate of functional age, bounded to baseline age ± 15 years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveAgeResult {
    /// Estimated functional age, rounded to one decimal.
    pub cognitive_age: f64,
    pub baseline_age: f64,
    /// `cognitive_age − baseline_age`; negative means "younger".
    pub delta: f64,
    /// Current performance average minus baseline performance average.
    pub improvement: f64,
    pub rq_multiplier: f64,
}

impl SciResult {
    /// True if every component lies on the 0–100 scale.
    pub fn is_bounded(&self) -> bool {
        [
            self.total,
            self.cognitive_performance,
            self.behavioral_engagement,
            self.recovery_factor,
            self.dual_process_balance,
        ]
        .iter()
        .all(|v| clamp_percent(*v) == *v)
    }
}
