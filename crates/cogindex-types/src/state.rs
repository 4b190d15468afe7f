// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Skill State Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::numeric::clamp_percent;

/// One of the four persistent skill variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// Attentional Efficiency.
    AttentionalEfficiency,
    /// Rapid Association.
    RapidAssociation,
    /// Critical Thinking.
    CriticalThinking,
    /// Insight.
    Insight,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::AttentionalEfficiency,
        Skill::RapidAssociation,
        Skill::CriticalThinking,
        Skill::Insight,
    ];

    /// The system this skill contributes to.
    pub fn system(self) -> SystemKind {
        match self {
            Skill::AttentionalEfficiency | Skill::RapidAssociation => SystemKind::S1,
            Skill::CriticalThinking | Skill::Insight => SystemKind::S2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Skill::AttentionalEfficiency => "AE",
            Skill::RapidAssociation => "RA",
            Skill::CriticalThinking => "CT",
            Skill::Insight => "IN",
        }
    }
}

/// Fast/intuitive (S1) or slow/analytical (S2) processing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    S1,
    S2,
}

impl SystemKind {
    /// The two skills averaged into this system's score.
    pub fn skills(self) -> [Skill; 2] {
        match self {
            SystemKind::S1 => [Skill::AttentionalEfficiency, Skill::RapidAssociation],
            SystemKind::S2 => [Skill::CriticalThinking, Skill::Insight],
        }
    }

    pub fn other(self) -> SystemKind {
        match self {
            SystemKind::S1 => SystemKind::S2,
            SystemKind::S2 => SystemKind::S1,
        }
    }
}

/// The four persistent skill values, each in [0, 100].
///
/// Mutated only by XP routing and decay. Construction clamps, so a
/// `CognitiveStates` value never holds an out-of-range skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveStates {
    pub attentional_efficiency: f64,
    pub rapid_association: f64,
    pub critical_thinking: f64,
    pub insight: f64,
}

impl CognitiveStates {
    pub fn new(ae: f64, ra: f64, ct: f64, insight: f64) -> Self {
        Self {
            attentional_efficiency: clamp_percent(ae),
            rapid_association: clamp_percent(ra),
            critical_thinking: clamp_percent(ct),
            insight: clamp_percent(insight),
        }
    }

    /// All four skills set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, skill: Skill) -> f64 {
        match skill {
            Skill::AttentionalEfficiency => self.attentional_efficiency,
            Skill::RapidAssociation => self.rapid_association,
            Skill::CriticalThinking => self.critical_thinking,
            Skill::Insight => self.insight,
        }
    }

    /// Copy with one skill replaced (clamped).
    pub fn with(mut self, skill: Skill, value: f64) -> Self {
        let value = clamp_percent(value);
        match skill {
            Skill::AttentionalEfficiency => self.attentional_efficiency = value,
            Skill::RapidAssociation => self.rapid_association = value,
            Skill::CriticalThinking => self.critical_thinking = value,
            Skill::Insight => self.insight = value,
        }
        self
    }

    /// Re-clamp every field. Deserialized values bypass `new`.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.attentional_efficiency,
            self.rapid_association,
            self.critical_thinking,
            self.insight,
        )
    }

    /// Mean of the four skills.
    pub fn performance_avg(&self) -> f64 {
        (self.attentional_efficiency + self.rapid_association + self.critical_thinking + self.insight)
            / 4.0
    }
}

/// Derived system scores. Never stored; always recomputed from states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemScores {
    pub s1: f64,
    pub s2: f64,
}

impl SystemScores {
    pub fn get(&self, system: SystemKind) -> f64 {
        match system {
            SystemKind::S1 => self.s1,
            SystemKind::S2 => self.s2,
        }
    }
}
