// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Data model, configuration, numeric helpers and error hierarchy for
//! the cognitive scoring and gating engine.

pub mod config;
pub mod error;
pub mod numeric;
pub mod score;
pub mod state;

pub use config::{
    BaselineConfig, CapacityConfig, CognitiveConfig, DecayConfig, EngineConfig, GatingVersion,
    NeuralResetConfig, SharpnessVersion,
};
pub use error::{EngineError, EngineResult};
pub use numeric::{clamp_percent, clamp_score, clamp_unit, round1, round_to};
pub use score::{CognitiveAgeBaseline, CognitiveAgeResult, DualProcessClass, SciLevel, SciResult};
pub use state::{CognitiveStates, Skill, SystemKind, SystemScores};
