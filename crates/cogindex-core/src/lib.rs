// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Scoring, decay, capacity, gating and remediation for cognitive
//! training.
//!
//! Every entry point is a pure, synchronous computation over its
//! arguments. The engine holds no per-user state, performs no I/O and is
//! safe to share across threads. Persisting counters and applying
//! results with read-modify-write consistency is the caller's job.
//!
//! # Invariants
//!
//! 1. **Bounded outputs**: every score, skill and index lies in [0, 100];
//!    cognitive age stays within baseline age ± 15 years. Non-finite inputs
//!    are clamped, never propagated.
//!
//! 2. **Recovery is a modulator**: sharpness scales by `0.75 + 0.25·REC/100`
//!    and training never raises recovery.
//!
//! 3. **Single-skill XP**: a session updates exactly one skill, chosen by
//!    gym area and training mode.
//!
//! 4. **No total lockout**: after gating, at least one game is enabled
//!    unless the safe fallback is capped for the day.

pub mod baseline;
pub mod capacity;
pub mod cognitive;
pub mod decay;
pub mod engine;
pub mod gating;
pub mod neural_reset;
pub mod unlock;

pub use baseline::{
    compute_age, parse_birth_date, BaselineEngine, CalibrationStatus, DemographicInput,
    Education, EffectiveBaseline, Occupation,
};
pub use capacity::{OptimalRange, TrainingCapacity};
pub use cognitive::{GymArea, TrainingMode, XpRoute};
pub use engine::{CognitiveEngine, CognitiveSnapshot, DailyInputs, PhysioReadings};
pub use gating::{
    AllAvailability, GameAvailability, GameType, GamesCaps, GamesGate, GatingInput,
    ThresholdTable, TrainingPlan, TrainingPlanModifiers, UsageCounters, WithheldReason,
};
pub use neural_reset::{NeuralResetDecision, NeuralResetInput, NeuralResetTrigger};
pub use unlock::{CurrentMetrics, GapRequirements, Metric, MetricGap, UnlockSuggestion, UnlockWindow};
