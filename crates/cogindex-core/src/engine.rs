// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Engine Facade
// ─────────────────────────────────────────────────────────────────────
//! One configured entry point over the component engines.
//!
//! `daily_snapshot` runs the derived-metric pipeline in its fixed order:
//! S1/S2 → REC → physio → sharpness → readiness → DPB → SCI → cognitive
//! age. Each step reads only the outputs of earlier steps and the caller's
//! inputs.

use serde::{Deserialize, Serialize};

use cogindex_types::{
    CognitiveAgeBaseline, CognitiveAgeResult, CognitiveStates, DualProcessClass, EngineConfig,
    EngineResult, SciResult, SystemScores,
};

use crate::baseline::BaselineEngine;
use crate::capacity::TrainingCapacity;
use crate::cognitive::{self, GymArea, TrainingMode};
use crate::decay::{
    self, AgeRegressionInput, AgeRegressionOutcome, DecayOutcome, ImbalanceDecayInput,
    ImbalanceDecayOutcome, ReadinessDecayInput, SciDecayInput, SciDecayOutcome, SkillDecayInput,
};
use crate::gating::{AllAvailability, GamesCaps, GamesGate, GatingInput, TrainingPlanModifiers};
use crate::neural_reset::NeuralResetTrigger;

/// Wearable readings for the day. Any missing signal disables the physio
/// component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysioReadings {
    pub hrv_ms: Option<f64>,
    pub resting_hr_bpm: Option<f64>,
    pub sleep_minutes: Option<f64>,
    pub sleep_efficiency: Option<f64>,
}

/// Caller-supplied snapshot of one user's day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyInputs {
    pub states: CognitiveStates,
    pub weekly_detox_min: f64,
    pub weekly_walk_min: f64,
    pub weekly_xp: f64,
    #[serde(default)]
    pub physio: PhysioReadings,
    /// Onboarding capture; cognitive age is skipped without it.
    pub age_baseline: Option<CognitiveAgeBaseline>,
    /// Reasoning-quality score, if measured.
    pub reasoning_quality: Option<f64>,
}

/// Every derived metric for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSnapshot {
    pub states: CognitiveStates,
    pub systems: SystemScores,
    pub recovery: f64,
    pub physio: Option<f64>,
    pub sharpness: f64,
    pub readiness: f64,
    pub dual_process_balance: f64,
    pub dual_process_class: DualProcessClass,
    pub sci: SciResult,
    pub cognitive_age: Option<CognitiveAgeResult>,
}

/// Configured engine. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct CognitiveEngine {
    config: EngineConfig,
    gate: GamesGate,
    capacity: TrainingCapacity,
    baseline: BaselineEngine,
    neural_reset: NeuralResetTrigger,
}

impl CognitiveEngine {
    /// Build from a validated configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            gate: GamesGate::from_config(&config.cognitive),
            capacity: TrainingCapacity::new(config.capacity.clone()),
            baseline: BaselineEngine::new(config.baseline.clone()),
            neural_reset: NeuralResetTrigger::new(config.neural_reset.clone()),
            config,
        })
    }

    /// Parse, validate and build.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Self::from_config(EngineConfig::from_json(json)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gate(&self) -> &GamesGate {
        &self.gate
    }

    pub fn capacity(&self) -> &TrainingCapacity {
        &self.capacity
    }

    pub fn baseline(&self) -> &BaselineEngine {
        &self.baseline
    }

    pub fn neural_reset(&self) -> &NeuralResetTrigger {
        &self.neural_reset
    }

    // ── Daily pipeline ───────────────────────────────────────────

    pub fn daily_snapshot(&self, inputs: &DailyInputs) -> CognitiveSnapshot {
        let cfg = &self.config.cognitive;
        let states = inputs.states.sanitized();

        let systems = cognitive::system_scores(&states);
        let recovery = cognitive::recovery(
            inputs.weekly_detox_min,
            inputs.weekly_walk_min,
            cfg.weekly_recovery_target_min,
        );
        let physio = cognitive::physio_component(
            inputs.physio.hrv_ms,
            inputs.physio.resting_hr_bpm,
            inputs.physio.sleep_minutes,
            inputs.physio.sleep_efficiency,
        );
        let sharpness = cognitive::sharpness_with(&states, recovery, cfg.sharpness_version);
        let readiness = cognitive::readiness(&states, recovery, physio);
        let dual_process_balance = cognitive::dual_process_balance(systems.s1, systems.s2);
        let sci = cognitive::sci(&states, inputs.weekly_xp, cfg.weekly_xp_target, recovery);
        let cognitive_age = inputs
            .age_baseline
            .as_ref()
            .map(|b| cognitive::cognitive_age(&states, b, inputs.reasoning_quality));

        CognitiveSnapshot {
            states,
            systems,
            recovery,
            physio,
            sharpness,
            readiness,
            dual_process_balance,
            dual_process_class: cognitive::classify_dual_process(dual_process_balance),
            sci,
            cognitive_age,
        }
    }

    /// Gate input from a snapshot plus the caller's counters.
    pub fn gating_input(
        &self,
        snapshot: &CognitiveSnapshot,
        caps: GamesCaps,
        modifiers: TrainingPlanModifiers,
    ) -> GatingInput {
        GatingInput {
            sharpness: snapshot.sharpness,
            readiness: snapshot.readiness,
            recovery: snapshot.recovery,
            caps,
            modifiers,
        }
    }

    pub fn availability(
        &self,
        snapshot: &CognitiveSnapshot,
        caps: GamesCaps,
        modifiers: TrainingPlanModifiers,
    ) -> AllAvailability {
        self.gate
            .get_all_availability(&self.gating_input(snapshot, caps, modifiers))
    }

    // ── Training ─────────────────────────────────────────────────

    /// Route a session's XP and update the one affected skill.
    pub fn apply_xp(
        &self,
        states: &CognitiveStates,
        area: GymArea,
        mode: TrainingMode,
        earned_xp: f64,
    ) -> CognitiveStates {
        let route = cognitive::xp_routing(area, mode);
        let current = states.get(route.skill);
        let updated =
            cognitive::state_update_with_gain(current, earned_xp, self.config.cognitive.xp_state_gain);
        states.with(route.skill, updated)
    }

    // ── Decay ────────────────────────────────────────────────────

    pub fn skill_decay(&self, input: &SkillDecayInput) -> DecayOutcome {
        decay::skill_inactivity_decay(input, &self.config.decay)
    }

    pub fn readiness_decay(&self, input: &ReadinessDecayInput) -> DecayOutcome {
        decay::readiness_decay(input, &self.config.decay)
    }

    pub fn sci_decay(&self, input: &SciDecayInput) -> SciDecayOutcome {
        decay::sci_decay(input, &self.config.decay)
    }

    pub fn imbalance_decay(&self, input: &ImbalanceDecayInput) -> ImbalanceDecayOutcome {
        decay::imbalance_decay(input, &self.config.decay)
    }

    pub fn age_regression(&self, input: &AgeRegressionInput) -> AgeRegressionOutcome {
        decay::cognitive_age_regression(input, &self.config.decay)
    }
}
