// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Which Sharpness weighting to use.
///
/// Two weightings exist in the product history. `V2` is canonical;
/// `V1Legacy` is kept so historical scores can be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpnessVersion {
    /// `0.6·S1 + 0.4·S2`.
    V1Legacy,
    /// `0.5·S1 + 0.3·AE + 0.2·S2`.
    #[default]
    V2,
}

/// Which games threshold table to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingVersion {
    /// System-1 games also require a minimum recovery.
    V1Legacy,
    /// System-1 games have no recovery dependency.
    #[default]
    V2,
}

/// Cognitive state engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitiveConfig {
    pub sharpness_version: SharpnessVersion,
    pub gating_version: GatingVersion,
    /// Weekly detox-equivalent minutes for REC = 100. Default: 60.
    pub weekly_recovery_target_min: f64,
    /// Weekly XP for behavioral engagement = 100. Default: 300.
    pub weekly_xp_target: f64,
    /// Skill points gained per XP point. Default: 0.5.
    pub xp_state_gain: f64,
}

impl Default for CognitiveConfig {
    fn default() -> Self {
        Self {
            sharpness_version: SharpnessVersion::V2,
            gating_version: GatingVersion::V2,
            weekly_recovery_target_min: 60.0,
            weekly_xp_target: 300.0,
            xp_state_gain: 0.5,
        }
    }
}

/// Decay and regression rules. Every penalty respects a weekly ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Consecutive no-XP days before skill decay starts. Default: 7.
    pub skill_inactivity_days: u32,
    /// Penalty on the first triggering day. Default: 1.0.
    pub skill_base_penalty: f64,
    /// Length of each further interval. Default: 7 days.
    pub skill_step_days: u32,
    /// Additional penalty per further full interval. Default: 0.5.
    pub skill_step_penalty: f64,
    /// Max penalty from one evaluation. Default: 3.0.
    pub skill_max_penalty: f64,
    /// Weekly ceiling per skill. Default: 3.0.
    pub skill_weekly_cap: f64,

    /// REC below this counts as a low-recovery day. Default: 40.
    pub low_recovery_threshold: f64,
    /// Consecutive low-recovery days before readiness decays. Default: 3.
    pub readiness_low_recovery_days: u32,
    pub readiness_initial_penalty: f64,
    pub readiness_per_day_penalty: f64,
    pub readiness_weekly_cap: f64,

    /// Weekly average REC below this triggers the SCI recovery penalty.
    pub sci_low_recovery_threshold: f64,
    pub sci_low_recovery_penalty: f64,
    /// Days without training before the SCI inactivity penalty. Default: 5.
    pub sci_no_training_days: u32,
    pub sci_no_training_penalty: f64,
    /// Joint weekly ceiling on both SCI penalties. Default: 4.0.
    pub sci_weekly_cap: f64,

    /// Dominant/neglected weekly XP ratio that counts as imbalance. Default: 2.0.
    pub imbalance_ratio: f64,
    pub imbalance_penalty: f64,
    pub imbalance_weekly_cap: f64,

    /// Performance-average drop that starts an age regression window. Default: 5.0.
    pub age_regression_drop: f64,
    /// Days the drop must persist. Default: 14.
    pub age_regression_min_days: u32,
    /// Years added per application. Default: 0.5.
    pub age_regression_increase: f64,
    /// Minimum days between two applications. Default: 30.
    pub age_regression_period_days: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            skill_inactivity_days: 7,
            skill_base_penalty: 1.0,
            skill_step_days: 7,
            skill_step_penalty: 0.5,
            skill_max_penalty: 3.0,
            skill_weekly_cap: 3.0,
            low_recovery_threshold: 40.0,
            readiness_low_recovery_days: 3,
            readiness_initial_penalty: 5.0,
            readiness_per_day_penalty: 2.0,
            readiness_weekly_cap: 15.0,
            sci_low_recovery_threshold: 40.0,
            sci_low_recovery_penalty: 2.0,
            sci_no_training_days: 5,
            sci_no_training_penalty: 3.0,
            sci_weekly_cap: 4.0,
            imbalance_ratio: 2.0,
            imbalance_penalty: 2.0,
            imbalance_weekly_cap: 2.0,
            age_regression_drop: 5.0,
            age_regression_min_days: 14,
            age_regression_increase: 0.5,
            age_regression_period_days: 30,
        }
    }
}

/// Training Capacity growth/decay model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// TC never drops below this. Default: 20.
    pub floor: f64,
    /// Share of recovery-weighted weekly XP added to TC. Default: 0.10.
    pub growth_alpha: f64,
    /// Flat weekly decay on inactivity. Default: 5.0.
    pub inactivity_decay: f64,
    /// Days since last XP that trigger the decay. Default: 7.
    pub inactivity_days: u32,
    /// Initial TC ceiling as a share of the plan cap. Default: 0.6.
    pub initial_plan_fraction: f64,
    pub optimal_min_fraction: f64,
    pub optimal_max_fraction: f64,
    /// Range minimum never exceeds this share of the range maximum. Default: 0.7.
    pub optimal_min_of_max: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            floor: 20.0,
            growth_alpha: 0.10,
            inactivity_decay: 5.0,
            inactivity_days: 7,
            initial_plan_fraction: 0.6,
            optimal_min_fraction: 0.60,
            optimal_max_fraction: 0.85,
            optimal_min_of_max: 0.70,
        }
    }
}

/// Demographic/calibration baseline blending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Calibration weight λ in `λ·calibration + (1−λ)·demographic`. Default: 0.70.
    pub calibration_lambda: f64,
    pub center: f64,
    pub center_min: f64,
    pub center_max: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            calibration_lambda: 0.70,
            center: 50.0,
            center_min: 44.0,
            center_max: 56.0,
        }
    }
}

/// Neural Reset prompt thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuralResetConfig {
    /// Below this activity the prompt is suppressed. Default: 30.
    pub low_activity: f64,
    /// At or above this stability the prompt is suppressed. Default: 70.
    pub adequate_stability: f64,
    /// Minutes after an intensive session during which the post-session
    /// prompt may fire. Default: 30.
    pub post_session_window_min: u32,
    pub post_session_stability: f64,
    pub high_activity: f64,
    pub high_load_stability: f64,
}

impl Default for NeuralResetConfig {
    fn default() -> Self {
        Self {
            low_activity: 30.0,
            adequate_stability: 70.0,
            post_session_window_min: 30,
            post_session_stability: 60.0,
            high_activity: 70.0,
            high_load_stability: 50.0,
        }
    }
}

/// Runtime configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cognitive: CognitiveConfig,
    pub decay: DecayConfig,
    pub capacity: CapacityConfig,
    pub baseline: BaselineConfig,
    pub neural_reset: NeuralResetConfig,
}

fn require_non_negative(name: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::Config(format!(
            "{name} must be a finite value >= 0, got {value}"
        )));
    }
    Ok(())
}

fn require_unit(name: &str, value: f64) -> EngineResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::Config(format!(
            "{name} must be in [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn require_percent(name: &str, value: f64) -> EngineResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(EngineError::Config(format!(
            "{name} must be in [0, 100], got {value}"
        )));
    }
    Ok(())
}

impl CognitiveConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.weekly_recovery_target_min <= 0.0 {
            return Err(EngineError::Config(format!(
                "weekly_recovery_target_min must be > 0, got {}",
                self.weekly_recovery_target_min
            )));
        }
        if self.weekly_xp_target <= 0.0 {
            return Err(EngineError::Config(format!(
                "weekly_xp_target must be > 0, got {}",
                self.weekly_xp_target
            )));
        }
        require_non_negative("xp_state_gain", self.xp_state_gain)
    }
}

impl DecayConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.skill_step_days == 0 {
            return Err(EngineError::Config("skill_step_days must be >= 1".to_string()));
        }
        if self.imbalance_ratio < 1.0 {
            return Err(EngineError::Config(format!(
                "imbalance_ratio must be >= 1, got {}",
                self.imbalance_ratio
            )));
        }
        for (name, value) in [
            ("skill_base_penalty", self.skill_base_penalty),
            ("skill_step_penalty", self.skill_step_penalty),
            ("skill_max_penalty", self.skill_max_penalty),
            ("skill_weekly_cap", self.skill_weekly_cap),
            ("readiness_initial_penalty", self.readiness_initial_penalty),
            ("readiness_per_day_penalty", self.readiness_per_day_penalty),
            ("readiness_weekly_cap", self.readiness_weekly_cap),
            ("sci_low_recovery_penalty", self.sci_low_recovery_penalty),
            ("sci_no_training_penalty", self.sci_no_training_penalty),
            ("sci_weekly_cap", self.sci_weekly_cap),
            ("imbalance_penalty", self.imbalance_penalty),
            ("imbalance_weekly_cap", self.imbalance_weekly_cap),
            ("age_regression_drop", self.age_regression_drop),
            ("age_regression_increase", self.age_regression_increase),
        ] {
            require_non_negative(name, value)?;
        }
        require_percent("low_recovery_threshold", self.low_recovery_threshold)?;
        require_percent("sci_low_recovery_threshold", self.sci_low_recovery_threshold)
    }
}

impl CapacityConfig {
    pub fn validate(&self) -> EngineResult<()> {
        require_non_negative("floor", self.floor)?;
        require_non_negative("growth_alpha", self.growth_alpha)?;
        require_non_negative("inactivity_decay", self.inactivity_decay)?;
        require_unit("initial_plan_fraction", self.initial_plan_fraction)?;
        require_unit("optimal_min_fraction", self.optimal_min_fraction)?;
        require_unit("optimal_max_fraction", self.optimal_max_fraction)?;
        require_unit("optimal_min_of_max", self.optimal_min_of_max)?;
        if self.optimal_min_fraction > self.optimal_max_fraction {
            return Err(EngineError::Config(format!(
                "optimal_min_fraction ({}) must not exceed optimal_max_fraction ({})",
                self.optimal_min_fraction, self.optimal_max_fraction
            )));
        }
        Ok(())
    }
}

impl BaselineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        require_unit("calibration_lambda", self.calibration_lambda)?;
        require_percent("center", self.center)?;
        if self.center_min > self.center_max {
            return Err(EngineError::Config(format!(
                "center_min ({}) must not exceed center_max ({})",
                self.center_min, self.center_max
            )));
        }
        Ok(())
    }
}

impl NeuralResetConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for (name, value) in [
            ("low_activity", self.low_activity),
            ("adequate_stability", self.adequate_stability),
            ("post_session_stability", self.post_session_stability),
            ("high_activity", self.high_activity),
            ("high_load_stability", self.high_load_stability),
        ] {
            require_percent(name, value)?;
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate every section.
    pub fn validate(&self) -> EngineResult<()> {
        self.cognitive.validate()?;
        self.decay.validate()?;
        self.capacity.validate()?;
        self.baseline.validate()?;
        self.neural_reset.validate()
    }

    /// Load from JSON string. Missing sections and fields take defaults;
    /// the result is validated before it is returned.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
