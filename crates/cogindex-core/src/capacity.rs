// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Training Capacity
// ─────────────────────────────────────────────────────────────────────
//! Training Capacity (TC): a slowly adapting ceiling on weekly training
//! dose. TC grows with recovery-weighted XP and decays on inactivity,
//! independently of skill level.

use serde::{Deserialize, Serialize};

use cogindex_types::numeric::{clamp_percent, clamp_score};
use cogindex_types::{CapacityConfig, CognitiveStates};

use crate::cognitive::system_scores;

/// Recommended weekly XP band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

/// Training Capacity model bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct TrainingCapacity {
    config: CapacityConfig,
}

impl TrainingCapacity {
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    /// Upper bound that never falls below the floor, so clamping stays valid
    /// for tiny or zero plan caps.
    fn ceiling(&self, value: f64) -> f64 {
        value.max(self.config.floor)
    }

    /// Seed TC from current skills: `round((S1+S2)/2)`, clamped to
    /// `[FLOOR, 0.6·plan_cap]`.
    pub fn initialize(&self, states: &CognitiveStates, plan_cap: f64) -> f64 {
        let sys = system_scores(states);
        let seed = ((sys.s1 + sys.s2) / 2.0).round();
        clamp_score(
            seed,
            self.config.floor,
            self.ceiling(self.config.initial_plan_fraction * plan_cap),
        )
    }

    /// `clamp(0.6 + 0.006·avg_rec, 0.6, 1.2)`.
    pub fn recovery_multiplier(&self, avg_rec: f64) -> f64 {
        recovery_multiplier(avg_rec)
    }

    /// Weekly TC update.
    ///
    /// `growth = α·min(weekly_xp, plan_cap)·recovery_multiplier`; a flat
    /// decay applies once `days_since_last_xp` reaches the inactivity
    /// threshold. Result clamped to `[FLOOR, plan_cap]`.
    pub fn update(
        &self,
        current_tc: f64,
        weekly_xp: f64,
        avg_rec: f64,
        days_since_last_xp: u32,
        plan_cap: f64,
    ) -> f64 {
        let dose = weekly_xp.max(0.0).min(plan_cap.max(0.0));
        let growth = self.config.growth_alpha * dose * recovery_multiplier(avg_rec);
        let decay = if days_since_last_xp >= self.config.inactivity_days {
            self.config.inactivity_decay
        } else {
            0.0
        };
        let next = clamp_score(
            current_tc + growth - decay,
            self.config.floor,
            self.ceiling(plan_cap),
        );
        log::debug!(
            "TC update: {current_tc:.1} → {next:.1} (growth {growth:.2}, decay {decay:.2})"
        );
        next
    }

    /// Recommended weekly XP band for a given TC.
    ///
    /// `max = min(0.85·TC, weekly_target)`, `min = min(0.60·TC, 0.70·max)`.
    /// `min <= max` always holds.
    pub fn dynamic_optimal_range(
        &self,
        tc: f64,
        plan_cap: f64,
        weekly_target: Option<f64>,
    ) -> OptimalRange {
        let tc = tc.max(0.0).min(plan_cap.max(0.0));
        let mut max = self.config.optimal_max_fraction * tc;
        if let Some(target) = weekly_target {
            max = max.min(target.max(0.0));
        }
        let min = (self.config.optimal_min_fraction * tc).min(self.config.optimal_min_of_max * max);
        OptimalRange {
            min: min.round(),
            max: max.round(),
        }
    }
}

/// `clamp(0.6 + 0.006·avg_rec, 0.6, 1.2)`.
pub fn recovery_multiplier(avg_rec: f64) -> f64 {
    clamp_score(0.6 + 0.006 * clamp_percent(avg_rec), 0.6, 1.2)
}
