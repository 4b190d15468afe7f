// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Decay & Regression Rules
// ─────────────────────────────────────────────────────────────────────
//! Time-window penalties applied when a user stops training or
//! recovering.
//!
//! The engine holds no history: the caller passes the counters it derived
//! from persisted data (consecutive no-XP days, decay already applied this
//! week, dates). Every rule returns the penalty actually applied so the
//! caller can add it to its weekly ledger.
//!
//! # Invariants
//!
//! 1. **Weekly ceiling**: `applied_this_week + penalty <= weekly_cap` for
//!    every rule, including when several SCI penalties stack.
//! 2. **Floors**: inactivity and imbalance decay never take a skill below
//!    its baseline; every other value never goes below 0.
//! 3. **No division before the zero check**: dual-process imbalance tests
//!    the zero/non-zero case before any ratio arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cogindex_types::numeric::{clamp_percent, clamp_score};
use cogindex_types::{CognitiveStates, DecayConfig, SystemKind};

use crate::cognitive::COGNITIVE_AGE_BOUND;

/// Remaining weekly budget, never negative.
#[inline]
fn remaining_budget(weekly_cap: f64, applied_this_week: f64) -> f64 {
    (weekly_cap - applied_this_week.max(0.0)).max(0.0)
}

/// Outcome of a single-value decay rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayOutcome {
    /// Whether the rule's trigger condition held.
    pub triggered: bool,
    /// Penalty actually subtracted (after caps and floors).
    pub applied: f64,
    /// Value after decay.
    pub new_value: f64,
}

impl DecayOutcome {
    fn unchanged(value: f64) -> Self {
        Self {
            triggered: false,
            applied: 0.0,
            new_value: value,
        }
    }
}

// ── Skill inactivity ────────────────────────────────────────────────

/// Inputs for one skill's inactivity decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillDecayInput {
    pub current: f64,
    /// The skill's baseline value; decay never crosses it.
    pub baseline_floor: f64,
    pub consecutive_days_without_xp: u32,
    pub applied_this_week: f64,
}

/// Raw inactivity penalty before weekly cap and floor.
///
/// `base` on reaching the threshold, plus `step` for each further full
/// interval, capped at `skill_max_penalty`.
pub fn skill_inactivity_penalty(days_without_xp: u32, config: &DecayConfig) -> f64 {
    if days_without_xp < config.skill_inactivity_days {
        return 0.0;
    }
    let intervals = (days_without_xp - config.skill_inactivity_days) / config.skill_step_days.max(1);
    let penalty = config.skill_base_penalty + config.skill_step_penalty * intervals as f64;
    penalty.min(config.skill_max_penalty)
}

pub fn skill_inactivity_decay(input: &SkillDecayInput, config: &DecayConfig) -> DecayOutcome {
    let current = clamp_percent(input.current);
    let penalty = skill_inactivity_penalty(input.consecutive_days_without_xp, config);
    if penalty <= 0.0 {
        return DecayOutcome::unchanged(current);
    }

    let budget = remaining_budget(config.skill_weekly_cap, input.applied_this_week);
    let floor = clamp_percent(input.baseline_floor);
    // Already at or below baseline: nothing to take.
    let new_value = if current <= floor {
        current
    } else {
        (current - penalty.min(budget)).max(floor)
    };
    let applied = current - new_value;

    log::debug!(
        "skill decay: {} days idle, penalty {penalty:.2}, applied {applied:.2}",
        input.consecutive_days_without_xp
    );
    DecayOutcome {
        triggered: true,
        applied,
        new_value,
    }
}

// ── Readiness ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessDecayInput {
    pub current: f64,
    pub consecutive_low_recovery_days: u32,
    pub applied_this_week: f64,
}

/// Whether a day's REC counts as low recovery.
pub fn is_low_recovery(rec: f64, config: &DecayConfig) -> bool {
    rec < config.low_recovery_threshold
}

pub fn readiness_decay(input: &ReadinessDecayInput, config: &DecayConfig) -> DecayOutcome {
    let current = clamp_percent(input.current);
    let days = input.consecutive_low_recovery_days;
    if days < config.readiness_low_recovery_days {
        return DecayOutcome::unchanged(current);
    }

    let extra_days = (days - config.readiness_low_recovery_days) as f64;
    let penalty = config.readiness_initial_penalty + config.readiness_per_day_penalty * extra_days;
    let applied = penalty
        .min(remaining_budget(config.readiness_weekly_cap, input.applied_this_week))
        .min(current);

    log::debug!("readiness decay: {days} low-recovery days, applied {applied:.2}");
    DecayOutcome {
        triggered: true,
        applied,
        new_value: current - applied,
    }
}

// ── SCI ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SciDecayInput {
    pub current: f64,
    pub weekly_avg_recovery: f64,
    pub days_since_training: u32,
    pub applied_this_week: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SciDecayOutcome {
    pub low_recovery_triggered: bool,
    pub no_training_triggered: bool,
    /// Sum of triggered penalties before the weekly cap.
    pub requested: f64,
    pub applied: f64,
    pub new_value: f64,
}

impl SciDecayOutcome {
    pub fn triggered(&self) -> bool {
        self.low_recovery_triggered || self.no_training_triggered
    }
}

/// Two independent penalties that stack but share one weekly ceiling.
pub fn sci_decay(input: &SciDecayInput, config: &DecayConfig) -> SciDecayOutcome {
    let current = clamp_percent(input.current);
    let low_recovery = input.weekly_avg_recovery < config.sci_low_recovery_threshold;
    let no_training = input.days_since_training >= config.sci_no_training_days;

    let mut requested = 0.0;
    if low_recovery {
        requested += config.sci_low_recovery_penalty;
    }
    if no_training {
        requested += config.sci_no_training_penalty;
    }

    let applied = f64::min(
        requested,
        remaining_budget(config.sci_weekly_cap, input.applied_this_week),
    )
    .min(current);

    if low_recovery || no_training {
        log::debug!(
            "SCI decay: low_recovery={low_recovery} no_training={no_training} \
             requested {requested:.2}, applied {applied:.2}"
        );
    }
    SciDecayOutcome {
        low_recovery_triggered: low_recovery,
        no_training_triggered: no_training,
        requested,
        applied,
        new_value: current - applied,
    }
}

// ── Dual-process imbalance ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceDecayInput {
    pub weekly_s1_xp: f64,
    pub weekly_s2_xp: f64,
    pub applied_this_week: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceDecayOutcome {
    pub triggered: bool,
    /// The under-trained system, whose two skills take the penalty.
    pub neglected: Option<SystemKind>,
    /// Penalty per skill of the neglected system.
    pub penalty: f64,
}

/// Detect which system is neglected, if any.
///
/// Zero versus non-zero is decided before any ratio is formed. Both zero
/// is not an imbalance; inactivity rules cover that case.
pub fn neglected_system(weekly_s1_xp: f64, weekly_s2_xp: f64, ratio: f64) -> Option<SystemKind> {
    let s1 = weekly_s1_xp.max(0.0);
    let s2 = weekly_s2_xp.max(0.0);
    match (s1 == 0.0, s2 == 0.0) {
        (true, true) => None,
        (true, false) => Some(SystemKind::S1),
        (false, true) => Some(SystemKind::S2),
        (false, false) => {
            if s1 >= ratio * s2 {
                Some(SystemKind::S2)
            } else if s2 >= ratio * s1 {
                Some(SystemKind::S1)
            } else {
                None
            }
        }
    }
}

pub fn imbalance_decay(input: &ImbalanceDecayInput, config: &DecayConfig) -> ImbalanceDecayOutcome {
    match neglected_system(input.weekly_s1_xp, input.weekly_s2_xp, config.imbalance_ratio) {
        None => ImbalanceDecayOutcome {
            triggered: false,
            neglected: None,
            penalty: 0.0,
        },
        Some(system) => {
            let penalty = config
                .imbalance_penalty
                .min(remaining_budget(config.imbalance_weekly_cap, input.applied_this_week));
            log::debug!("imbalance decay: {system:?} neglected, penalty {penalty:.2}");
            ImbalanceDecayOutcome {
                triggered: true,
                neglected: Some(system),
                penalty,
            }
        }
    }
}

/// Subtract the imbalance penalty from both skills of the neglected system,
/// never below each skill's baseline. A skill already at or below its
/// baseline is left alone.
pub fn apply_imbalance(
    states: &CognitiveStates,
    baseline: &CognitiveStates,
    outcome: &ImbalanceDecayOutcome,
) -> CognitiveStates {
    let Some(system) = outcome.neglected else {
        return *states;
    };
    system.skills().into_iter().fold(*states, |acc, skill| {
        let current = acc.get(skill);
        let floor = clamp_percent(baseline.get(skill));
        if current <= floor {
            return acc;
        }
        acc.with(skill, (current - outcome.penalty.max(0.0)).max(floor))
    })
}

// ── Cognitive-age regression ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRegressionInput {
    pub today: NaiveDate,
    pub current_cognitive_age: f64,
    pub baseline_age: f64,
    pub current_performance_avg: f64,
    /// Performance average the drop is measured against (e.g. recent peak).
    pub reference_performance_avg: f64,
    /// First day the drop was observed; `None` if not currently dropped.
    pub drop_started: Option<NaiveDate>,
    pub last_regression_applied: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRegressionOutcome {
    pub triggered: bool,
    /// Years actually added.
    pub age_increase: f64,
    pub new_cognitive_age: f64,
}

/// Add a capped, once-per-period age increase when performance has stayed
/// down for long enough.
pub fn cognitive_age_regression(
    input: &AgeRegressionInput,
    config: &DecayConfig,
) -> AgeRegressionOutcome {
    let ceiling = input.baseline_age + COGNITIVE_AGE_BOUND;
    let current = clamp_score(
        input.current_cognitive_age,
        input.baseline_age - COGNITIVE_AGE_BOUND,
        ceiling,
    );
    let unchanged = AgeRegressionOutcome {
        triggered: false,
        age_increase: 0.0,
        new_cognitive_age: current,
    };

    let drop = input.reference_performance_avg - input.current_performance_avg;
    if drop < config.age_regression_drop {
        return unchanged;
    }
    let Some(started) = input.drop_started else {
        return unchanged;
    };
    if (input.today - started).num_days() < i64::from(config.age_regression_min_days) {
        return unchanged;
    }
    if let Some(last) = input.last_regression_applied {
        if (input.today - last).num_days() < i64::from(config.age_regression_period_days) {
            return unchanged;
        }
    }

    let new_age = clamp_score(current + config.age_regression_increase, current, ceiling);
    let age_increase = new_age - current;
    if age_increase <= 0.0 {
        return unchanged;
    }
    log::debug!("cognitive age regression: drop {drop:.2}, +{age_increase:.2} years");
    AgeRegressionOutcome {
        triggered: true,
        age_increase,
        new_cognitive_age: new_age,
    }
}
