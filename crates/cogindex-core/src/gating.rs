// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Games Gating Engine
// ─────────────────────────────────────────────────────────────────────
//! Per-game availability policy over sharpness, readiness, recovery and
//! usage caps.
//!
//! Gating runs in two passes:
//! - **Pass 1**: each game is evaluated independently by one shared
//!   driver over an ordered list of checks derived from its policy.
//! - **Pass 2**: the no-deadlock safety rule: if no game is enabled and
//!   the safe System-1 fallback has not hit its daily cap, it is
//!   force-enabled and marked as a safety override.
//!
//! # Policy Invariants
//!
//! 1. **System-1 games have no recovery dependency** (canonical table).
//!    The legacy table adds a recovery minimum; it is kept only behind
//!    `GatingVersion::V1Legacy`.
//!
//! 2. **Recovery floor short-circuits System-2**: below the floor no other
//!    check runs, and the reason is always the floor.
//!
//! 3. **Liveness**: `available_count() == 0` implies the safe fallback is
//!    capped. A user is never locked out of everything unless their own
//!    daily usage exhausted the fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

use cogindex_types::{CognitiveConfig, GatingVersion, SystemKind};

use crate::unlock::{self, CurrentMetrics, GapRequirements, Metric};

/// The four gated activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Fast reaction game. Cheapest System-1 activity and the safety fallback.
    Reflex,
    /// Fast association game.
    Association,
    /// Slow analytical game.
    Reasoning,
    /// Slow insight game with a readiness window.
    Insight,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::Reflex,
        GameType::Association,
        GameType::Reasoning,
        GameType::Insight,
    ];

    pub fn system(self) -> SystemKind {
        match self {
            GameType::Reflex | GameType::Association => SystemKind::S1,
            GameType::Reasoning | GameType::Insight => SystemKind::S2,
        }
    }

    /// The game the safety rule may force-enable.
    pub fn is_safe_fallback(self) -> bool {
        self == GameType::Reflex
    }

    pub fn label(self) -> &'static str {
        match self {
            GameType::Reflex => "Reflex",
            GameType::Association => "Association",
            GameType::Reasoning => "Reasoning",
            GameType::Insight => "Insight",
        }
    }
}

/// Readiness requirement of a System-2 game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReadinessRequirement {
    AtLeast(f64),
    /// Withheld both below `min` and above `max`.
    Window { min: f64, max: f64 },
}

impl ReadinessRequirement {
    pub fn min(&self) -> f64 {
        match *self {
            ReadinessRequirement::AtLeast(min) => min,
            ReadinessRequirement::Window { min, .. } => min,
        }
    }
}

/// Thresholds of a System-1 game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastGate {
    pub sharpness_min: f64,
    pub readiness_min: Option<f64>,
    /// Only set in the legacy table.
    pub recovery_min: Option<f64>,
    /// Shared across all System-1 games.
    pub daily_cap: u32,
}

/// Thresholds of a System-2 game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowGate {
    /// Hard block, checked first.
    pub recovery_floor: f64,
    pub sharpness_min: f64,
    pub readiness: ReadinessRequirement,
    pub recovery_min: f64,
    pub daily_cap: u32,
    pub weekly_cap: u32,
}

/// Closed set of threshold shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GatePolicy {
    Fast(FastGate),
    Slow(SlowGate),
}

/// Complete threshold table for the four games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub reflex: FastGate,
    pub association: FastGate,
    pub reasoning: SlowGate,
    pub insight: SlowGate,
}

const S1_DAILY_CAP: u32 = 10;
const S2_RECOVERY_FLOOR: f64 = 30.0;

impl ThresholdTable {
    pub fn for_version(version: GatingVersion) -> Self {
        match version {
            GatingVersion::V2 => Self::canonical(),
            GatingVersion::V1Legacy => Self::legacy(),
        }
    }

    /// Canonical table: System-1 games are recovery-independent.
    pub fn canonical() -> Self {
        Self {
            reflex: FastGate {
                sharpness_min: 30.0,
                readiness_min: None,
                recovery_min: None,
                daily_cap: S1_DAILY_CAP,
            },
            association: FastGate {
                sharpness_min: 45.0,
                readiness_min: Some(40.0),
                recovery_min: None,
                daily_cap: S1_DAILY_CAP,
            },
            reasoning: SlowGate {
                recovery_floor: S2_RECOVERY_FLOOR,
                sharpness_min: 55.0,
                readiness: ReadinessRequirement::AtLeast(50.0),
                recovery_min: 45.0,
                daily_cap: 3,
                weekly_cap: 12,
            },
            insight: SlowGate {
                recovery_floor: S2_RECOVERY_FLOOR,
                sharpness_min: 50.0,
                readiness: ReadinessRequirement::Window {
                    min: 45.0,
                    max: 80.0,
                },
                recovery_min: 50.0,
                daily_cap: 2,
                weekly_cap: 6,
            },
        }
    }

    /// Legacy table: System-1 games also require recovery ≥ 25.
    pub fn legacy() -> Self {
        Self {
            reflex: FastGate {
                sharpness_min: 35.0,
                readiness_min: None,
                recovery_min: Some(25.0),
                daily_cap: S1_DAILY_CAP,
            },
            association: FastGate {
                sharpness_min: 50.0,
                readiness_min: Some(45.0),
                recovery_min: Some(25.0),
                daily_cap: S1_DAILY_CAP,
            },
            reasoning: SlowGate {
                recovery_floor: S2_RECOVERY_FLOOR,
                sharpness_min: 60.0,
                readiness: ReadinessRequirement::AtLeast(55.0),
                recovery_min: 50.0,
                daily_cap: 3,
                weekly_cap: 12,
            },
            insight: SlowGate {
                recovery_floor: S2_RECOVERY_FLOOR,
                sharpness_min: 55.0,
                readiness: ReadinessRequirement::Window {
                    min: 50.0,
                    max: 80.0,
                },
                recovery_min: 50.0,
                daily_cap: 2,
                weekly_cap: 6,
            },
        }
    }

    pub fn policy(&self, game: GameType) -> GatePolicy {
        match game {
            GameType::Reflex => GatePolicy::Fast(self.reflex),
            GameType::Association => GatePolicy::Fast(self.association),
            GameType::Reasoning => GatePolicy::Slow(self.reasoning),
            GameType::Insight => GatePolicy::Slow(self.insight),
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Sessions used in the current day and week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub today: u32,
    pub this_week: u32,
}

/// Usage counters, reset by the caller on its daily/weekly cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesCaps {
    /// Sessions across both System-1 games today.
    pub s1_today: u32,
    pub reasoning: UsageCounters,
    pub insight: UsageCounters,
}

/// Plan-specific threshold adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlanModifiers {
    /// Added to every sharpness minimum.
    pub sharpness_offset: f64,
    /// Added to every readiness minimum (not to the insight window maximum).
    pub readiness_offset: f64,
    /// Floor on the System-2 recovery minimum.
    pub s2_recovery_floor: Option<f64>,
    /// Replaces the Insight weekly cap.
    pub insight_weekly_cap: Option<u32>,
}

/// Training plan presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPlan {
    Light,
    Standard,
    Intense,
}

impl TrainingPlan {
    pub fn modifiers(self) -> TrainingPlanModifiers {
        match self {
            TrainingPlan::Light => TrainingPlanModifiers {
                sharpness_offset: -5.0,
                readiness_offset: -5.0,
                s2_recovery_floor: None,
                insight_weekly_cap: Some(4),
            },
            TrainingPlan::Standard => TrainingPlanModifiers::default(),
            TrainingPlan::Intense => TrainingPlanModifiers {
                sharpness_offset: 5.0,
                readiness_offset: 5.0,
                s2_recovery_floor: Some(55.0),
                insight_weekly_cap: Some(8),
            },
        }
    }
}

/// Everything gating reads. Recovery is mandatory: System-2 games cannot
/// be evaluated without it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatingInput {
    pub sharpness: f64,
    pub readiness: f64,
    pub recovery: f64,
    pub caps: GamesCaps,
    pub modifiers: TrainingPlanModifiers,
}

impl GatingInput {
    fn metrics(&self) -> CurrentMetrics {
        CurrentMetrics {
            sharpness: self.sharpness,
            readiness: self.readiness,
            recovery: self.recovery,
        }
    }

    fn current(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sharpness => self.sharpness,
            Metric::Readiness => self.readiness,
            Metric::Recovery => self.recovery,
            Metric::S2Capacity => unlock::s2_capacity(self.sharpness, self.readiness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// Hard block; failing it skips every later check.
    Floor,
    Min,
    Max,
}

/// One evaluated metric threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCheck {
    pub metric: Metric,
    pub kind: ThresholdKind,
    pub required: f64,
    pub current: f64,
    pub passed: bool,
}

/// Why a game is withheld.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WithheldReason {
    RecoveryFloor { recovery: f64, floor: f64 },
    BelowMinimum { metric: Metric, current: f64, required: f64 },
    InsightWindowLow { readiness: f64, min: f64, max: f64 },
    InsightWindowHigh { readiness: f64, min: f64, max: f64 },
    DailyCapReached { cap: u32 },
    WeeklyCapReached { cap: u32 },
}

impl fmt::Display for WithheldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WithheldReason::RecoveryFloor { recovery, floor } => write!(
                f,
                "Recovery {recovery:.0} is below the {floor:.0} needed for System-2 games; recover first"
            ),
            WithheldReason::BelowMinimum {
                metric,
                current,
                required,
            } => write!(
                f,
                "{} {current:.0} is below the required {required:.0}",
                metric.label()
            ),
            WithheldReason::InsightWindowLow { readiness, min, max } => write!(
                f,
                "Readiness {readiness:.0} is below the insight window ({min:.0}–{max:.0})"
            ),
            WithheldReason::InsightWindowHigh { readiness, min, max } => write!(
                f,
                "Readiness {readiness:.0} is above the insight window ({min:.0}–{max:.0}); \
                 insight comes easier in a calmer, less driven state"
            ),
            WithheldReason::DailyCapReached { cap } => {
                write!(f, "Daily limit of {cap} sessions reached")
            }
            WithheldReason::WeeklyCapReached { cap } => {
                write!(f, "Weekly limit of {cap} sessions reached")
            }
        }
    }
}

/// Decision for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAvailability {
    pub game: GameType,
    pub enabled: bool,
    /// First failing rule. For a safety override this is kept, and states
    /// why the game would otherwise be withheld.
    pub withheld_reason: Option<WithheldReason>,
    pub thresholds: Vec<ThresholdCheck>,
    /// Titles of the suggested remediation actions.
    pub unlock_actions: Vec<String>,
    /// A daily or weekly cap is exhausted, independent of metric checks.
    pub capped: bool,
    /// Enabled only by the no-deadlock safety rule.
    pub safety_override: bool,
}

/// Decisions for all four games after the safety pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllAvailability {
    pub games: Vec<GameAvailability>,
    pub safety_rule_active: bool,
}

impl AllAvailability {
    pub fn get(&self, game: GameType) -> Option<&GameAvailability> {
        self.games.iter().find(|g| g.game == game)
    }

    pub fn available_count(&self) -> usize {
        self.games.iter().filter(|g| g.enabled).count()
    }

    pub fn enabled_games(&self) -> Vec<GameType> {
        self.games.iter().filter(|g| g.enabled).map(|g| g.game).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CapScope {
    Daily,
    Weekly,
}

/// One step of the shared driver.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Check {
    Floor { metric: Metric, floor: f64 },
    AtLeast { metric: Metric, min: f64 },
    Window { metric: Metric, min: f64, max: f64 },
    Cap { scope: CapScope, used: u32, cap: u32 },
}

impl GatePolicy {
    /// Apply plan modifiers.
    fn adjusted(self, game: GameType, m: &TrainingPlanModifiers) -> Self {
        match self {
            GatePolicy::Fast(g) => GatePolicy::Fast(FastGate {
                sharpness_min: g.sharpness_min + m.sharpness_offset,
                readiness_min: g.readiness_min.map(|r| r + m.readiness_offset),
                ..g
            }),
            GatePolicy::Slow(g) => {
                let readiness = match g.readiness {
                    ReadinessRequirement::AtLeast(min) => {
                        ReadinessRequirement::AtLeast(min + m.readiness_offset)
                    }
                    ReadinessRequirement::Window { min, max } => ReadinessRequirement::Window {
                        min: (min + m.readiness_offset).min(max),
                        max,
                    },
                };
                let recovery_min = match m.s2_recovery_floor {
                    Some(floor) => g.recovery_min.max(floor),
                    None => g.recovery_min,
                };
                let weekly_cap = match (game, m.insight_weekly_cap) {
                    (GameType::Insight, Some(cap)) => cap,
                    _ => g.weekly_cap,
                };
                GatePolicy::Slow(SlowGate {
                    sharpness_min: g.sharpness_min + m.sharpness_offset,
                    readiness,
                    recovery_min,
                    weekly_cap,
                    ..g
                })
            }
        }
    }

    /// Ordered checks for the driver.
    fn checks(&self, game: GameType, caps: &GamesCaps) -> Vec<Check> {
        match self {
            GatePolicy::Fast(g) => {
                let mut checks = vec![Check::AtLeast {
                    metric: Metric::Sharpness,
                    min: g.sharpness_min,
                }];
                if let Some(min) = g.readiness_min {
                    checks.push(Check::AtLeast {
                        metric: Metric::Readiness,
                        min,
                    });
                }
                if let Some(min) = g.recovery_min {
                    checks.push(Check::AtLeast {
                        metric: Metric::Recovery,
                        min,
                    });
                }
                checks.push(Check::Cap {
                    scope: CapScope::Daily,
                    used: caps.s1_today,
                    cap: g.daily_cap,
                });
                checks
            }
            GatePolicy::Slow(g) => {
                let usage = match game {
                    GameType::Insight => caps.insight,
                    _ => caps.reasoning,
                };
                let readiness = match g.readiness {
                    ReadinessRequirement::AtLeast(min) => Check::AtLeast {
                        metric: Metric::Readiness,
                        min,
                    },
                    ReadinessRequirement::Window { min, max } => Check::Window {
                        metric: Metric::Readiness,
                        min,
                        max,
                    },
                };
                vec![
                    Check::Floor {
                        metric: Metric::Recovery,
                        floor: g.recovery_floor,
                    },
                    Check::AtLeast {
                        metric: Metric::Sharpness,
                        min: g.sharpness_min,
                    },
                    readiness,
                    Check::AtLeast {
                        metric: Metric::Recovery,
                        min: g.recovery_min,
                    },
                    Check::Cap {
                        scope: CapScope::Daily,
                        used: usage.today,
                        cap: g.daily_cap,
                    },
                    Check::Cap {
                        scope: CapScope::Weekly,
                        used: usage.this_week,
                        cap: g.weekly_cap,
                    },
                ]
            }
        }
    }

    /// Requirements handed to the unlock engine for remediation.
    fn gap_requirements(&self) -> GapRequirements {
        match self {
            GatePolicy::Fast(g) => GapRequirements {
                sharpness: Some(g.sharpness_min),
                readiness: g.readiness_min,
                recovery: g.recovery_min,
                s2_capacity: None,
            },
            GatePolicy::Slow(g) => GapRequirements {
                sharpness: Some(g.sharpness_min),
                readiness: Some(g.readiness.min()),
                recovery: Some(g.recovery_min.max(g.recovery_floor)),
                s2_capacity: Some(unlock::s2_capacity(g.sharpness_min, g.readiness.min())),
            },
        }
    }
}

/// Games gating policy bound to a threshold table.
#[derive(Debug, Clone, Default)]
pub struct GamesGate {
    table: ThresholdTable,
}

impl GamesGate {
    pub fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    pub fn from_version(version: GatingVersion) -> Self {
        Self::new(ThresholdTable::for_version(version))
    }

    pub fn from_config(config: &CognitiveConfig) -> Self {
        Self::from_version(config.gating_version)
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// Effective policy for a game after plan modifiers.
    pub fn effective_policy(&self, game: GameType, modifiers: &TrainingPlanModifiers) -> GatePolicy {
        self.table.policy(game).adjusted(game, modifiers)
    }

    /// Pass 1: evaluate a single game in isolation.
    pub fn check_availability(&self, game: GameType, input: &GatingInput) -> GameAvailability {
        let policy = self.effective_policy(game, &input.modifiers);
        let checks = policy.checks(game, &input.caps);

        let capped = checks
            .iter()
            .any(|c| matches!(c, Check::Cap { used, cap, .. } if used >= cap));

        let mut thresholds = Vec::with_capacity(checks.len());
        let mut reason: Option<WithheldReason> = None;

        for check in &checks {
            match *check {
                Check::Floor { metric, floor } => {
                    let current = input.current(metric);
                    let passed = current >= floor;
                    thresholds.push(ThresholdCheck {
                        metric,
                        kind: ThresholdKind::Floor,
                        required: floor,
                        current,
                        passed,
                    });
                    if !passed {
                        reason = Some(WithheldReason::RecoveryFloor {
                            recovery: current,
                            floor,
                        });
                        break;
                    }
                }
                Check::AtLeast { metric, min } => {
                    let current = input.current(metric);
                    let passed = current >= min;
                    thresholds.push(ThresholdCheck {
                        metric,
                        kind: ThresholdKind::Min,
                        required: min,
                        current,
                        passed,
                    });
                    if !passed && reason.is_none() {
                        reason = Some(WithheldReason::BelowMinimum {
                            metric,
                            current,
                            required: min,
                        });
                    }
                }
                Check::Window { metric, min, max } => {
                    let current = input.current(metric);
                    thresholds.push(ThresholdCheck {
                        metric,
                        kind: ThresholdKind::Min,
                        required: min,
                        current,
                        passed: current >= min,
                    });
                    thresholds.push(ThresholdCheck {
                        metric,
                        kind: ThresholdKind::Max,
                        required: max,
                        current,
                        passed: current <= max,
                    });
                    if reason.is_none() {
                        if current < min {
                            reason = Some(WithheldReason::InsightWindowLow {
                                readiness: current,
                                min,
                                max,
                            });
                        } else if current > max {
                            reason = Some(WithheldReason::InsightWindowHigh {
                                readiness: current,
                                min,
                                max,
                            });
                        }
                    }
                }
                Check::Cap { scope, used, cap } => {
                    if used >= cap && reason.is_none() {
                        reason = Some(match scope {
                            CapScope::Daily => WithheldReason::DailyCapReached { cap },
                            CapScope::Weekly => WithheldReason::WeeklyCapReached { cap },
                        });
                    }
                }
            }
        }

        let enabled = reason.is_none();
        let unlock_actions = if enabled {
            Vec::new()
        } else {
            let gaps = unlock::calculate_gaps(&input.metrics(), &policy.gap_requirements());
            unlock::generate_suggestions(&gaps)
                .into_iter()
                .map(|s| s.title)
                .collect()
        };

        if let Some(r) = &reason {
            log::debug!("{} withheld: {r}", game.label());
        }

        GameAvailability {
            game,
            enabled,
            withheld_reason: reason,
            thresholds,
            unlock_actions,
            capped,
            safety_override: false,
        }
    }

    /// Pass 1 over every game, then pass 2 (safety rule).
    pub fn get_all_availability(&self, input: &GatingInput) -> AllAvailability {
        let mut games: Vec<GameAvailability> = GameType::ALL
            .iter()
            .map(|&game| self.check_availability(game, input))
            .collect();
        let safety_rule_active = apply_safety_rule(&mut games);
        AllAvailability {
            games,
            safety_rule_active,
        }
    }

    /// Whether the current inputs only leave the fallback open by override.
    pub fn is_safety_rule_active(&self, input: &GatingInput) -> bool {
        self.get_all_availability(input).safety_rule_active
    }
}

/// Pass 2: the no-deadlock safety rule.
///
/// If nothing is enabled and the safe fallback is not capped, enable it as
/// a safety override. Returns whether the override fired.
pub fn apply_safety_rule(games: &mut [GameAvailability]) -> bool {
    if games.iter().any(|g| g.enabled) {
        return false;
    }
    let Some(fallback) = games.iter_mut().find(|g| g.game.is_safe_fallback()) else {
        return false;
    };
    if fallback.capped {
        log::info!("All games withheld and the fallback is capped for today");
        return false;
    }
    fallback.enabled = true;
    fallback.safety_override = true;
    log::warn!(
        "Safety rule active: {} force-enabled (would be withheld: {})",
        fallback.game.label(),
        fallback
            .withheld_reason
            .map(|r| r.to_string())
            .unwrap_or_default()
    );
    true
}
