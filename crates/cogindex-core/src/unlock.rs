// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Unlock Suggestions
// ─────────────────────────────────────────────────────────────────────
//! Turns gating failures into a short, ranked list of remediation actions
//! and a rough unlock ETA.
//!
//! Pipeline:
//!   1. `calculate_gaps`: one gap per failing metric, plus the composite
//!      S2-capacity gap back-propagated onto sharpness/readiness
//!   2. `generate_suggestions`: largest gap first, one action per gap,
//!      deduplicated, at most `MAX_SUGGESTIONS`
//!   3. `get_unlock_window`: total outstanding gap → ETA tier

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 3;

/// Composite weights: `S2 capacity = 0.6·sharpness + 0.4·readiness`.
pub const S2_CAPACITY_SHARPNESS_WEIGHT: f64 = 0.6;
pub const S2_CAPACITY_READINESS_WEIGHT: f64 = 0.4;

/// A gated metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Sharpness,
    Readiness,
    Recovery,
    S2Capacity,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Sharpness => "Sharpness",
            Metric::Readiness => "Readiness",
            Metric::Recovery => "Recovery",
            Metric::S2Capacity => "S2 capacity",
        }
    }
}

/// Shortfall of one metric against its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricGap {
    pub metric: Metric,
    pub current: f64,
    pub required: f64,
    /// `required − current`, always > 0.
    pub gap: f64,
    /// True when the gap was back-propagated from the S2-capacity composite
    /// rather than failing a threshold directly.
    pub derived: bool,
    /// Share of `gap` owed to the metric's own threshold. A merged
    /// back-propagated share may widen `gap` but never this.
    pub direct: f64,
}

/// Current metric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetrics {
    pub sharpness: f64,
    pub readiness: f64,
    pub recovery: f64,
}

/// Thresholds to test against; `None` means not required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GapRequirements {
    pub sharpness: Option<f64>,
    pub readiness: Option<f64>,
    pub recovery: Option<f64>,
    pub s2_capacity: Option<f64>,
}

pub fn s2_capacity(sharpness: f64, readiness: f64) -> f64 {
    S2_CAPACITY_SHARPNESS_WEIGHT * sharpness + S2_CAPACITY_READINESS_WEIGHT * readiness
}

fn direct_gap(metric: Metric, current: f64, required: Option<f64>) -> Option<MetricGap> {
    let required = required?;
    (current < required).then(|| MetricGap {
        metric,
        current,
        required,
        gap: required - current,
        derived: false,
        direct: required - current,
    })
}

/// Merge a back-propagated sub-gap into the list, keeping the larger of a
/// direct and a derived gap for the same metric.
fn merge_sub_gap(gaps: &mut Vec<MetricGap>, metric: Metric, current: f64, sub_gap: f64) {
    if sub_gap <= 0.0 {
        return;
    }
    match gaps.iter_mut().find(|g| g.metric == metric) {
        Some(existing) => {
            if sub_gap > existing.gap {
                existing.gap = sub_gap;
                existing.required = current + sub_gap;
            }
        }
        None => gaps.push(MetricGap {
            metric,
            current,
            required: current + sub_gap,
            gap: sub_gap,
            derived: true,
            direct: 0.0,
        }),
    }
}

/// Compute every failing gap for the given requirements.
pub fn calculate_gaps(current: &CurrentMetrics, requirements: &GapRequirements) -> Vec<MetricGap> {
    let mut gaps: Vec<MetricGap> = [
        direct_gap(Metric::Sharpness, current.sharpness, requirements.sharpness),
        direct_gap(Metric::Readiness, current.readiness, requirements.readiness),
        direct_gap(Metric::Recovery, current.recovery, requirements.recovery),
    ]
    .into_iter()
    .flatten()
    .collect();

    let capacity = s2_capacity(current.sharpness, current.readiness);
    if let Some(capacity_gap) = direct_gap(Metric::S2Capacity, capacity, requirements.s2_capacity) {
        gaps.push(capacity_gap);
        merge_sub_gap(
            &mut gaps,
            Metric::Sharpness,
            current.sharpness,
            S2_CAPACITY_SHARPNESS_WEIGHT * capacity_gap.gap,
        );
        merge_sub_gap(
            &mut gaps,
            Metric::Readiness,
            current.readiness,
            S2_CAPACITY_READINESS_WEIGHT * capacity_gap.gap,
        );
    }
    gaps
}

/// A remediation action from the fixed pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnlockAction {
    pub id: &'static str,
    pub metric: Metric,
    pub title: &'static str,
    pub description: &'static str,
    /// Expected metric gain, in score points.
    pub estimated_gain: f64,
}

/// Per-metric remediation pool. An id may appear under several metrics;
/// suggestions are deduplicated by id.
pub const ACTION_POOL: &[UnlockAction] = &[
    UnlockAction {
        id: "focus_sprint",
        metric: Metric::Sharpness,
        title: "5-minute focus sprint",
        description: "A short fast-mode focus drill wakes up attention.",
        estimated_gain: 4.0,
    },
    UnlockAction {
        id: "attention_drill",
        metric: Metric::Sharpness,
        title: "Attention drill",
        description: "Two rounds of the attention drill lift sharpness quickly.",
        estimated_gain: 7.0,
    },
    UnlockAction {
        id: "full_training_session",
        metric: Metric::Sharpness,
        title: "Full training session",
        description: "Complete today's recommended session.",
        estimated_gain: 12.0,
    },
    UnlockAction {
        id: "breathing_reset",
        metric: Metric::Readiness,
        title: "Breathing reset",
        description: "Three minutes of paced breathing steadies readiness.",
        estimated_gain: 3.0,
    },
    UnlockAction {
        id: "short_walk",
        metric: Metric::Readiness,
        title: "Short walk",
        description: "A 15-minute walk raises readiness and counts towards recovery.",
        estimated_gain: 6.0,
    },
    UnlockAction {
        id: "early_night",
        metric: Metric::Readiness,
        title: "Early night",
        description: "A full night of sleep is the largest readiness lever.",
        estimated_gain: 10.0,
    },
    UnlockAction {
        id: "detox_15",
        metric: Metric::Recovery,
        title: "15-minute digital detox",
        description: "Put the phone away for fifteen minutes.",
        estimated_gain: 5.0,
    },
    UnlockAction {
        id: "walk_30",
        metric: Metric::Recovery,
        title: "30-minute walk",
        description: "Walking minutes count half towards weekly recovery.",
        estimated_gain: 8.0,
    },
    UnlockAction {
        id: "detox_60",
        metric: Metric::Recovery,
        title: "One-hour digital detox",
        description: "A full hour offline restores recovery fastest.",
        estimated_gain: 15.0,
    },
    UnlockAction {
        id: "reasoning_warmup",
        metric: Metric::S2Capacity,
        title: "Reasoning warm-up",
        description: "A slow-mode warm-up primes analytical capacity.",
        estimated_gain: 5.0,
    },
    UnlockAction {
        id: "full_training_session",
        metric: Metric::S2Capacity,
        title: "Full training session",
        description: "Complete today's recommended session.",
        estimated_gain: 12.0,
    },
];

/// A suggestion shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockSuggestion {
    pub id: String,
    pub metric: Metric,
    pub title: String,
    pub description: String,
    pub estimated_gain: f64,
    /// Whether the action alone is expected to close the gap.
    pub closes_gap: bool,
}

impl UnlockSuggestion {
    fn from_action(action: &UnlockAction, gap: f64) -> Self {
        Self {
            id: action.id.to_string(),
            metric: action.metric,
            title: action.title.to_string(),
            description: action.description.to_string(),
            estimated_gain: action.estimated_gain,
            closes_gap: action.estimated_gain >= gap,
        }
    }
}

/// Pick the best unused action for one gap: the smallest action that
/// covers it, otherwise the largest available.
fn best_action(
    metric: Metric,
    gap: f64,
    used: &HashSet<&'static str>,
) -> Option<&'static UnlockAction> {
    let candidates = ACTION_POOL
        .iter()
        .filter(|a| a.metric == metric && !used.contains(a.id));

    let covering = candidates
        .clone()
        .filter(|a| a.estimated_gain >= gap)
        .min_by(|a, b| a.estimated_gain.total_cmp(&b.estimated_gain));

    covering.or_else(|| candidates.max_by(|a, b| a.estimated_gain.total_cmp(&b.estimated_gain)))
}

/// Ranked, deduplicated suggestions, largest gap first, at most three.
pub fn generate_suggestions(gaps: &[MetricGap]) -> Vec<UnlockSuggestion> {
    let mut ordered: Vec<&MetricGap> = gaps.iter().collect();
    ordered.sort_by(|a, b| b.gap.total_cmp(&a.gap));

    let mut used: HashSet<&'static str> = HashSet::new();
    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);

    for gap in ordered {
        if suggestions.len() >= MAX_SUGGESTIONS {
            break;
        }
        if let Some(action) = best_action(gap.metric, gap.gap, &used) {
            used.insert(action.id);
            suggestions.push(UnlockSuggestion::from_action(action, gap.gap));
        }
    }
    suggestions
}

/// ETA tier for the total outstanding gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockWindow {
    WithinHour,
    LaterToday,
    Tomorrow,
    FewDays,
}

impl UnlockWindow {
    /// ≤ 5 points: within the hour; ≤ 15: later today; ≤ 30: tomorrow;
    /// otherwise a few days.
    pub fn from_total_gap(total: f64) -> Self {
        if total <= 5.0 {
            UnlockWindow::WithinHour
        } else if total <= 15.0 {
            UnlockWindow::LaterToday
        } else if total <= 30.0 {
            UnlockWindow::Tomorrow
        } else {
            UnlockWindow::FewDays
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnlockWindow::WithinHour => "Within the hour",
            UnlockWindow::LaterToday => "Later today",
            UnlockWindow::Tomorrow => "Tomorrow",
            UnlockWindow::FewDays => "In 2–3 days",
        }
    }
}

/// Sum of the direct shares. Back-propagated shares restate the composite
/// gap and are not counted twice, even when merged into a direct gap.
pub fn total_gap(gaps: &[MetricGap]) -> f64 {
    gaps.iter().map(|g| g.direct).sum()
}

pub fn unlock_window(gaps: &[MetricGap]) -> UnlockWindow {
    UnlockWindow::from_total_gap(total_gap(gaps))
}

/// Human-readable ETA for the outstanding gaps.
pub fn get_unlock_window(gaps: &[MetricGap]) -> &'static str {
    unlock_window(gaps).label()
}
