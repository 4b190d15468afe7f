// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Cognitive State Engine
// ─────────────────────────────────────────────────────────────────────
//! Closed-form derived metrics over the four skill variables.
//!
//! Computation order (each step only reads earlier steps):
//!
//! 1. `S1 = (AE+RA)/2`, `S2 = (CT+IN)/2`
//! 2. `REC` from weekly detox/walk minutes
//! 3. Sharpness from S1/S2/AE, modulated by REC
//! 4. Readiness from REC/S2/AE, or from the physiological component
//! 5. Dual-process balance from S1/S2
//! 6. SCI from skills, engagement and REC
//! 7. Cognitive age from skills and the captured baseline
//!
//! Every function here is pure and total: out-of-range inputs are
//! clamped, zero targets yield zero, missing wearable data yields `None`.

use serde::{Deserialize, Serialize};

use cogindex_types::numeric::{clamp_percent, clamp_score, mean, normalize, percent_of, round1};
use cogindex_types::{
    CognitiveAgeBaseline, CognitiveAgeResult, CognitiveStates, DualProcessClass, SciLevel,
    SciResult, SharpnessVersion, Skill, SystemKind, SystemScores,
};

/// Walk minutes count half as much as detox minutes towards REC.
pub const WALK_WEIGHT: f64 = 0.5;

/// Maximum deviation of cognitive age from baseline age, in years.
pub const COGNITIVE_AGE_BOUND: f64 = 15.0;

/// Skill points gained per XP point.
pub const XP_STATE_GAIN: f64 = 0.5;

/// Derived system scores.
pub fn system_scores(states: &CognitiveStates) -> SystemScores {
    SystemScores {
        s1: (states.attentional_efficiency + states.rapid_association) / 2.0,
        s2: (states.critical_thinking + states.insight) / 2.0,
    }
}

/// Recovery from weekly detox and walk minutes.
///
/// `REC = min(100, (detox + 0.5·walk) / target · 100)`, rounded to one
/// decimal. A non-positive target yields 0.
pub fn recovery(weekly_detox_min: f64, weekly_walk_min: f64, target: f64) -> f64 {
    let minutes = weekly_detox_min.max(0.0) + WALK_WEIGHT * weekly_walk_min.max(0.0);
    round1(clamp_percent(percent_of(minutes, target)))
}

/// Un-modulated sharpness base for the given weighting.
pub fn sharpness_base(states: &CognitiveStates, version: SharpnessVersion) -> f64 {
    let sys = system_scores(states);
    match version {
        SharpnessVersion::V1Legacy => 0.6 * sys.s1 + 0.4 * sys.s2,
        SharpnessVersion::V2 => {
            0.5 * sys.s1 + 0.3 * states.attentional_efficiency + 0.2 * sys.s2
        }
    }
}

/// REC modulator applied to the sharpness base: 0.75 at REC 0, 1.0 at REC 100.
pub fn recovery_modulator(rec: f64) -> f64 {
    0.75 + 0.25 * clamp_percent(rec) / 100.0
}

/// Sharpness under the canonical weighting.
pub fn sharpness(states: &CognitiveStates, rec: f64) -> f64 {
    sharpness_with(states, rec, SharpnessVersion::V2)
}

/// Sharpness under an explicit weighting.
pub fn sharpness_with(states: &CognitiveStates, rec: f64, version: SharpnessVersion) -> f64 {
    clamp_percent(sharpness_base(states, version) * recovery_modulator(rec))
}

/// Readiness to train.
///
/// Without a physiological component: `0.35·REC + 0.35·S2 + 0.30·AE`.
/// With one: an even blend of the component and a skill composite.
pub fn readiness(states: &CognitiveStates, rec: f64, physio: Option<f64>) -> f64 {
    let sys = system_scores(states);
    match physio {
        None => clamp_percent(
            0.35 * clamp_percent(rec) + 0.35 * sys.s2 + 0.30 * states.attentional_efficiency,
        ),
        Some(p) => {
            let skill_composite = 0.30 * states.critical_thinking
                + 0.25 * states.attentional_efficiency
                + 0.20 * states.insight
                + 0.15 * sys.s2
                + 0.10 * sys.s1;
            clamp_percent(0.5 * clamp_percent(p) + 0.5 * skill_composite)
        }
    }
}

/// Wearable-derived physiological component, or `None` if any signal is
/// missing.
///
/// Each signal is min-max normalised to 0–100: HRV 20–120 ms, resting HR
/// 45–90 bpm (inverted, lower is better), sleep 300–540 min, sleep
/// efficiency 0.70–0.98.
pub fn physio_component(
    hrv_ms: Option<f64>,
    resting_hr_bpm: Option<f64>,
    sleep_minutes: Option<f64>,
    sleep_efficiency: Option<f64>,
) -> Option<f64> {
    let hrv = normalize(hrv_ms?, 20.0, 120.0);
    let hr = 100.0 - normalize(resting_hr_bpm?, 45.0, 90.0);
    let duration = normalize(sleep_minutes?, 300.0, 540.0);
    let efficiency = normalize(sleep_efficiency?, 0.70, 0.98);
    let sleep = 0.6 * duration + 0.4 * efficiency;
    Some(clamp_percent(0.4 * hrv + 0.2 * hr + 0.4 * sleep))
}

/// `100 − |S1 − S2|`. Equals 100 iff the systems are equal.
pub fn dual_process_balance(s1: f64, s2: f64) -> f64 {
    clamp_percent(100.0 - (clamp_percent(s1) - clamp_percent(s2)).abs())
}

pub fn classify_dual_process(balance: f64) -> DualProcessClass {
    DualProcessClass::from_balance(balance)
}

/// Behavioral engagement: weekly XP against the weekly target, capped at 100.
pub fn behavioral_engagement(weekly_xp: f64, weekly_xp_target: f64) -> f64 {
    clamp_percent(percent_of(weekly_xp.max(0.0), weekly_xp_target))
}

/// Synthesized Cognitive Index.
///
/// `CP = mean(AE, RA, CT, IN, S2)`, `SCI = 0.5·CP + 0.3·BE + 0.2·REC`.
/// Components are rounded to one decimal after the total is computed.
pub fn sci(
    states: &CognitiveStates,
    weekly_xp: f64,
    weekly_xp_target: f64,
    rec: f64,
) -> SciResult {
    let sys = system_scores(states);
    let cp = clamp_percent(mean(&[
        states.attentional_efficiency,
        states.rapid_association,
        states.critical_thinking,
        states.insight,
        sys.s2,
    ]));
    let be = behavioral_engagement(weekly_xp, weekly_xp_target);
    let rec = clamp_percent(rec);
    let total = round1(clamp_percent(0.5 * cp + 0.3 * be + 0.2 * rec));

    SciResult {
        total,
        cognitive_performance: round1(cp),
        behavioral_engagement: round1(be),
        recovery_factor: round1(rec),
        dual_process_balance: round1(dual_process_balance(sys.s1, sys.s2)),
        level: SciLevel::from_total(total),
    }
}

/// Reasoning-quality multiplier: `clamp(0.85 + 0.15·rq/100, 0.85, 1.0)`,
/// 0.85 when no RQ is available.
pub fn rq_multiplier(rq: Option<f64>) -> f64 {
    match rq {
        Some(rq) => clamp_score(0.85 + 0.15 * rq / 100.0, 0.85, 1.0),
        None => 0.85,
    }
}

/// Functional age estimate.
///
/// Every 10 points of performance improvement over baseline lowers the
/// estimate by one year (scaled by the RQ multiplier). The result is
/// bounded to baseline age ± 15 years.
pub fn cognitive_age(
    states: &CognitiveStates,
    baseline: &CognitiveAgeBaseline,
    rq: Option<f64>,
) -> CognitiveAgeResult {
    let improvement = states.performance_avg() - baseline.performance_avg();
    let multiplier = rq_multiplier(rq);
    let raw = baseline.age - improvement / 10.0 * multiplier;
    let age = round1(clamp_score(
        raw,
        baseline.age - COGNITIVE_AGE_BOUND,
        baseline.age + COGNITIVE_AGE_BOUND,
    ));

    CognitiveAgeResult {
        cognitive_age: age,
        baseline_age: baseline.age,
        delta: round1(age - baseline.age),
        improvement,
        rq_multiplier: multiplier,
    }
}

/// Training area an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GymArea {
    Focus,
    Reasoning,
    Creativity,
    Insight,
}

impl GymArea {
    pub const ALL: [GymArea; 4] = [
        GymArea::Focus,
        GymArea::Reasoning,
        GymArea::Creativity,
        GymArea::Insight,
    ];
}

/// Exercise pacing. Fast trains System 1, slow trains System 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    Fast,
    Slow,
}

impl TrainingMode {
    pub fn system(self) -> SystemKind {
        match self {
            TrainingMode::Fast => SystemKind::S1,
            TrainingMode::Slow => SystemKind::S2,
        }
    }
}

/// Where an exercise's XP lands: exactly one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpRoute {
    pub system: SystemKind,
    pub skill: Skill,
}

/// Route an exercise to the single skill it trains.
pub fn xp_routing(area: GymArea, mode: TrainingMode) -> XpRoute {
    let skill = match (area, mode) {
        (GymArea::Focus, TrainingMode::Fast) => Skill::AttentionalEfficiency,
        (GymArea::Focus, TrainingMode::Slow) => Skill::CriticalThinking,
        (GymArea::Reasoning, TrainingMode::Fast) => Skill::RapidAssociation,
        (GymArea::Reasoning, TrainingMode::Slow) => Skill::CriticalThinking,
        (GymArea::Creativity, TrainingMode::Fast) => Skill::RapidAssociation,
        (GymArea::Creativity, TrainingMode::Slow) => Skill::Insight,
        (GymArea::Insight, TrainingMode::Fast) => Skill::AttentionalEfficiency,
        (GymArea::Insight, TrainingMode::Slow) => Skill::Insight,
    };
    XpRoute {
        system: mode.system(),
        skill,
    }
}

/// `clamp(current + earned_xp·0.5, 0, 100)`.
pub fn state_update(current: f64, earned_xp: f64) -> f64 {
    state_update_with_gain(current, earned_xp, XP_STATE_GAIN)
}

pub fn state_update_with_gain(current: f64, earned_xp: f64, gain: f64) -> f64 {
    clamp_percent(current + earned_xp * gain)
}

/// Apply a session's XP to the routed skill only.
pub fn apply_xp(states: &CognitiveStates, route: XpRoute, earned_xp: f64) -> CognitiveStates {
    let updated = state_update(states.get(route.skill), earned_xp);
    states.with(route.skill, updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(ae: f64, ra: f64, ct: f64, ins: f64) -> CognitiveStates {
        CognitiveStates::new(ae, ra, ct, ins)
    }

    // ── system scores / recovery ──────────────────────────────────

    #[test]
    fn test_system_scores() {
        let sys = system_scores(&states(60.0, 40.0, 70.0, 30.0));
        assert_eq!(sys.s1, 50.0);
        assert_eq!(sys.s2, 50.0);
    }

    #[test]
    fn test_recovery_scenario_caps_at_100() {
        // (45 + 0.5·30) / 60 · 100 = 100
        assert_eq!(recovery(45.0, 30.0, 60.0), 100.0);
    }

    #[test]
    fn test_recovery_rounds_to_one_decimal() {
        // 20 / 60 · 100 = 33.333…
        assert_eq!(recovery(20.0, 0.0, 60.0), 33.3);
    }

    #[test]
    fn test_recovery_zero_target() {
        assert_eq!(recovery(45.0, 30.0, 0.0), 0.0);
        assert_eq!(recovery(45.0, 30.0, -5.0), 0.0);
    }

    #[test]
    fn test_recovery_huge_input() {
        assert_eq!(recovery(1e9, 1e9, 60.0), 100.0);
    }

    // ── sharpness ─────────────────────────────────────────────────

    #[test]
    fn test_sharpness_scenario_v2() {
        // S1=60 (AE=55, RA=65), S2=50, REC=80
        let s = states(55.0, 65.0, 50.0, 50.0);
        let base = sharpness_base(&s, SharpnessVersion::V2);
        assert!((base - 56.5).abs() < 1e-9, "base = {base}");
        assert!((recovery_modulator(80.0) - 0.95).abs() < 1e-12);
        assert!((sharpness(&s, 80.0) - 56.5 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_sharpness_scenario_v1_legacy() {
        let s = states(55.0, 65.0, 50.0, 50.0);
        let base = sharpness_base(&s, SharpnessVersion::V1Legacy);
        assert!((base - 56.0).abs() < 1e-9);
        let v = sharpness_with(&s, 80.0, SharpnessVersion::V1Legacy);
        assert!((v - 53.2).abs() < 1e-9);
    }

    #[test]
    fn test_sharpness_bounds() {
        assert!((sharpness(&CognitiveStates::uniform(100.0), 100.0) - 100.0).abs() < 1e-9);
        assert_eq!(sharpness(&CognitiveStates::uniform(0.0), 0.0), 0.0);
        assert!(sharpness(&CognitiveStates::uniform(100.0), 500.0) <= 100.0);
    }

    // ── readiness / physio ───────────────────────────────────────

    #[test]
    fn test_readiness_without_physio() {
        let s = states(60.0, 40.0, 50.0, 50.0);
        // 0.35·80 + 0.35·50 + 0.30·60 = 28 + 17.5 + 18 = 63.5
        assert!((readiness(&s, 80.0, None) - 63.5).abs() < 1e-9);
    }

    #[test]
    fn test_readiness_with_physio() {
        let s = CognitiveStates::uniform(50.0);
        // composite = 50·(0.30+0.25+0.20+0.15+0.10) = 50
        assert!((readiness(&s, 10.0, Some(90.0)) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_readiness_physio_ignores_rec() {
        let s = CognitiveStates::uniform(50.0);
        assert_eq!(readiness(&s, 0.0, Some(60.0)), readiness(&s, 100.0, Some(60.0)));
    }

    #[test]
    fn test_physio_component_missing_input() {
        assert!(physio_component(None, Some(60.0), Some(420.0), Some(0.9)).is_none());
        assert!(physio_component(Some(70.0), Some(60.0), Some(420.0), None).is_none());
    }

    #[test]
    fn test_physio_component_midpoints() {
        // HRV 70 → 50, HR 67.5 → 50, sleep 420 → 50, eff 0.84 → 50
        let p = physio_component(Some(70.0), Some(67.5), Some(420.0), Some(0.84)).unwrap();
        assert!((p - 50.0).abs() < 1e-9, "p = {p}");
    }

    #[test]
    fn test_physio_component_best_and_worst() {
        let best = physio_component(Some(150.0), Some(40.0), Some(600.0), Some(1.0)).unwrap();
        assert!((best - 100.0).abs() < 1e-9, "best = {best}");
        let worst = physio_component(Some(5.0), Some(120.0), Some(100.0), Some(0.5)).unwrap();
        assert_eq!(worst, 0.0);
    }

    // ── balance / SCI ────────────────────────────────────────────

    #[test]
    fn test_dual_process_balance() {
        assert_eq!(dual_process_balance(60.0, 60.0), 100.0);
        assert_eq!(dual_process_balance(80.0, 50.0), 70.0);
        assert_eq!(dual_process_balance(100.0, 0.0), 0.0);
        assert_eq!(classify_dual_process(70.0), DualProcessClass::Good);
    }

    #[test]
    fn test_sci_formula() {
        let s = CognitiveStates::uniform(60.0);
        let r = sci(&s, 150.0, 300.0, 80.0);
        // CP = 60, BE = 50, REC = 80 → 30 + 15 + 16 = 61
        assert_eq!(r.cognitive_performance, 60.0);
        assert_eq!(r.behavioral_engagement, 50.0);
        assert_eq!(r.recovery_factor, 80.0);
        assert_eq!(r.total, 61.0);
        assert_eq!(r.level, SciLevel::Moderate);
        assert_eq!(r.dual_process_balance, 100.0);
    }

    #[test]
    fn test_sci_zero_target_engagement() {
        let r = sci(&CognitiveStates::uniform(50.0), 500.0, 0.0, 50.0);
        assert_eq!(r.behavioral_engagement, 0.0);
    }

    #[test]
    fn test_sci_extremes() {
        let hi = sci(&CognitiveStates::uniform(100.0), 1e6, 300.0, 100.0);
        assert_eq!(hi.total, 100.0);
        assert_eq!(hi.level, SciLevel::Elite);
        let lo = sci(&CognitiveStates::uniform(0.0), 0.0, 300.0, 0.0);
        assert_eq!(lo.total, 0.0);
        assert!(hi.is_bounded() && lo.is_bounded());
    }

    // ── cognitive age ────────────────────────────────────────────

    #[test]
    fn test_cognitive_age_scenario() {
        let baseline = CognitiveAgeBaseline::new(38.0, CognitiveStates::uniform(50.0));
        let r = cognitive_age(&CognitiveStates::uniform(65.0), &baseline, None);
        assert!((r.improvement - 15.0).abs() < 1e-9);
        assert_eq!(r.rq_multiplier, 0.85);
        assert_eq!(r.cognitive_age, 36.7);
        assert_eq!(r.delta, -1.3);
    }

    #[test]
    fn test_cognitive_age_rq_multiplier() {
        assert_eq!(rq_multiplier(Some(100.0)), 1.0);
        assert_eq!(rq_multiplier(Some(0.0)), 0.85);
        assert_eq!(rq_multiplier(Some(-50.0)), 0.85);
        assert_eq!(rq_multiplier(Some(400.0)), 1.0);
        assert!((rq_multiplier(Some(50.0)) - 0.925).abs() < 1e-12);
    }

    #[test]
    fn test_cognitive_age_bounded() {
        let baseline = CognitiveAgeBaseline::new(40.0, CognitiveStates::uniform(0.0));
        let younger = cognitive_age(&CognitiveStates::uniform(100.0), &baseline, Some(100.0));
        // improvement 100 → −10 years, inside the bound
        assert_eq!(younger.cognitive_age, 30.0);

        let baseline = CognitiveAgeBaseline::new(40.0, CognitiveStates::uniform(100.0));
        let older = cognitive_age(&CognitiveStates::uniform(0.0), &baseline, Some(100.0));
        assert_eq!(older.cognitive_age, 50.0);
        assert!(older.cognitive_age <= 55.0);
    }

    // ── XP routing ───────────────────────────────────────────────

    #[test]
    fn test_xp_routing_system_matches_mode_and_skill() {
        for area in GymArea::ALL {
            for mode in [TrainingMode::Fast, TrainingMode::Slow] {
                let route = xp_routing(area, mode);
                assert_eq!(route.system, mode.system());
                assert_eq!(route.skill.system(), route.system, "{area:?}/{mode:?}");
            }
        }
    }

    #[test]
    fn test_xp_routing_table() {
        assert_eq!(
            xp_routing(GymArea::Focus, TrainingMode::Fast).skill,
            Skill::AttentionalEfficiency
        );
        assert_eq!(
            xp_routing(GymArea::Creativity, TrainingMode::Slow).skill,
            Skill::Insight
        );
        assert_eq!(
            xp_routing(GymArea::Reasoning, TrainingMode::Slow).skill,
            Skill::CriticalThinking
        );
    }

    #[test]
    fn test_state_update_clamps() {
        assert_eq!(state_update(50.0, 10.0), 55.0);
        assert_eq!(state_update(98.0, 10.0), 100.0);
        assert_eq!(state_update(2.0, -10.0), 0.0);
    }

    #[test]
    fn test_apply_xp_changes_one_skill() {
        let before = CognitiveStates::uniform(50.0);
        let route = xp_routing(GymArea::Insight, TrainingMode::Slow);
        let after = apply_xp(&before, route, 20.0);
        let changed: Vec<Skill> = Skill::ALL
            .into_iter()
            .filter(|&k| before.get(k) != after.get(k))
            .collect();
        assert_eq!(changed, vec![Skill::Insight]);
        assert_eq!(after.insight, 60.0);
    }
}
