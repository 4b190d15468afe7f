//! Property-based tests for scoring bounds, decay floors and gating
//! liveness.

use std::collections::HashSet;

use proptest::prelude::*;

use cogindex_core::cognitive::{
    cognitive_age, dual_process_balance, recovery, sci, sharpness, system_scores,
};
use cogindex_core::decay::{
    apply_imbalance, imbalance_decay, neglected_system, sci_decay, skill_inactivity_decay,
    ImbalanceDecayInput, SciDecayInput, SkillDecayInput,
};
use cogindex_core::unlock::{calculate_gaps, generate_suggestions, s2_capacity};
use cogindex_core::{
    CurrentMetrics, GameType, GamesCaps, GamesGate, GapRequirements, GatingInput, TrainingPlan,
    UsageCounters,
};
use cogindex_types::{
    CognitiveAgeBaseline, CognitiveStates, DecayConfig, GatingVersion, Skill, SystemKind,
};

/// Strategy: a valid skill value.
fn score() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

/// Strategy: four valid skill values, biased towards the 0/100 boundaries.
fn states_strategy() -> impl Strategy<Value = CognitiveStates> {
    let v = prop_oneof![Just(0.0), Just(100.0), 0.0..=100.0f64];
    (v.clone(), v.clone(), v.clone(), v).prop_map(|(a, r, c, i)| CognitiveStates::new(a, r, c, i))
}

fn plan_strategy() -> impl Strategy<Value = TrainingPlan> {
    prop_oneof![
        Just(TrainingPlan::Light),
        Just(TrainingPlan::Standard),
        Just(TrainingPlan::Intense),
    ]
}

fn usage_strategy() -> impl Strategy<Value = UsageCounters> {
    (0u32..5, 0u32..15).prop_map(|(today, this_week)| UsageCounters { today, this_week })
}

proptest! {
    // 1. Dual-process balance is bounded and 100 iff the systems are equal
    #[test]
    fn dpb_bounded(s1 in score(), s2 in score()) {
        let dpb = dual_process_balance(s1, s2);
        prop_assert!((0.0..=100.0).contains(&dpb), "dpb={dpb}");
        if (s1 - s2).abs() > 1e-9 {
            prop_assert!(dpb < 100.0);
        }
        prop_assert_eq!(dual_process_balance(s1, s1), 100.0);
    }

    // 2. Recovery is monotone in both inputs and never exceeds 100
    #[test]
    fn recovery_monotone(
        detox in 0.0..10_000.0f64,
        walk in 0.0..10_000.0f64,
        extra in 0.0..500.0f64,
    ) {
        let base = recovery(detox, walk, 60.0);
        prop_assert!(base <= 100.0);
        prop_assert!(recovery(detox + extra, walk, 60.0) >= base);
        prop_assert!(recovery(detox, walk + extra, 60.0) >= base);
    }

    // 3. Cognitive age stays within baseline ± 15
    #[test]
    fn cognitive_age_bounded(
        states in states_strategy(),
        base in states_strategy(),
        age in 18.0..90.0f64,
        rq in proptest::option::of(score()),
    ) {
        let baseline = CognitiveAgeBaseline::new(age, base);
        let r = cognitive_age(&states, &baseline, rq);
        prop_assert!(r.cognitive_age >= age - 15.0 - 0.05, "age={}", r.cognitive_age);
        prop_assert!(r.cognitive_age <= age + 15.0 + 0.05, "age={}", r.cognitive_age);
    }

    // 4. SCI and all its components are bounded
    #[test]
    fn sci_bounded(
        states in states_strategy(),
        xp in prop_oneof![Just(0.0), Just(1e9), 0.0..1000.0f64],
        rec in prop_oneof![Just(0.0), Just(100.0), score()],
    ) {
        let r = sci(&states, xp, 300.0, rec);
        prop_assert!(r.is_bounded(), "{r:?}");
    }

    // 5. Sharpness is bounded and recovery never raises it above the base
    #[test]
    fn sharpness_bounded(states in states_strategy(), rec in score()) {
        let s = sharpness(&states, rec);
        prop_assert!((0.0..=100.0).contains(&s));
        let sys = system_scores(&states);
        let base = 0.5 * sys.s1 + 0.3 * states.attentional_efficiency + 0.2 * sys.s2;
        prop_assert!(s <= base + 1e-9);
    }

    // 6. Skill decay never goes below the baseline floor, never exceeds the weekly cap
    #[test]
    fn skill_decay_floor_and_cap(
        current in score(),
        floor in score(),
        days in 0u32..60,
        applied in 0.0..=3.0f64,
    ) {
        let cfg = DecayConfig::default();
        let out = skill_inactivity_decay(
            &SkillDecayInput {
                current,
                baseline_floor: floor,
                consecutive_days_without_xp: days,
                applied_this_week: applied,
            },
            &cfg,
        );
        prop_assert!(out.new_value >= current.min(floor) - 1e-9);
        prop_assert!(applied + out.applied <= cfg.skill_weekly_cap + 1e-9);
    }

    // 6b. Imbalance decay never takes a skill below its baseline, never exceeds the weekly cap
    #[test]
    fn imbalance_decay_floor_and_cap(
        states in states_strategy(),
        baseline in states_strategy(),
        s1_xp in prop_oneof![Just(0.0), 0.0..500.0f64],
        s2_xp in prop_oneof![Just(0.0), 0.0..500.0f64],
        applied in 0.0..=2.0f64,
    ) {
        let cfg = DecayConfig::default();
        let out = imbalance_decay(
            &ImbalanceDecayInput {
                weekly_s1_xp: s1_xp,
                weekly_s2_xp: s2_xp,
                applied_this_week: applied,
            },
            &cfg,
        );
        prop_assert!(applied + out.penalty <= cfg.imbalance_weekly_cap + 1e-9);
        let after = apply_imbalance(&states, &baseline, &out);
        for skill in Skill::ALL {
            let before = states.get(skill);
            prop_assert!(after.get(skill) >= before.min(baseline.get(skill)) - 1e-9);
            prop_assert!(after.get(skill) <= before);
        }
    }

    // 7. Stacked SCI penalties respect the joint weekly cap
    #[test]
    fn sci_decay_joint_cap(
        current in score(),
        avg_rec in score(),
        days in 0u32..30,
        applied in 0.0..=4.0f64,
    ) {
        let cfg = DecayConfig::default();
        let out = sci_decay(
            &SciDecayInput {
                current,
                weekly_avg_recovery: avg_rec,
                days_since_training: days,
                applied_this_week: applied,
            },
            &cfg,
        );
        prop_assert!(applied + out.applied <= cfg.sci_weekly_cap + 1e-9);
        prop_assert!(out.new_value >= 0.0);
    }

    // 8. Zero-vs-nonzero imbalance is detected for any ratio
    #[test]
    fn imbalance_zero_branch(xp in 0.001..1e6f64, ratio in 0.0..100.0f64) {
        prop_assert_eq!(neglected_system(0.0, xp, ratio), Some(SystemKind::S1));
        prop_assert_eq!(neglected_system(xp, 0.0, ratio), Some(SystemKind::S2));
        prop_assert_eq!(neglected_system(0.0, 0.0, ratio), None);
    }

    // 9. No total lockout unless the fallback is capped
    #[test]
    fn gating_liveness(
        sharpness in score(),
        readiness in score(),
        rec in score(),
        s1_today in 0u32..14,
        reasoning in usage_strategy(),
        insight in usage_strategy(),
        plan in plan_strategy(),
        legacy in any::<bool>(),
    ) {
        let version = if legacy { GatingVersion::V1Legacy } else { GatingVersion::V2 };
        let gate = GamesGate::from_version(version);
        let input = GatingInput {
            sharpness,
            readiness,
            recovery: rec,
            caps: GamesCaps { s1_today, reasoning, insight },
            modifiers: plan.modifiers(),
        };
        let all = gate.get_all_availability(&input);
        prop_assert_eq!(all.games.len(), 4);
        if all.available_count() == 0 {
            prop_assert!(all.get(GameType::Reflex).unwrap().capped);
        }
        for g in &all.games {
            prop_assert_eq!(g.enabled, g.withheld_reason.is_none() || g.safety_override);
        }
    }

    // 10. System-2 games below the recovery floor are always withheld
    #[test]
    fn s2_floor_hard_block(sharpness in score(), readiness in score(), rec in 0.0..30.0f64) {
        let gate = GamesGate::default();
        let input = GatingInput {
            sharpness,
            readiness,
            recovery: rec,
            caps: GamesCaps::default(),
            modifiers: TrainingPlan::Standard.modifiers(),
        };
        for game in [GameType::Reasoning, GameType::Insight] {
            prop_assert!(!gate.check_availability(game, &input).enabled);
        }
    }

    // 11. Suggestions: at most three, ids unique
    #[test]
    fn suggestions_capped_unique(
        sharp in score(), ready in score(), rec in score(),
        req_sharp in score(), req_ready in score(), req_rec in score(),
    ) {
        let gaps = calculate_gaps(
            &CurrentMetrics { sharpness: sharp, readiness: ready, recovery: rec },
            &GapRequirements {
                sharpness: Some(req_sharp),
                readiness: Some(req_ready),
                recovery: Some(req_rec),
                s2_capacity: Some(s2_capacity(req_sharp, req_ready)),
            },
        );
        let suggestions = generate_suggestions(&gaps);
        prop_assert!(suggestions.len() <= 3);
        let ids: HashSet<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
        prop_assert_eq!(ids.len(), suggestions.len());
    }
}
