// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Scoring Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the daily pipeline and the gating pass.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cogindex_core::cognitive;
use cogindex_core::unlock::{self, CurrentMetrics, GapRequirements};
use cogindex_core::{
    CognitiveEngine, DailyInputs, GamesCaps, GamesGate, GatingInput, PhysioReadings,
    TrainingPlan, TrainingPlanModifiers,
};
use cogindex_types::{CognitiveAgeBaseline, CognitiveStates};

fn daily_inputs() -> DailyInputs {
    DailyInputs {
        states: CognitiveStates::new(62.0, 55.0, 48.0, 51.0),
        weekly_detox_min: 40.0,
        weekly_walk_min: 30.0,
        weekly_xp: 180.0,
        physio: PhysioReadings {
            hrv_ms: Some(65.0),
            resting_hr_bpm: Some(58.0),
            sleep_minutes: Some(430.0),
            sleep_efficiency: Some(0.9),
        },
        age_baseline: Some(CognitiveAgeBaseline::new(
            41.0,
            CognitiveStates::uniform(50.0),
        )),
        reasoning_quality: Some(70.0),
    }
}

// ── Daily pipeline ──────────────────────────────────────────────────

fn bench_daily_snapshot(c: &mut Criterion) {
    let engine = CognitiveEngine::default();
    let inputs = daily_inputs();
    c.bench_function("daily_snapshot", |b| {
        b.iter(|| engine.daily_snapshot(black_box(&inputs)))
    });
}

fn bench_sci(c: &mut Criterion) {
    let states = CognitiveStates::new(62.0, 55.0, 48.0, 51.0);
    c.bench_function("sci", |b| {
        b.iter(|| cognitive::sci(black_box(&states), 180.0, 300.0, 85.0))
    });
}

// ── Gating ──────────────────────────────────────────────────────────

fn bench_gating_all_open(c: &mut Criterion) {
    let gate = GamesGate::default();
    let input = GatingInput {
        sharpness: 70.0,
        readiness: 60.0,
        recovery: 80.0,
        caps: GamesCaps::default(),
        modifiers: TrainingPlanModifiers::default(),
    };
    c.bench_function("gating_all_open", |b| {
        b.iter(|| gate.get_all_availability(black_box(&input)))
    });
}

fn bench_gating_all_withheld(c: &mut Criterion) {
    let gate = GamesGate::default();
    let input = GatingInput {
        sharpness: 10.0,
        readiness: 10.0,
        recovery: 10.0,
        caps: GamesCaps::default(),
        modifiers: TrainingPlan::Intense.modifiers(),
    };
    c.bench_function("gating_all_withheld", |b| {
        b.iter(|| gate.get_all_availability(black_box(&input)))
    });
}

fn bench_unlock_suggestions(c: &mut Criterion) {
    let current = CurrentMetrics {
        sharpness: 40.0,
        readiness: 35.0,
        recovery: 32.0,
    };
    let req = GapRequirements {
        sharpness: Some(55.0),
        readiness: Some(50.0),
        recovery: Some(45.0),
        s2_capacity: Some(unlock::s2_capacity(55.0, 50.0)),
    };
    c.bench_function("unlock_suggestions", |b| {
        b.iter(|| {
            let gaps = unlock::calculate_gaps(black_box(&current), black_box(&req));
            unlock::generate_suggestions(&gaps)
        })
    });
}

// ── Full pipeline: snapshot + gate ──────────────────────────────────

fn bench_full_pipeline(c: &mut Criterion) {
    let engine = CognitiveEngine::default();
    let inputs = daily_inputs();
    c.bench_function("full_pipeline", |b| {
        b.iter(|| {
            let snap = engine.daily_snapshot(black_box(&inputs));
            engine.availability(&snap, GamesCaps::default(), TrainingPlanModifiers::default())
        })
    });
}

criterion_group!(
    benches,
    bench_daily_snapshot,
    bench_sci,
    bench_gating_all_open,
    bench_gating_all_withheld,
    bench_unlock_suggestions,
    bench_full_pipeline,
);
criterion_main!(benches);
