// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Baseline Engine
// ─────────────────────────────────────────────────────────────────────
//! Initial skill values for a new user: a demographic estimate, optionally
//! blended with a calibration-drill baseline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use cogindex_types::numeric::{clamp_percent, clamp_score};
use cogindex_types::{BaselineConfig, CognitiveStates, EngineError, EngineResult, Skill};

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    Primary,
    Secondary,
    Bachelor,
    Master,
    Doctorate,
}

/// Occupation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Knowledge,
    Technical,
    Student,
    Manual,
    Service,
    Other,
    Retired,
    Unemployed,
}

/// Calibration drill progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

/// Demographic profile. Missing fields contribute no adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemographicInput {
    pub birth_date: Option<NaiveDate>,
    /// Reference date for the age computation.
    pub today: NaiveDate,
    pub education: Option<Education>,
    pub occupation: Option<Occupation>,
}

/// Baseline handed to the profile on onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveBaseline {
    pub states: CognitiveStates,
    /// `true` when no completed calibration contributed.
    pub is_estimated: bool,
}

/// Full years between `birth_date` and `today`, birthday-aware.
/// A birth date in the future yields 0.
pub fn compute_age(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Parse an ISO `YYYY-MM-DD` birth date.
pub fn parse_birth_date(raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| EngineError::Validation(format!("invalid birth date {raw:?}: {e}")))
}

pub fn age_adjustment(age: u32) -> i32 {
    match age {
        0..=24 => 2,
        25..=34 => 1,
        35..=49 => 0,
        50..=64 => -2,
        _ => -3,
    }
}

pub fn education_adjustment(education: Education) -> i32 {
    match education {
        Education::Primary => -2,
        Education::Secondary => 0,
        Education::Bachelor => 1,
        Education::Master => 2,
        Education::Doctorate => 3,
    }
}

pub fn work_adjustment(occupation: Occupation) -> i32 {
    match occupation {
        Occupation::Knowledge | Occupation::Technical => 2,
        Occupation::Student => 1,
        Occupation::Manual | Occupation::Service | Occupation::Other => 0,
        Occupation::Retired | Occupation::Unemployed => -1,
    }
}

/// Baseline engine bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct BaselineEngine {
    config: BaselineConfig,
}

impl BaselineEngine {
    pub fn new(config: BaselineConfig) -> Self {
        Self { config }
    }

    /// Sum of the age, education and occupation nudges.
    pub fn total_adjustment(&self, input: &DemographicInput) -> i32 {
        let age = input
            .birth_date
            .map(|b| age_adjustment(compute_age(b, input.today)))
            .unwrap_or(0);
        let edu = input.education.map(education_adjustment).unwrap_or(0);
        let work = input.occupation.map(work_adjustment).unwrap_or(0);
        age + edu + work
    }

    /// `clamp(center + Σ adjustments, center_min, center_max)`, replicated
    /// into all four skills.
    pub fn demographic_baseline(&self, input: &DemographicInput) -> CognitiveStates {
        let center = clamp_score(
            self.config.center + f64::from(self.total_adjustment(input)),
            self.config.center_min,
            self.config.center_max,
        );
        CognitiveStates::uniform(center)
    }

    /// Per-skill `λ·calibration + (1−λ)·demographic`.
    ///
    /// Fails with [`EngineError::MissingCalibration`] when there is nothing
    /// to blend.
    pub fn blend_calibration(
        &self,
        demographic: &CognitiveStates,
        calibration: Option<&CognitiveStates>,
    ) -> EngineResult<CognitiveStates> {
        let calibration = calibration.ok_or_else(|| {
            EngineError::MissingCalibration("blend requested without a calibration baseline".into())
        })?;
        let lambda = self.config.calibration_lambda;
        let blended = Skill::ALL.iter().fold(*demographic, |acc, &skill| {
            let v = lambda * calibration.get(skill) + (1.0 - lambda) * demographic.get(skill);
            acc.with(skill, clamp_percent(v))
        });
        Ok(blended)
    }

    /// Calibrated blend when the drill is completed and present, otherwise
    /// the demographic estimate.
    pub fn effective_baseline(
        &self,
        demographic: &CognitiveStates,
        calibration: Option<&CognitiveStates>,
        status: CalibrationStatus,
    ) -> EffectiveBaseline {
        if status != CalibrationStatus::Completed {
            return EffectiveBaseline {
                states: *demographic,
                is_estimated: true,
            };
        }
        match self.blend_calibration(demographic, calibration) {
            Ok(states) => EffectiveBaseline {
                states,
                is_estimated: false,
            },
            Err(e) => {
                log::warn!("Calibration marked completed but unusable ({e}); using demographic estimate");
                EffectiveBaseline {
                    states: *demographic,
                    is_estimated: true,
                }
            }
        }
    }
}
