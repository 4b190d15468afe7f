// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Neural Reset Trigger
// ─────────────────────────────────────────────────────────────────────
//! Decides whether to prompt a short stabilization exercise.
//!
//! Rules are evaluated in order and the first match wins:
//! 1. low activity or adequate stability → suppressed
//! 2. intensive session just ended and stability dipped → post-session prompt
//! 3. high activity with low stability → high-load prompt
//! 4. otherwise → not shown

use serde::{Deserialize, Serialize};

use cogindex_types::numeric::clamp_percent;
use cogindex_types::NeuralResetConfig;

pub const POST_SESSION_MESSAGE: &str =
    "You just finished an intense session. Take two minutes to let your focus settle.";
pub const HIGH_LOAD_MESSAGE: &str =
    "Your load is high and stability is slipping. A short reset will help you stay sharp.";

/// Current activity/stability readings and the last session, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuralResetInput {
    pub activity: f64,
    pub stability: f64,
    pub last_session_intensive: bool,
    /// Minutes since the last session ended; `None` when unknown.
    pub minutes_since_session: Option<u32>,
}

/// Which rule decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeuralResetRule {
    Suppressed,
    PostSession,
    HighLoad,
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NeuralResetDecision {
    pub show: bool,
    pub rule: NeuralResetRule,
    pub message: Option<&'static str>,
}

impl NeuralResetDecision {
    fn hidden(rule: NeuralResetRule) -> Self {
        Self {
            show: false,
            rule,
            message: None,
        }
    }

    fn shown(rule: NeuralResetRule, message: &'static str) -> Self {
        Self {
            show: true,
            rule,
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NeuralResetTrigger {
    config: NeuralResetConfig,
}

impl NeuralResetTrigger {
    pub fn new(config: NeuralResetConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, input: &NeuralResetInput) -> NeuralResetDecision {
        let c = &self.config;
        let activity = clamp_percent(input.activity);
        let stability = clamp_percent(input.stability);

        if activity < c.low_activity || stability >= c.adequate_stability {
            return NeuralResetDecision::hidden(NeuralResetRule::Suppressed);
        }

        let recent = input
            .minutes_since_session
            .is_some_and(|m| m <= c.post_session_window_min);
        if input.last_session_intensive && recent && stability < c.post_session_stability {
            return NeuralResetDecision::shown(NeuralResetRule::PostSession, POST_SESSION_MESSAGE);
        }

        if activity >= c.high_activity && stability < c.high_load_stability {
            return NeuralResetDecision::shown(NeuralResetRule::HighLoad, HIGH_LOAD_MESSAGE);
        }

        NeuralResetDecision::hidden(NeuralResetRule::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(activity: f64, stability: f64, intensive: bool, minutes: Option<u32>) -> NeuralResetDecision {
        NeuralResetTrigger::default().evaluate(&NeuralResetInput {
            activity,
            stability,
            last_session_intensive: intensive,
            minutes_since_session: minutes,
        })
    }

    #[test]
    fn test_suppressed_low_activity() {
        let d = eval(20.0, 10.0, true, Some(5));
        assert!(!d.show);
        assert_eq!(d.rule, NeuralResetRule::Suppressed);
    }

    #[test]
    fn test_suppressed_adequate_stability() {
        let d = eval(90.0, 70.0, true, Some(5));
        assert_eq!(d.rule, NeuralResetRule::Suppressed);
        assert!(d.message.is_none());
    }

    #[test]
    fn test_post_session_prompt() {
        let d = eval(50.0, 55.0, true, Some(30));
        assert!(d.show);
        assert_eq!(d.rule, NeuralResetRule::PostSession);
        assert_eq!(d.message, Some(POST_SESSION_MESSAGE));
    }

    #[test]
    fn test_post_session_wins_over_high_load() {
        let d = eval(90.0, 40.0, true, Some(10));
        assert_eq!(d.rule, NeuralResetRule::PostSession);
    }

    #[test]
    fn test_post_session_window_expired() {
        let d = eval(90.0, 40.0, true, Some(31));
        assert_eq!(d.rule, NeuralResetRule::HighLoad);
        assert_eq!(d.message, Some(HIGH_LOAD_MESSAGE));
        assert_eq!(eval(50.0, 55.0, true, None).rule, NeuralResetRule::NoMatch);
    }

    #[test]
    fn test_no_match() {
        let d = eval(60.0, 45.0, false, None);
        assert!(!d.show);
        assert_eq!(d.rule, NeuralResetRule::NoMatch);
    }

    #[test]
    fn test_nan_inputs_are_clamped() {
        // NaN activity clamps to 0 → suppressed.
        assert_eq!(eval(f64::NAN, 10.0, false, None).rule, NeuralResetRule::Suppressed);
    }
}
