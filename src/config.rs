//! Engine configuration.
//!
//! Every knob is an explicit value handed to the engine; nothing is
//! resolved from process-wide defaults. Leagues disagree on how often two
//! players may repeat as partners or opponents, so both caps are
//! parameters, defaulting to the tightest common choice (1 partner repeat,
//! 2 opponent repeats).

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::scoring::ScoreMethod;

/// Configuration for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of rounds; every player plays exactly this many games.
    pub n_games: u32,
    /// Imbalance scoring method.
    pub method: ScoreMethod,
    /// Optional pre-filter: drop matchups scoring above this value before
    /// constraint construction.
    pub score_threshold: Option<f64>,
    /// Maximum times two players may team together across the schedule.
    pub partner_cap: u32,
    /// Maximum times two players may oppose each other across the schedule.
    pub opponent_cap: u32,
    /// Decimal places for the reported per-game score difference.
    pub score_precision: u32,
}

impl ScheduleConfig {
    /// Creates a configuration for `n_games` rounds with default knobs:
    /// `diff` scoring, no threshold, partner cap 1, opponent cap 2,
    /// two-decimal score rounding.
    pub fn new(n_games: u32) -> Self {
        Self {
            n_games,
            method: ScoreMethod::default(),
            score_threshold: None,
            partner_cap: 1,
            opponent_cap: 2,
            score_precision: 2,
        }
    }

    /// Sets the scoring method.
    pub fn with_method(mut self, method: ScoreMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the score threshold for the candidate pre-filter.
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    /// Sets the partner repeat cap.
    pub fn with_partner_cap(mut self, cap: u32) -> Self {
        self.partner_cap = cap;
        self
    }

    /// Sets the opponent repeat cap.
    pub fn with_opponent_cap(mut self, cap: u32) -> Self {
        self.opponent_cap = cap;
        self
    }

    /// Sets the decimal precision of the reported score difference.
    pub fn with_score_precision(mut self, precision: u32) -> Self {
        self.score_precision = precision;
        self
    }

    /// Checks that all values are usable.
    ///
    /// Zero caps are rejected rather than passed through: every selected
    /// game pairs its partners once and opposes its players once, so a zero
    /// cap forbids all games and the model is infeasible by construction.
    pub fn validate(&self) -> Result<()> {
        if self.n_games == 0 {
            return Err(ScheduleError::InvalidConfig(
                "n_games must be at least 1".into(),
            ));
        }
        if self.partner_cap == 0 {
            return Err(ScheduleError::InvalidConfig(
                "partner_cap must be at least 1".into(),
            ));
        }
        if self.opponent_cap == 0 {
            return Err(ScheduleError::InvalidConfig(
                "opponent_cap must be at least 1".into(),
            ));
        }
        if let Some(t) = self.score_threshold {
            if !t.is_finite() || t < 0.0 {
                return Err(ScheduleError::InvalidConfig(
                    "score_threshold must be a non-negative finite value".into(),
                ));
            }
        }
        Ok(())
    }
}
