//! Skill-imbalance scoring for matchups.
//!
//! A matchup's score measures how lopsided the game would be; the solve
//! step minimizes the summed score of selected games. Scores are computed
//! once per unique matchup and shared by all of its per-round candidates.

use serde::{Deserialize, Serialize};

use crate::models::{Matchup, Roster};

/// Imbalance measure for a matchup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    /// Absolute difference of combined team ratings:
    /// `|sum(team1) - sum(team2)|`.
    #[default]
    Diff,
    /// Spread across all four players: `max rating - min rating`.
    ///
    /// Penalizes games that mix far-apart skill levels even when the
    /// team sums balance out.
    Gap,
}

impl ScoreMethod {
    /// Scores a matchup against the roster's ratings.
    ///
    /// Non-negative and invariant under round: candidates carrying the
    /// same matchup share this value.
    pub fn score(&self, matchup: &Matchup, roster: &Roster) -> f64 {
        match self {
            ScoreMethod::Diff => {
                let t1 = matchup.team1().combined_rating(roster);
                let t2 = matchup.team2().combined_rating(roster);
                (t1 - t2).abs()
            }
            ScoreMethod::Gap => {
                let ratings = matchup.players().map(|p| roster.rating(p));
                let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
                max - min
            }
        }
    }
}
