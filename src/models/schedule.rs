//! Schedule (solution) model.
//!
//! A schedule is the ordered-by-round list of games the solver selected,
//! with per-game team scores for display and auditing. It is produced once
//! by the solve step and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Roster, Team};

/// A selected game in the final schedule.
///
/// Carries the team score columns computed at extraction time:
/// `team1_score`/`team2_score` are the sums of member ratings,
/// `combined_score` their total, and `score_diff` the absolute difference
/// rounded to the configured precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    /// Round slot, 1-based.
    pub round: u32,
    /// Lower-ordered team.
    pub team1: Team,
    /// Higher-ordered team.
    pub team2: Team,
    /// Sum of `team1` member ratings.
    pub team1_score: f64,
    /// Sum of `team2` member ratings.
    pub team2_score: f64,
    /// `team1_score + team2_score`.
    pub combined_score: f64,
    /// `|team1_score - team2_score|`, rounded.
    pub score_diff: f64,
}

impl ScheduledGame {
    /// All four participating players.
    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.team1.first(),
            self.team1.second(),
            self.team2.first(),
            self.team2.second(),
        ]
    }

    /// Whether the player takes part in this game.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.team1.contains(id) || self.team2.contains(id)
    }

    /// Two-line display label, e.g. `"Ann and Ben\nCal and Dee"`.
    pub fn matchup_label(&self, roster: &Roster) -> String {
        format!("{}\n{}", self.team1.label(roster), self.team2.label(roster))
    }
}

/// Ordered-by-round sequence of selected games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Selected games, sorted by round.
    pub games: Vec<ScheduledGame>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a game.
    pub fn add_game(&mut self, game: ScheduledGame) {
        self.games.push(game);
    }

    /// Number of games.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Highest round number present, 0 if empty.
    pub fn rounds(&self) -> u32 {
        self.games.iter().map(|g| g.round).max().unwrap_or(0)
    }

    /// Games in a given round, in schedule order.
    pub fn games_for_round(&self, round: u32) -> Vec<&ScheduledGame> {
        self.games.iter().filter(|g| g.round == round).collect()
    }

    /// Games a player takes part in, in schedule order.
    pub fn games_for_player(&self, id: PlayerId) -> Vec<&ScheduledGame> {
        self.games.iter().filter(|g| g.contains(id)).collect()
    }

    /// Number of games a player takes part in.
    pub fn appearance_count(&self, id: PlayerId) -> usize {
        self.games.iter().filter(|g| g.contains(id)).count()
    }

    /// Sum of `score_diff` across all games.
    pub fn total_score_diff(&self) -> f64 {
        self.games.iter().map(|g| g.score_diff).sum()
    }

    /// Pivots the schedule into a round × court grid for display sinks.
    ///
    /// Games within a round are numbered courts `1..=k` in schedule order;
    /// each cell is the game's two-line matchup label.
    pub fn round_view(&self, roster: &Roster) -> RoundView {
        let mut rows: Vec<RoundRow> = Vec::new();
        for game in &self.games {
            match rows.last_mut() {
                Some(row) if row.round == game.round => {
                    row.courts.push(game.matchup_label(roster));
                }
                _ => rows.push(RoundRow {
                    round: game.round,
                    courts: vec![game.matchup_label(roster)],
                }),
            }
        }
        RoundView { rows }
    }
}

/// Round × court pivot of a schedule.
///
/// Plain data for schedule sinks (sheet, HTML, file); no I/O here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    /// One row per round, ascending.
    pub rows: Vec<RoundRow>,
}

/// One round's games, indexed by court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRow {
    /// Round slot, 1-based.
    pub round: u32,
    /// Matchup labels; court `c` is `courts[c - 1]`.
    pub courts: Vec<String>,
}
