//! Pairing-frequency analytics.
//!
//! Counts how often every player pair teams up and how often it faces
//! off, across a whole schedule. The grids double as an audit of the
//! partner and opponent caps: what the constraints promised, the counts
//! verify.

use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, Schedule, Team};
use crate::program::{Assignment, VarId};

use super::CandidateSpace;

/// Symmetric pair-count grid over the full roster.
///
/// Stored dense; `count(a, b) == count(b, a)` always, and the diagonal
/// stays zero since a player never pairs with themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairGrid {
    n: usize,
    counts: Vec<u32>,
}

impl PairGrid {
    /// Zeroed grid for `player_count` players.
    pub fn new(player_count: usize) -> Self {
        Self {
            n: player_count,
            counts: vec![0; player_count * player_count],
        }
    }

    /// Grid dimension.
    pub fn player_count(&self) -> usize {
        self.n
    }

    /// Times the pair occurred.
    #[inline]
    pub fn count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts[a.index() * self.n + b.index()]
    }

    /// Highest pair count in the grid.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn increment(&mut self, a: PlayerId, b: PlayerId) {
        self.counts[a.index() * self.n + b.index()] += 1;
        self.counts[b.index() * self.n + a.index()] += 1;
    }
}

/// Partner and opponent frequency grids for one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyReport {
    /// How often each pair played on the same team.
    pub partner: PairGrid,
    /// How often each pair played on opposite teams.
    pub opponent: PairGrid,
}

impl FrequencyReport {
    /// Tallies an extracted schedule.
    ///
    /// `player_count` must cover every player id appearing in the games.
    pub fn from_schedule(schedule: &Schedule, player_count: usize) -> Self {
        let mut report = Self::empty(player_count);
        for game in &schedule.games {
            report.record_game(game.team1, game.team2);
        }
        report
    }

    /// Tallies a raw assignment without extracting a schedule first.
    ///
    /// Produces the same grids as [`FrequencyReport::from_schedule`] over
    /// the extracted equivalent.
    pub fn from_assignment(
        space: &CandidateSpace,
        assignment: &Assignment,
        player_count: usize,
    ) -> Self {
        let mut report = Self::empty(player_count);
        for (i, candidate) in space.candidates().iter().enumerate() {
            if !assignment.is_selected(VarId(i as u32)) {
                continue;
            }
            let matchup = space.matchup(candidate.matchup);
            report.record_game(matchup.team1(), matchup.team2());
        }
        report
    }

    /// Whether every pair count respects the given caps.
    pub fn within_caps(&self, partner_cap: u32, opponent_cap: u32) -> bool {
        self.partner.max_count() <= partner_cap && self.opponent.max_count() <= opponent_cap
    }

    fn empty(player_count: usize) -> Self {
        Self {
            partner: PairGrid::new(player_count),
            opponent: PairGrid::new(player_count),
        }
    }

    /// One game contributes two partner pairs (one per side) and four
    /// opponent pairs (each cross pairing).
    fn record_game(&mut self, team1: Team, team2: Team) {
        self.partner.increment(team1.first(), team1.second());
        self.partner.increment(team2.first(), team2.second());
        for a in team1.players() {
            for b in team2.players() {
                self.opponent.increment(a, b);
            }
        }
    }
}
