//! Matchup and candidate models.
//!
//! A matchup is a legal game: two teams with no shared player. A candidate
//! binds a matchup to a round slot; the solver picks a subset of candidates.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Roster, Team};

/// A legal game: two teams with disjoint player sets.
///
/// Teams are stored in canonical (ascending) order, so structural equality
/// coincides with unordered-pair equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Matchup {
    team1: Team,
    team2: Team,
}

impl Matchup {
    /// Creates a matchup; team order does not matter.
    pub fn new(a: Team, b: Team) -> Self {
        debug_assert!(Self::disjoint(a, b), "matchup teams must not share players");
        if a <= b {
            Self { team1: a, team2: b }
        } else {
            Self { team1: b, team2: a }
        }
    }

    /// Whether two teams share no player.
    pub fn disjoint(a: Team, b: Team) -> bool {
        !a.contains(b.first()) && !a.contains(b.second())
    }

    /// Lower-ordered team.
    #[inline]
    pub fn team1(&self) -> Team {
        self.team1
    }

    /// Higher-ordered team.
    #[inline]
    pub fn team2(&self) -> Team {
        self.team2
    }

    /// Both teams in canonical order.
    pub fn teams(&self) -> [Team; 2] {
        [self.team1, self.team2]
    }

    /// All four participating players.
    pub fn players(&self) -> [PlayerId; 4] {
        [
            self.team1.first(),
            self.team1.second(),
            self.team2.first(),
            self.team2.second(),
        ]
    }

    /// Whether the player takes part in this matchup.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.team1.contains(id) || self.team2.contains(id)
    }

    /// Whether both players are on the same side.
    pub fn same_team(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.team1.contains(a) && self.team1.contains(b))
            || (self.team2.contains(a) && self.team2.contains(b))
    }

    /// Whether the players face each other across sides.
    pub fn opposed(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.team1.contains(a) && self.team2.contains(b))
            || (self.team2.contains(a) && self.team1.contains(b))
    }

    /// Two-line display label, e.g. `"Ann and Ben\nCal and Dee"`.
    pub fn label(&self, roster: &Roster) -> String {
        format!("{}\n{}", self.team1.label(roster), self.team2.label(roster))
    }
}

/// Index of a matchup within a candidate space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MatchupId(pub u32);

impl MatchupId {
    /// Index into matchup-ordered storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A matchup bound to a specific round slot.
///
/// Rounds are 1-based. Candidates for the same matchup in different rounds
/// share one imbalance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// The matchup being offered.
    pub matchup: MatchupId,
    /// Round this candidate would occupy, `1..=n_games`.
    pub round: u32,
}
