//! Team model: an unordered pair of players.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Roster};

/// An unordered pair of two distinct players.
///
/// Members are stored in canonical (ascending id) order, so structural
/// equality, hashing, and ordering coincide with unordered-pair equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Team {
    first: PlayerId,
    second: PlayerId,
}

impl Team {
    /// Creates a team; member order does not matter.
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        debug_assert_ne!(a, b, "a team needs two distinct players");
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lower-id member.
    #[inline]
    pub fn first(&self) -> PlayerId {
        self.first
    }

    /// Higher-id member.
    #[inline]
    pub fn second(&self) -> PlayerId {
        self.second
    }

    /// Both members in canonical order.
    pub fn players(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }

    /// Whether the player is on this team.
    #[inline]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.first == id || self.second == id
    }

    /// Sum of member ratings.
    pub fn combined_rating(&self, roster: &Roster) -> f64 {
        roster.rating(self.first) + roster.rating(self.second)
    }

    /// Display label, e.g. `"Ann and Ben"`.
    pub fn label(&self, roster: &Roster) -> String {
        format!("{} and {}", roster.name(self.first), roster.name(self.second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterRow;

    fn sample_roster() -> Roster {
        Roster::from_rows(&[
            RosterRow::new("Ann", 3.5),
            RosterRow::new("Ben", 4.0),
            RosterRow::new("Cal", 4.5),
            RosterRow::new("Dee", 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_team_is_canonical() {
        let t1 = Team::new(PlayerId(2), PlayerId(0));
        let t2 = Team::new(PlayerId(0), PlayerId(2));
        assert_eq!(t1, t2);
        assert_eq!(t1.first(), PlayerId(0));
        assert_eq!(t1.second(), PlayerId(2));
    }

    #[test]
    fn test_team_contains() {
        let t = Team::new(PlayerId(1), PlayerId(3));
        assert!(t.contains(PlayerId(1)));
        assert!(t.contains(PlayerId(3)));
        assert!(!t.contains(PlayerId(0)));
    }

    #[test]
    fn test_combined_rating() {
        let roster = sample_roster();
        let t = Team::new(PlayerId(0), PlayerId(3)); // Ann 3.5 + Dee 5.0
        assert!((t.combined_rating(&roster) - 8.5).abs() < 1e-12);
    }

    #[test]
    fn test_label() {
        let roster = sample_roster();
        let t = Team::new(PlayerId(2), PlayerId(1));
        assert_eq!(t.label(&roster), "Ben and Cal");
    }
}
