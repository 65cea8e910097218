//! Player and roster models.
//!
//! A roster is the validated, active-only list of rated players for one
//! scheduling run. Players are addressed by [`PlayerId`], a dense index
//! into the roster, so downstream grids and constraint indices stay
//! vector-backed instead of keyed by name.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::validation;

/// Dense index of a player within a [`Roster`].
///
/// Ids are assigned in roster order at construction and are only
/// meaningful against the roster that produced them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Index into roster-ordered storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An active, rated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player name.
    pub name: String,
    /// Skill rating.
    pub rating: f64,
}

/// One row from a roster source (sheet, file, request body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Player name.
    pub name: String,
    /// Skill rating.
    pub rating: f64,
    /// Whether the player is available for this run.
    pub active: bool,
}

impl RosterRow {
    /// Creates an active row.
    pub fn new(name: impl Into<String>, rating: f64) -> Self {
        Self {
            name: name.into(),
            rating,
            active: true,
        }
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Validated, active-only roster for a scheduling run.
///
/// Immutable once constructed; a run never mutates player data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Builds a roster from source rows.
    ///
    /// Keeps active rows only, in input order. Fails with
    /// [`ScheduleError::InvalidRoster`] if validation finds fewer than
    /// four active players, duplicate names, or non-finite ratings.
    pub fn from_rows(rows: &[RosterRow]) -> Result<Self> {
        validation::validate_roster(rows).map_err(ScheduleError::InvalidRoster)?;
        let players = rows
            .iter()
            .filter(|r| r.active)
            .map(|r| Player {
                name: r.name.clone(),
                rating: r.rating,
            })
            .collect();
        Ok(Self { players })
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// All players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len() as u32).map(PlayerId)
    }

    /// The player behind an id.
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Player name lookup.
    pub fn name(&self, id: PlayerId) -> &str {
        &self.players[id.index()].name
    }

    /// Player rating lookup.
    #[inline]
    pub fn rating(&self, id: PlayerId) -> f64 {
        self.players[id.index()].rating
    }

    /// Returns a copy with every rating scaled by `1 + u`, `u` drawn
    /// uniformly from `[0, magnitude)`.
    ///
    /// Small jitter (e.g. `0.01`) breaks ties between equal-imbalance
    /// schedules so repeated runs on the same roster vary. Non-positive
    /// magnitudes return an unmodified copy.
    pub fn jittered<R: Rng>(&self, magnitude: f64, rng: &mut R) -> Roster {
        if magnitude <= 0.0 {
            return self.clone();
        }
        let players = self
            .players
            .iter()
            .map(|p| Player {
                name: p.name.clone(),
                rating: p.rating * (1.0 + rng.random_range(0.0..magnitude)),
            })
            .collect();
        Self { players }
    }
}
