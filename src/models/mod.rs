//! League domain models.
//!
//! Core data types for doubles round-robin scheduling, from roster input
//! to the final schedule. All are plain, serializable values; derived
//! artifacts (teams, matchups, candidates) are rebuilt fresh per run.
//!
//! # Entities
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Player` / `Roster` | Validated, active-only rated participants |
//! | `Team` | Unordered pair of two distinct players |
//! | `Matchup` | Two teams with disjoint player sets (a legal game) |
//! | `Candidate` | A matchup bound to a round slot |
//! | `Schedule` / `ScheduledGame` | Solver-selected games with score columns |
//! | `RoundView` | Round × court pivot for display sinks |

mod matchup;
mod player;
mod schedule;
mod team;

pub use matchup::{Candidate, Matchup, MatchupId};
pub use player::{Player, PlayerId, Roster, RosterRow};
pub use schedule::{RoundRow, RoundView, Schedule, ScheduledGame};
pub use team::Team;
