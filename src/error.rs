//! Error types for league scheduling.

use thiserror::Error;

/// Main error type for scheduling operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Roster rows failed validation.
    #[error("Invalid roster: {}", join_roster_errors(.0))]
    InvalidRoster(Vec<RosterError>),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filtering eliminated every game candidate.
    #[error("No game candidates remain after filtering{}", fmt_threshold(.threshold))]
    EmptyCandidateSet {
        /// Score threshold in effect when the set emptied, if any.
        threshold: Option<f64>,
    },

    /// A covered player has no candidate in some round, so the
    /// round quota is structurally impossible before solving.
    #[error("Player '{player}' has no candidate game in round {round}; the round quota cannot be met")]
    UnsatisfiableQuota {
        /// Player whose quota cannot be met.
        player: String,
        /// First round with no candidate for the player.
        round: u32,
    },

    /// The solver proved that no assignment satisfies the constraint set.
    #[error("No feasible assignment satisfies the constraint set")]
    SolverInfeasible,

    /// The solve time budget ran out before any feasible assignment was
    /// found. Distinct from a feasible-but-suboptimal return, which is
    /// treated as success.
    #[error("Solver time budget exhausted without finding a feasible assignment")]
    SolverTimeout,

    /// The solver backend failed (not an infeasibility verdict).
    #[error("Solver error: {0}")]
    Solver(String),
}

/// A single roster validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// Fewer than four active players; no legal game can be formed.
    #[error("Doubles play needs at least 4 active players, roster has {active}")]
    TooFewPlayers {
        /// Number of active rows found.
        active: usize,
    },

    /// Two active rows share the same player name.
    #[error("Duplicate player name: '{name}'")]
    DuplicatePlayer {
        /// The repeated name.
        name: String,
    },

    /// A rating is NaN or infinite.
    #[error("Player '{name}' has a non-finite rating")]
    InvalidRating {
        /// Player whose rating is unusable.
        name: String,
    },
}

/// Result type alias for scheduling operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

fn join_roster_errors(errors: &[RosterError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn fmt_threshold(threshold: &Option<f64>) -> String {
    match threshold {
        Some(t) => format!(" (score threshold {t})"),
        None => String::new(),
    }
}
