//! Doubles round-robin league scheduling.
//!
//! Builds fair doubles schedules for a rated roster: every player plays a
//! fixed number of games, exactly one per round, with caps on how often
//! any two players partner or face each other. Fairness is optimized by
//! minimizing the total rating imbalance across selected games.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Player`, `Roster`, `Team`, `Matchup`,
//!   `Candidate`, `Schedule`
//! - **`validation`**: Roster integrity checks (size, duplicates, ratings)
//! - **`scoring`**: Matchup imbalance scoring methods
//! - **`config`**: Engine configuration and its validation
//! - **`program`**: 0/1 program representation, constraint assembly, and
//!   the solver contract with the bundled `microlp` backend
//! - **`scheduler`**: Candidate generation, extraction, pairing analytics,
//!   and the `LeagueScheduler` facade
//!
//! # Pipeline
//!
//! Roster → candidate space (teams → matchups → scored → thresholded →
//! per-round expansion) → 0/1 program → solve → schedule extraction →
//! frequency analytics.
//!
//! # References
//!
//! - Colbourn & Dinitz (2007), "Handbook of Combinatorial Designs"
//! - Anderson (1997), "Combinatorial Designs and Tournaments"
//! - Wolsey (1998), "Integer Programming"

pub mod config;
pub mod error;
pub mod models;
pub mod program;
pub mod scheduler;
pub mod scoring;
pub mod validation;
