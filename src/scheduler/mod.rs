//! Scheduling engine and pipeline stages.
//!
//! Provides candidate generation, schedule extraction, pairing analytics,
//! and the [`LeagueScheduler`] facade that runs the whole pipeline.
//!
//! # Algorithm
//!
//! Balancing a doubles round-robin is treated as 0/1 selection: one
//! binary variable per (matchup, round) candidate, minimizing the total
//! rating imbalance of the selected games subject to quota, per-round,
//! and pairing-cap constraints. Each stage is public on its own for
//! callers that intervene between them (availability pruning, a custom
//! backend); the facade composes the common path.
//!
//! # References
//!
//! - Colbourn & Dinitz (2007), "Handbook of Combinatorial Designs", Ch. VI.51
//! - Wolsey (1998), "Integer Programming", Ch. 1

mod analytics;
mod candidates;
mod extract;

pub use analytics::{FrequencyReport, PairGrid};
pub use candidates::CandidateSpace;
pub use extract::extract_schedule;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{Roster, Schedule};
use crate::program::{ProgramBuilder, SolveOutcome, Solver, SolverConfig, VarId};

/// Proof level of a returned schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveQuality {
    /// The backend proved no schedule scores lower.
    Optimal,
    /// The backend stopped at its budget holding a valid incumbent.
    Feasible,
}

/// A solved schedule with its quality and fairness audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedSchedule {
    /// Round-ordered games.
    pub schedule: Schedule,
    /// Whether optimality was proven.
    pub quality: SolveQuality,
    /// Objective value: sum of selected matchup scores, unrounded.
    pub total_imbalance: f64,
    /// Partner and opponent frequency grids over the full roster.
    pub report: FrequencyReport,
    /// Players the score threshold left without a single candidate game,
    /// by name.
    pub excluded_players: Vec<String>,
}

/// One-stop scheduling engine.
///
/// # Example
/// ```
/// use u_league::config::ScheduleConfig;
/// use u_league::models::{Roster, RosterRow};
/// use u_league::program::{MicrolpSolver, SolverConfig};
/// use u_league::scheduler::LeagueScheduler;
///
/// let roster = Roster::from_rows(&[
///     RosterRow::new("Ann", 4.0),
///     RosterRow::new("Ben", 4.0),
///     RosterRow::new("Cal", 5.0),
///     RosterRow::new("Dee", 5.0),
/// ]).unwrap();
///
/// let engine = LeagueScheduler::new(ScheduleConfig::new(1)).unwrap();
/// let solved = engine
///     .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
///     .unwrap();
/// assert_eq!(solved.schedule.game_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LeagueScheduler {
    config: ScheduleConfig,
}

impl LeagueScheduler {
    /// Creates an engine after validating the configuration.
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Runs the full pipeline for a roster on the given backend.
    pub fn schedule<S: Solver>(
        &self,
        roster: &Roster,
        solver: &S,
        solver_config: &SolverConfig,
    ) -> Result<SolvedSchedule> {
        let space = CandidateSpace::build(roster, &self.config);
        self.schedule_candidates(roster, &space, solver, solver_config)
    }

    /// Runs assembly, solve, extraction, and analytics over a prepared
    /// candidate space. Use directly when the space was pruned first.
    pub fn schedule_candidates<S: Solver>(
        &self,
        roster: &Roster,
        space: &CandidateSpace,
        solver: &S,
        solver_config: &SolverConfig,
    ) -> Result<SolvedSchedule> {
        let program = ProgramBuilder::new(roster, space, &self.config).build()?;
        info!(
            vars = program.var_count(),
            constraints = program.constraint_count(),
            "solving league program"
        );

        let (assignment, quality) = match solver.solve(&program, solver_config)? {
            SolveOutcome::Optimal(a) => (a, SolveQuality::Optimal),
            SolveOutcome::Feasible(a) => (a, SolveQuality::Feasible),
            SolveOutcome::Infeasible => return Err(ScheduleError::SolverInfeasible),
            SolveOutcome::TimedOut => return Err(ScheduleError::SolverTimeout),
        };

        let total_imbalance: f64 = space
            .candidates()
            .iter()
            .enumerate()
            .filter(|&(i, _)| assignment.is_selected(VarId(i as u32)))
            .map(|(_, c)| space.score(c.matchup))
            .sum();
        let schedule = extract_schedule(space, &assignment, roster, self.config.score_precision);
        let report = FrequencyReport::from_schedule(&schedule, roster.player_count());
        let excluded_players: Vec<String> = space
            .excluded_players()
            .iter()
            .map(|&id| roster.name(id).to_string())
            .collect();

        info!(
            games = schedule.game_count(),
            quality = ?quality,
            total_imbalance,
            "league schedule extracted"
        );

        Ok(SolvedSchedule {
            schedule,
            quality,
            total_imbalance,
            report,
            excluded_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerId, RosterRow, ScheduledGame, Team};
    use crate::program::{Assignment, MicrolpSolver, Program};

    fn roster_of(ratings: &[f64]) -> Roster {
        let rows: Vec<RosterRow> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| RosterRow::new(format!("P{i}"), r))
            .collect();
        Roster::from_rows(&rows).unwrap()
    }

    /// Backend stub that always reports the same outcome.
    struct FixedOutcome(SolveOutcome);

    impl Solver for FixedOutcome {
        fn solve(&self, _: &Program, _: &SolverConfig) -> Result<SolveOutcome> {
            Ok(self.0.clone())
        }
    }

    /// Backend stub that must never be reached.
    struct NeverCalled;

    impl Solver for NeverCalled {
        fn solve(&self, _: &Program, _: &SolverConfig) -> Result<SolveOutcome> {
            unreachable!("assembly failures must surface before the solve")
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = LeagueScheduler::new(ScheduleConfig::new(0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_candidates_fail_before_solving() {
        // Every split of {1,2,3,5} scores at least 1.
        let roster = roster_of(&[1.0, 2.0, 3.0, 5.0]);
        let config = ScheduleConfig::new(1).with_score_threshold(0.0);
        let engine = LeagueScheduler::new(config).unwrap();

        let err = engine
            .schedule(&roster, &NeverCalled, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyCandidateSet { .. }));
    }

    #[test]
    fn test_single_round_picks_most_balanced_split() {
        let roster = roster_of(&[4.0, 4.0, 5.0, 5.0]);
        let engine = LeagueScheduler::new(ScheduleConfig::new(1)).unwrap();

        let solved = engine
            .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
            .unwrap();

        assert_eq!(solved.quality, SolveQuality::Optimal);
        assert_eq!(solved.schedule.game_count(), 1);
        assert!((solved.total_imbalance - 0.0).abs() < 1e-9);

        // Pairing the two 4.0s together scores 2; a mixed split scores 0.
        let game = &solved.schedule.games[0];
        assert_ne!(game.team1, Team::new(PlayerId(0), PlayerId(1)));
        assert!((game.score_diff - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_round_robin_respects_caps() {
        let roster = roster_of(&[4.0, 4.1, 4.2, 4.3]);
        let config = ScheduleConfig::new(3).with_partner_cap(1).with_opponent_cap(2);
        let engine = LeagueScheduler::new(config).unwrap();

        let solved = engine
            .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
            .unwrap();

        // With 4 players and partner cap 1, all three splits play once.
        assert_eq!(solved.schedule.game_count(), 3);
        for round in 1..=3 {
            assert_eq!(solved.schedule.games_for_round(round).len(), 1);
        }
        for id in 0..4 {
            assert_eq!(solved.schedule.appearance_count(PlayerId(id)), 3);
        }
        assert!(solved.report.within_caps(1, 2));
        assert_eq!(solved.report.partner.max_count(), 1);
        assert_eq!(solved.report.opponent.max_count(), 2);
    }

    #[test]
    fn test_opponent_cap_can_be_unsatisfiable() {
        // Two rounds contribute 8 opponent pair-slots; 6 pairs at cap 1
        // only allow 6.
        let roster = roster_of(&[4.0, 4.1, 4.2, 4.3]);
        let config = ScheduleConfig::new(2).with_opponent_cap(1);
        let engine = LeagueScheduler::new(config).unwrap();

        let err = engine
            .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::SolverInfeasible));
    }

    #[test]
    fn test_partner_cap_can_be_unsatisfiable() {
        // Four rounds need four distinct partners per player; only three
        // exist.
        let roster = roster_of(&[4.0, 4.1, 4.2, 4.3]);
        let config = ScheduleConfig::new(4).with_partner_cap(1).with_opponent_cap(4);
        let engine = LeagueScheduler::new(config).unwrap();

        let err = engine
            .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::SolverInfeasible));
    }

    #[test]
    fn test_feasible_incumbent_counts_as_success() {
        let roster = roster_of(&[4.0, 4.0, 5.0, 5.0]);
        let engine = LeagueScheduler::new(ScheduleConfig::new(1)).unwrap();

        let stub = FixedOutcome(SolveOutcome::Feasible(Assignment::new(vec![
            true, false, false,
        ])));
        let solved = engine
            .schedule(&roster, &stub, &SolverConfig::default())
            .unwrap();

        assert_eq!(solved.quality, SolveQuality::Feasible);
        assert_eq!(solved.schedule.game_count(), 1);
    }

    #[test]
    fn test_timeout_surfaces_as_error() {
        let roster = roster_of(&[4.0, 4.0, 5.0, 5.0]);
        let engine = LeagueScheduler::new(ScheduleConfig::new(1)).unwrap();

        let stub = FixedOutcome(SolveOutcome::TimedOut);
        let err = engine
            .schedule(&roster, &stub, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::SolverTimeout));
    }

    #[test]
    fn test_threshold_exclusions_are_reported() {
        // The 9.0 outlier only appears in games scoring 8.
        let roster = roster_of(&[1.0, 1.0, 1.0, 1.0, 9.0]);
        let config = ScheduleConfig::new(1).with_score_threshold(0.5);
        let engine = LeagueScheduler::new(config).unwrap();

        let solved = engine
            .schedule(&roster, &MicrolpSolver::new(), &SolverConfig::default())
            .unwrap();

        assert_eq!(solved.excluded_players, vec!["P4".to_string()]);
        assert_eq!(solved.schedule.game_count(), 1);
        assert_eq!(solved.schedule.appearance_count(PlayerId(4)), 0);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        // Threshold prunes the 8-player space down to the 78 zero-score
        // candidates before solving.
        let roster = roster_of(&[1.0, 1.0, 1.0, 1.0, 9.0, 9.0, 9.0, 9.0]);
        let config = ScheduleConfig::new(1).with_score_threshold(0.5);
        let engine = LeagueScheduler::new(config).unwrap();
        let solver = MicrolpSolver::new();

        let first = engine
            .schedule(&roster, &solver, &SolverConfig::default())
            .unwrap();
        let second = engine
            .schedule(&roster, &solver, &SolverConfig::default())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.schedule.game_count(), 2);
        assert!((first.total_imbalance - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_schedule_satisfies_quota_properties() {
        // Synthetic 16-player, 5-round rotation: round k chunks the
        // rotated roster into four games of four.
        let ratings: Vec<f64> = (0..16).map(|i| 3.0 + 0.1 * f64::from(i)).collect();
        let roster = roster_of(&ratings);

        let mut schedule = Schedule::new();
        for k in 0..5u32 {
            let order: Vec<u32> = (0..16).map(|i| (i + k) % 16).collect();
            for chunk in order.chunks(4) {
                let team1 = Team::new(PlayerId(chunk[0]), PlayerId(chunk[1]));
                let team2 = Team::new(PlayerId(chunk[2]), PlayerId(chunk[3]));
                let t1 = team1.combined_rating(&roster);
                let t2 = team2.combined_rating(&roster);
                schedule.add_game(ScheduledGame {
                    round: k + 1,
                    team1,
                    team2,
                    team1_score: t1,
                    team2_score: t2,
                    combined_score: t1 + t2,
                    score_diff: (t1 - t2).abs(),
                });
            }
        }

        // n_games × players / 4 rows; every player exactly once per round.
        assert_eq!(schedule.game_count(), 20);
        for id in 0..16 {
            assert_eq!(schedule.appearance_count(PlayerId(id)), 5);
            for round in 1..=5 {
                let in_round = schedule
                    .games_for_round(round)
                    .iter()
                    .filter(|g| g.contains(PlayerId(id)))
                    .count();
                assert_eq!(in_round, 1);
            }
        }
        for round in 1..=5 {
            assert_eq!(schedule.games_for_round(round).len(), 4);
        }

        // Every appearance contributes one partner and two opponents.
        let report = FrequencyReport::from_schedule(&schedule, 16);
        for a in 0..16 {
            let partners: u32 = (0..16)
                .map(|b| report.partner.count(PlayerId(a), PlayerId(b)))
                .sum();
            let opponents: u32 = (0..16)
                .map(|b| report.opponent.count(PlayerId(a), PlayerId(b)))
                .sum();
            assert_eq!(partners, 5);
            assert_eq!(opponents, 10);
        }

        let view = schedule.round_view(&roster);
        assert_eq!(view.rows.len(), 5);
        assert!(view.rows.iter().all(|row| row.courts.len() == 4));
    }
}
