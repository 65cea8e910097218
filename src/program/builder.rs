//! Constraint assembly for the league program.
//!
//! Translates a candidate space into a 0/1 program: one binary variable
//! per candidate, a minimize-total-imbalance objective, and five
//! constraint families:
//!
//! 1. Score ceiling — per candidate, `score · x ≤ 1`.
//! 2. Round quota — per covered player, total selected games `= n_games`.
//! 3. One game per round — per covered player per round, exactly one.
//! 4. Partner cap — per player pair, same-team selections `≤ cap`.
//! 5. Opponent cap — per player pair, opposed selections `≤ cap`.
//!
//! Indices from player, (player, round), and pair to candidate variables
//! are built in a single pass over the candidate list, so assembly stays
//! near-linear in candidate count.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{Roster, Team};
use crate::scheduler::CandidateSpace;

use super::{LinearConstraint, LinearExpr, Program, VarId};

/// Per-variable score cap. A candidate whose score alone exceeds this is
/// unselectable at the model level, whether or not a pre-filter ran.
const SCORE_CEILING: f64 = 1.0;

/// Builds a 0/1 program from a candidate space.
///
/// The builder only assembles; it never solves. It fails fast when the
/// model would be broken by construction: an empty candidate set, or a
/// covered player with no candidate in some round.
///
/// # Example
/// ```
/// use u_league::config::ScheduleConfig;
/// use u_league::models::{Roster, RosterRow};
/// use u_league::program::ProgramBuilder;
/// use u_league::scheduler::CandidateSpace;
///
/// let roster = Roster::from_rows(&[
///     RosterRow::new("Ann", 4.0),
///     RosterRow::new("Ben", 4.0),
///     RosterRow::new("Cal", 5.0),
///     RosterRow::new("Dee", 5.0),
/// ]).unwrap();
/// let config = ScheduleConfig::new(1);
/// let space = CandidateSpace::build(&roster, &config);
///
/// let program = ProgramBuilder::new(&roster, &space, &config).build().unwrap();
/// assert_eq!(program.var_count(), 3);
/// ```
pub struct ProgramBuilder<'a> {
    roster: &'a Roster,
    space: &'a CandidateSpace,
    config: &'a ScheduleConfig,
}

impl<'a> ProgramBuilder<'a> {
    /// Creates a builder over a roster, its candidate space, and the run
    /// configuration.
    pub fn new(roster: &'a Roster, space: &'a CandidateSpace, config: &'a ScheduleConfig) -> Self {
        Self {
            roster,
            space,
            config,
        }
    }

    /// Assembles the program.
    pub fn build(&self) -> Result<Program> {
        if self.space.is_empty() {
            return Err(ScheduleError::EmptyCandidateSet {
                threshold: self.space.threshold(),
            });
        }

        let index = CandidateIndex::new(self.space, self.roster.player_count());
        self.check_quotas(&index)?;

        let candidates = self.space.candidates();
        let mut objective = LinearExpr::new();
        let mut constraints = Vec::new();

        // Score ceiling, one row per candidate.
        for (i, candidate) in candidates.iter().enumerate() {
            let var = VarId(i as u32);
            let score = self.space.score(candidate.matchup);
            objective.push(var, score);
            constraints.push(LinearConstraint::leq(
                format!("score_ceiling:c{i}"),
                LinearExpr::term(var, score),
                SCORE_CEILING,
            ));
        }

        // Round quota per covered player.
        for &player in self.space.covered_players() {
            constraints.push(LinearConstraint::eq(
                format!("round_quota:{}", self.roster.name(player)),
                LinearExpr::sum_of(index.by_player[player.index()].iter().copied()),
                f64::from(self.config.n_games),
            ));
        }

        // One game per round per covered player.
        for &player in self.space.covered_players() {
            for round in 1..=self.space.n_games() {
                let vars = &index.by_player_round[player.index()][(round - 1) as usize];
                constraints.push(LinearConstraint::eq(
                    format!("one_per_round:{}:r{round}", self.roster.name(player)),
                    LinearExpr::sum_of(vars.iter().copied()),
                    1.0,
                ));
            }
        }

        // Partner cap per pair with at least one same-team candidate.
        // Pair maps are BTree-ordered so the row order is reproducible.
        for (pair, vars) in &index.partner_pairs {
            constraints.push(LinearConstraint::leq(
                format!("partner_cap:{}", pair_name(self.roster, pair)),
                LinearExpr::sum_of(vars.iter().copied()),
                f64::from(self.config.partner_cap),
            ));
        }

        // Opponent cap per pair with at least one opposed candidate.
        for (pair, vars) in &index.opponent_pairs {
            constraints.push(LinearConstraint::leq(
                format!("opponent_cap:{}", pair_name(self.roster, pair)),
                LinearExpr::sum_of(vars.iter().copied()),
                f64::from(self.config.opponent_cap),
            ));
        }

        debug!(
            vars = candidates.len(),
            constraints = constraints.len(),
            "assembled league program"
        );

        Ok(Program {
            num_vars: candidates.len() as u32,
            objective,
            constraints,
        })
    }

    /// Pre-check: every covered player needs a candidate in every round,
    /// or the round quota is impossible before the solver ever runs.
    fn check_quotas(&self, index: &CandidateIndex) -> Result<()> {
        for &player in self.space.covered_players() {
            for round in 1..=self.space.n_games() {
                if index.by_player_round[player.index()][(round - 1) as usize].is_empty() {
                    return Err(ScheduleError::UnsatisfiableQuota {
                        player: self.roster.name(player).to_string(),
                        round,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Candidate lookup indices, built in one pass.
///
/// Player pairs are keyed by [`Team`] — the same canonical unordered-pair
/// value the rest of the crate uses — in ordered maps so iteration, and
/// with it the emitted row order, is deterministic.
struct CandidateIndex {
    /// player → variables touching the player.
    by_player: Vec<Vec<VarId>>,
    /// player → round slot → variables for the player in that round.
    by_player_round: Vec<Vec<Vec<VarId>>>,
    /// pair → variables where both are on the same side.
    partner_pairs: BTreeMap<Team, Vec<VarId>>,
    /// pair → variables where the two face each other.
    opponent_pairs: BTreeMap<Team, Vec<VarId>>,
}

impl CandidateIndex {
    fn new(space: &CandidateSpace, player_count: usize) -> Self {
        let rounds = space.n_games() as usize;
        let mut by_player = vec![Vec::new(); player_count];
        let mut by_player_round = vec![vec![Vec::new(); rounds]; player_count];
        let mut partner_pairs: BTreeMap<Team, Vec<VarId>> = BTreeMap::new();
        let mut opponent_pairs: BTreeMap<Team, Vec<VarId>> = BTreeMap::new();

        for (i, candidate) in space.candidates().iter().enumerate() {
            let var = VarId(i as u32);
            let matchup = space.matchup(candidate.matchup);
            let round_slot = (candidate.round - 1) as usize;

            for player in matchup.players() {
                by_player[player.index()].push(var);
                by_player_round[player.index()][round_slot].push(var);
            }

            let [team1, team2] = matchup.teams();
            partner_pairs.entry(team1).or_default().push(var);
            partner_pairs.entry(team2).or_default().push(var);
            for a in team1.players() {
                for b in team2.players() {
                    opponent_pairs.entry(Team::new(a, b)).or_default().push(var);
                }
            }
        }

        Self {
            by_player,
            by_player_round,
            partner_pairs,
            opponent_pairs,
        }
    }
}

fn pair_name(roster: &Roster, pair: &Team) -> String {
    format!(
        "{}|{}",
        roster.name(pair.first()),
        roster.name(pair.second())
    )
}
