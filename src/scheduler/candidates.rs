//! Candidate-space generation.
//!
//! Enumerates all teams and legal matchups from a roster, scores each
//! matchup once, optionally prunes by score threshold, and expands the
//! survivors across every round. The result is the variable universe the
//! constraint builder works over.
//!
//! # Complexity
//! O(T²) over the team count before filtering. Large rosters should set a
//! score threshold, which prunes before the per-round expansion.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::ScheduleConfig;
use crate::models::{Candidate, Matchup, MatchupId, PlayerId, Roster, Team};

/// The candidate universe for one scheduling run.
///
/// Construction is deterministic for a given roster order: teams enumerate
/// in index order, matchups in team-pair order, candidates round-major
/// (all of round 1, then round 2, …).
#[derive(Debug, Clone)]
pub struct CandidateSpace {
    teams: Vec<Team>,
    matchups: Vec<Matchup>,
    scores: Vec<f64>,
    candidates: Vec<Candidate>,
    covered: Vec<PlayerId>,
    excluded: Vec<PlayerId>,
    n_games: u32,
    threshold: Option<f64>,
}

impl CandidateSpace {
    /// Generates the candidate space for a roster under a configuration.
    pub fn build(roster: &Roster, config: &ScheduleConfig) -> Self {
        let teams = enumerate_teams(roster);
        debug!(teams = teams.len(), "enumerated teams");

        let mut matchups = enumerate_matchups(&teams);
        let mut scores: Vec<f64> = matchups
            .iter()
            .map(|m| config.method.score(m, roster))
            .collect();
        debug!(matchups = matchups.len(), "enumerated legal matchups");

        if let Some(threshold) = config.score_threshold {
            let before = matchups.len();
            let mut kept_matchups = Vec::with_capacity(before);
            let mut kept_scores = Vec::with_capacity(before);
            for (matchup, score) in matchups.into_iter().zip(scores) {
                if score <= threshold {
                    kept_matchups.push(matchup);
                    kept_scores.push(score);
                }
            }
            debug!(
                before,
                after = kept_matchups.len(),
                threshold,
                "applied score threshold"
            );
            matchups = kept_matchups;
            scores = kept_scores;
        }

        // Quota and per-round constraints are emitted only for players that
        // still appear somewhere; keeping filtered-out players in them would
        // make the model infeasible by construction.
        let covered_set: BTreeSet<PlayerId> =
            matchups.iter().flat_map(|m| m.players()).collect();
        let covered: Vec<PlayerId> = covered_set.iter().copied().collect();
        let excluded: Vec<PlayerId> = roster
            .ids()
            .filter(|id| !covered_set.contains(id))
            .collect();
        if !excluded.is_empty() {
            let names: Vec<&str> = excluded.iter().map(|&id| roster.name(id)).collect();
            warn!(
                players = ?names,
                "score threshold left players with no candidate game"
            );
        }

        let mut candidates = Vec::with_capacity(matchups.len() * config.n_games as usize);
        for round in 1..=config.n_games {
            for idx in 0..matchups.len() {
                candidates.push(Candidate {
                    matchup: MatchupId(idx as u32),
                    round,
                });
            }
        }

        Self {
            teams,
            matchups,
            scores,
            candidates,
            covered,
            excluded,
            n_games: config.n_games,
            threshold: config.score_threshold,
        }
    }

    /// Drops candidates rejected by the predicate and recomputes the
    /// covered player set.
    ///
    /// Useful for availability pruning (a player or matchup ruled out of a
    /// specific round). Matchups and scores are untouched, so `MatchupId`s
    /// stay stable.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Candidate) -> bool,
    {
        self.candidates.retain(keep);

        let universe: BTreeSet<PlayerId> = self
            .covered
            .iter()
            .chain(self.excluded.iter())
            .copied()
            .collect();
        let covered_set: BTreeSet<PlayerId> = self
            .candidates
            .iter()
            .flat_map(|c| self.matchups[c.matchup.index()].players())
            .collect();
        self.covered = covered_set.iter().copied().collect();
        self.excluded = universe.difference(&covered_set).copied().collect();
    }

    /// All teams, in enumeration order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Surviving matchups, in enumeration order.
    pub fn matchups(&self) -> &[Matchup] {
        &self.matchups
    }

    /// The matchup behind an id.
    pub fn matchup(&self, id: MatchupId) -> &Matchup {
        &self.matchups[id.index()]
    }

    /// Imbalance score of a matchup.
    #[inline]
    pub fn score(&self, id: MatchupId) -> f64 {
        self.scores[id.index()]
    }

    /// All candidates, round-major. The candidate at position `i` becomes
    /// decision variable `i` in the assembled program.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidates survive.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Players appearing in at least one candidate, ascending.
    pub fn covered_players(&self) -> &[PlayerId] {
        &self.covered
    }

    /// Roster players with no surviving candidate, ascending.
    pub fn excluded_players(&self) -> &[PlayerId] {
        &self.excluded
    }

    /// Number of rounds the space was expanded over.
    pub fn n_games(&self) -> u32 {
        self.n_games
    }

    /// Score threshold applied at construction, if any.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }
}

/// All C(n,2) unordered teams, outer index before inner.
fn enumerate_teams(roster: &Roster) -> Vec<Team> {
    let n = roster.player_count() as u32;
    let mut teams = Vec::with_capacity(n as usize * (n as usize).saturating_sub(1) / 2);
    for a in 0..n {
        for b in (a + 1)..n {
            teams.push(Team::new(PlayerId(a), PlayerId(b)));
        }
    }
    teams
}

/// All unordered team pairs with disjoint player sets.
fn enumerate_matchups(teams: &[Team]) -> Vec<Matchup> {
    let mut matchups = Vec::new();
    for (i, &t1) in teams.iter().enumerate() {
        for &t2 in &teams[i + 1..] {
            if Matchup::disjoint(t1, t2) {
                matchups.push(Matchup::new(t1, t2));
            }
        }
    }
    matchups
}
