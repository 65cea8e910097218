//! Schedule extraction from a solved assignment.
//!
//! Walks the candidate list in variable order, keeps the selected ones,
//! and materializes each as a [`ScheduledGame`] with its score columns.
//! Scores are recomputed from the roster handed in, so callers that
//! scored against a jittered roster can extract against the original.

use crate::models::{Roster, Schedule, ScheduledGame};
use crate::program::{Assignment, VarId};

use super::CandidateSpace;

/// Builds the round-ordered schedule described by the selected variables.
///
/// Team and combined scores are exact rating sums; only the score
/// difference is rounded, to `precision` decimal places. Selection flags
/// beyond the candidate list are ignored.
pub fn extract_schedule(
    space: &CandidateSpace,
    assignment: &Assignment,
    roster: &Roster,
    precision: u32,
) -> Schedule {
    let mut schedule = Schedule::new();
    for (i, candidate) in space.candidates().iter().enumerate() {
        if !assignment.is_selected(VarId(i as u32)) {
            continue;
        }
        let matchup = space.matchup(candidate.matchup);
        let team1_score = matchup.team1().combined_rating(roster);
        let team2_score = matchup.team2().combined_rating(roster);
        schedule.add_game(ScheduledGame {
            round: candidate.round,
            team1: matchup.team1(),
            team2: matchup.team2(),
            team1_score,
            team2_score,
            combined_score: team1_score + team2_score,
            score_diff: round_to((team1_score - team2_score).abs(), precision),
        });
    }
    // Candidate order is already round-major; the stable sort pins the
    // round ordering without disturbing within-round court order.
    schedule.games.sort_by_key(|g| g.round);
    schedule
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    use crate::models::{PlayerId, RosterRow};

    fn roster_of(ratings: &[f64]) -> Roster {
        let rows: Vec<RosterRow> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| RosterRow::new(format!("P{i}"), r))
            .collect();
        Roster::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_extracts_selected_games_in_round_order() {
        let roster = roster_of(&[4.0, 4.1, 4.2, 4.3]);
        let config = ScheduleConfig::new(2);
        let space = CandidateSpace::build(&roster, &config);

        // 6 candidates: matchups 0..3 in round 1, then round 2. Pick
        // matchup 2 in round 1 and matchup 0 in round 2.
        let assignment = Assignment::new(vec![false, false, true, true, false, false]);
        let schedule = extract_schedule(&space, &assignment, &roster, 2);

        assert_eq!(schedule.game_count(), 2);
        assert_eq!(schedule.games[0].round, 1);
        assert_eq!(schedule.games[1].round, 2);
        assert_eq!(*space.matchup(space.candidates()[3].matchup), {
            let g = &schedule.games[1];
            crate::models::Matchup::new(g.team1, g.team2)
        });
    }

    #[test]
    fn test_only_score_diff_is_rounded() {
        // Ratings chosen so the raw difference carries long fractions.
        let roster = roster_of(&[4.005, 4.005, 4.1201, 4.13]);
        let config = ScheduleConfig::new(1);
        let space = CandidateSpace::build(&roster, &config);

        // Matchup 0 is {P0,P1} vs {P2,P3}: 8.01 vs 8.2501.
        let assignment = Assignment::new(vec![true, false, false]);
        let schedule = extract_schedule(&space, &assignment, &roster, 2);

        let game = &schedule.games[0];
        assert!((game.team1_score - 8.01).abs() < 1e-9);
        assert!((game.team2_score - 8.2501).abs() < 1e-9);
        assert!((game.combined_score - 16.2601).abs() < 1e-9);
        assert!((game.score_diff - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_scores_come_from_the_extraction_roster() {
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let roster = roster_of(&[4.0, 4.0, 5.0, 5.0]);
        let mut rng = SmallRng::seed_from_u64(7);
        let jittered = roster.jittered(0.01, &mut rng);

        let config = ScheduleConfig::new(1);
        let space = CandidateSpace::build(&jittered, &config);
        let assignment = Assignment::new(vec![true, false, false]);

        // Extracting against the original roster reports clean ratings
        // even though scoring saw the jittered ones.
        let schedule = extract_schedule(&space, &assignment, &roster, 2);
        assert!((schedule.games[0].team1_score - 8.0).abs() < 1e-12);
        assert!((schedule.games[0].team2_score - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_flags_beyond_candidates_are_ignored() {
        let roster = roster_of(&[4.0, 4.0, 5.0, 5.0]);
        let config = ScheduleConfig::new(1);
        let space = CandidateSpace::build(&roster, &config);

        let assignment = Assignment::new(vec![false, true, false, true, true]);
        let schedule = extract_schedule(&space, &assignment, &roster, 2);
        assert_eq!(schedule.game_count(), 1);
    }

    #[test]
    fn test_row_count_matches_quota() {
        let roster = roster_of(&[4.0, 4.1, 4.2, 4.3]);
        let config = ScheduleConfig::new(3);
        let space = CandidateSpace::build(&roster, &config);

        // One matchup per round: ids 0, 1, 2 across rounds 1..=3.
        let assignment = Assignment::new(vec![
            true, false, false, //
            false, true, false, //
            false, false, true,
        ]);
        let schedule = extract_schedule(&space, &assignment, &roster, 2);

        // n_games × players / 4 rows.
        assert_eq!(schedule.game_count(), 3);
        for id in 0..4 {
            assert_eq!(schedule.appearance_count(PlayerId(id)), 3);
        }
    }
}
