//! Solver contract and the bundled backend.
//!
//! The scheduler hands a [`Program`] to anything implementing [`Solver`]
//! and gets back a [`SolveOutcome`]. The crate ships [`MicrolpSolver`],
//! a pure-Rust branch-and-bound backend built on `good_lp`'s `microlp`
//! feature. Alternative backends (CBC, HiGHS, a remote service) plug in
//! by implementing the trait.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};

use super::{Assignment, Comparison, Program};

/// Runtime budget handed to a backend.
///
/// Defaults mirror a patient interactive run: ten minutes of wall time
/// and an absolute gap of 2.0. Backends that cannot honor a knob accept
/// it and note the fact; [`MicrolpSolver`] always proves optimality and
/// treats the gaps as advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock budget. `None` lets the solve run unbounded.
    pub time_limit: Option<Duration>,
    /// Acceptable absolute gap between incumbent and bound.
    pub gap_abs: Option<f64>,
    /// Acceptable relative gap between incumbent and bound.
    pub gap_rel: Option<f64>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self {
            time_limit: Some(Duration::from_secs(600)),
            gap_abs: Some(2.0),
            gap_rel: None,
        }
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the absolute optimality gap.
    pub fn with_gap_abs(mut self, gap: f64) -> Self {
        self.gap_abs = Some(gap);
        self
    }

    /// Sets the relative optimality gap.
    pub fn with_gap_rel(mut self, gap: f64) -> Self {
        self.gap_rel = Some(gap);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What a backend reports for one solve.
///
/// `Feasible` is a success: the backend stopped at its budget holding an
/// incumbent that satisfies every constraint, without a proof of
/// optimality. Only `Infeasible` and `TimedOut` leave the caller without
/// a usable assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Proven-best assignment.
    Optimal(Assignment),
    /// Constraint-satisfying assignment without an optimality proof.
    Feasible(Assignment),
    /// The constraints admit no assignment at all.
    Infeasible,
    /// The budget elapsed before any incumbent was found.
    TimedOut,
}

/// A 0/1 program backend.
pub trait Solver {
    /// Runs the program within the configured budget.
    ///
    /// Errors are reserved for the backend itself breaking (process
    /// failure, lost worker) — a well-posed program that merely has no
    /// solution reports [`SolveOutcome::Infeasible`].
    fn solve(&self, program: &Program, config: &SolverConfig) -> Result<SolveOutcome>;
}

/// Bundled pure-Rust backend.
///
/// Runs `microlp` branch-and-bound to optimality. The time limit is
/// enforced by a watchdog: the solve runs on a worker thread and the
/// caller waits on a channel, so a blowup in the search tree cannot
/// wedge the scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }

    fn solve_with_deadline(program: Program, limit: Duration) -> Result<SolveOutcome> {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("u-league-solve".into())
            .spawn(move || {
                let _ = tx.send(Self::solve_program(&program));
            })
            .map_err(|e| ScheduleError::Solver(format!("failed to spawn solver thread: {e}")))?;

        match rx.recv_timeout(limit) {
            Ok(result) => {
                let _ = worker.join();
                result
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The worker keeps running detached; its late result is
                // dropped along with the channel.
                warn!(
                    limit_secs = limit.as_secs_f64(),
                    "solve hit the time limit"
                );
                Ok(SolveOutcome::TimedOut)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ScheduleError::Solver(
                "solver thread exited before reporting a result".into(),
            )),
        }
    }

    fn solve_program(program: &Program) -> Result<SolveOutcome> {
        let mut vars = ProblemVariables::new();
        let xs = vars.add_vector(variable().binary(), program.num_vars as usize);

        let objective: Expression = program
            .objective
            .terms
            .iter()
            .map(|&(v, w)| w * xs[v.index()])
            .sum();

        let mut model = vars.minimise(objective).using(good_lp::microlp);
        for row in &program.constraints {
            let lhs: Expression = row
                .expr
                .terms
                .iter()
                .map(|&(v, w)| w * xs[v.index()])
                .sum();
            model = model.with(match row.cmp {
                Comparison::Le => constraint::leq(lhs, row.rhs),
                Comparison::Eq => constraint::eq(lhs, row.rhs),
                Comparison::Ge => constraint::geq(lhs, row.rhs),
            });
        }

        match model.solve() {
            Ok(solution) => {
                let selected = xs.iter().map(|&x| solution.value(x) > 0.5).collect();
                Ok(SolveOutcome::Optimal(Assignment::new(selected)))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(e) => Err(ScheduleError::Solver(e.to_string())),
        }
    }
}

impl Solver for MicrolpSolver {
    fn solve(&self, program: &Program, config: &SolverConfig) -> Result<SolveOutcome> {
        if config.gap_abs.is_some() || config.gap_rel.is_some() {
            debug!("microlp solves to optimality; gap tolerances are accepted but unused");
        }
        match config.time_limit {
            Some(limit) => Self::solve_with_deadline(program.clone(), limit),
            None => Self::solve_program(program),
        }
    }
}
