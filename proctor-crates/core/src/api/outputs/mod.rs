//! The values returned by the [`Solver`](crate::Solver).

mod advisory;
mod schedule;

use std::time::Duration;

pub use advisory::Advisory;
pub use advisory::ItineraryEntry;
pub use advisory::Warning;
pub use advisory::OVERLOADED_STUDENT_EXAMS;
use enum_map::EnumMap;
pub use schedule::Assignment;
pub use schedule::InvigilatorAssignment;
pub use schedule::Placement;

use crate::engine::propagation::PropagatorKind;
use crate::statistics::Statistic;
use crate::statistics::SearchStatistics;
use crate::statistics::StatisticLogger;

/// The result of a call to [`Solver::solve`](crate::Solver::solve).
#[derive(Clone, Debug)]
#[allow(
    clippy::large_enum_variant,
    reason = "a solve produces a single outcome, boxing the solution buys nothing"
)]
pub enum SolveOutcome {
    /// A schedule satisfying every constraint was found.
    Solved(Solution),
    /// No schedule satisfies every constraint.
    Infeasible(SearchSummary),
    /// The time budget ran out before the search reached a conclusion.
    TimedOut(SearchSummary),
}

impl SolveOutcome {
    pub fn summary(&self) -> &SearchSummary {
        match self {
            SolveOutcome::Solved(solution) => &solution.summary,
            SolveOutcome::Infeasible(summary) | SolveOutcome::TimedOut(summary) => summary,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Infeasible(_) | SolveOutcome::TimedOut(_) => None,
        }
    }
}

/// A complete schedule.
#[derive(Clone, Debug)]
pub struct Solution {
    pub assignment: Assignment,
    pub invigilators: InvigilatorAssignment,
    pub advisory: Advisory,
    pub summary: SearchSummary,
}

/// What the search did, regardless of its outcome.
#[derive(Clone, Debug)]
pub struct SearchSummary {
    pub statistics: SearchStatistics,
    /// The number of values removed by every kind of propagator.
    pub prunings: EnumMap<PropagatorKind, u64>,
    /// The wall-clock time spent solving.
    pub elapsed: Duration,
}

impl SearchSummary {
    /// Logs the statistics through [`log_statistic`](crate::statistics::log_statistic).
    pub fn log_statistics(&self) {
        self.statistics.log(StatisticLogger::new("search"));

        let prunings = StatisticLogger::new("prunings");
        for (kind, count) in self.prunings.iter() {
            Statistic::log(count, prunings.attach_to_prefix(kind));
        }

        Statistic::log(
            &self.elapsed.as_millis(),
            StatisticLogger::new("time_spent_in_solver_ms"),
        );
    }
}
