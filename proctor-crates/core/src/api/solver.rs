use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;

use crate::api::outputs::SearchSummary;
use crate::api::outputs::SolveOutcome;
use crate::checking::check_solution;
use crate::engine::search::SearchFlag;
use crate::engine::search::SearchScheduler;
use crate::extraction::SolutionExtractor;
use crate::instance::InstanceModel;
use crate::proctor_assert_moderate;
use crate::termination::TerminationCondition;
use crate::termination::TimeBudget;

/// The number of invigilators available when no other pool size is configured.
pub const DEFAULT_INVIGILATOR_POOL_SIZE: usize = 10;

/// The options which can be passed to the [`Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    /// The number of invigilators which can be put on duty.
    pub invigilator_pool_size: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            invigilator_pool_size: DEFAULT_INVIGILATOR_POOL_SIZE,
        }
    }
}

/// Schedules exams in rooms and slots and assigns invigilators to them.
///
/// A solver holds no state between calls; the same solver can be used for many instances, and
/// separate solvers can run on separate threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Solver {
    options: SolverOptions,
}

impl Solver {
    pub fn with_options(options: SolverOptions) -> Solver {
        Solver { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Searches for a schedule satisfying every constraint until one is found, the instance is
    /// proven infeasible, or `termination` triggers.
    ///
    /// The result is deterministic: solving the same instance with the same options yields the
    /// same schedule, unless the search is stopped by the termination condition.
    pub fn solve(
        &self,
        instance: &InstanceModel,
        termination: &mut impl TerminationCondition,
    ) -> SolveOutcome {
        let started_at = Instant::now();
        debug!(
            "Solving {} exams over {} rooms and {} slots with {} invigilators",
            instance.num_exams(),
            instance.num_rooms(),
            instance.num_slots(),
            self.options.invigilator_pool_size
        );

        let mut scheduler = SearchScheduler::new(instance, self.options.invigilator_pool_size);
        let flag = scheduler.search(termination);

        let summary = SearchSummary {
            statistics: scheduler.statistics(),
            prunings: scheduler.engine().prunings().clone(),
            elapsed: started_at.elapsed(),
        };

        match flag {
            SearchFlag::Solved => {
                let solution = SolutionExtractor::new(instance, scheduler.domains()).extract(summary);
                proctor_assert_moderate!(
                    check_solution(instance, &solution.assignment, &solution.invigilators).is_ok(),
                    "The search produced a schedule which breaks a scheduling rule"
                );
                info!("Found a schedule in {} ms", solution.summary.elapsed.as_millis());
                SolveOutcome::Solved(solution)
            }
            SearchFlag::Exhausted => {
                info!("The instance is infeasible");
                SolveOutcome::Infeasible(summary)
            }
            SearchFlag::TimedOut => {
                info!("No conclusion within the time budget");
                SolveOutcome::TimedOut(summary)
            }
        }
    }
}

/// Solves the instance with the default [`SolverOptions`] within the given time budget.
pub fn solve(instance: &InstanceModel, time_budget: Duration) -> SolveOutcome {
    Solver::default().solve(instance, &mut TimeBudget::starting_now(time_budget))
}
