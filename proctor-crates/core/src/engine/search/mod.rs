//! The backtracking driver of the engine.
//!
//! The scheduler alternates between choosing a decision (see [`branching`]) and propagating its
//! consequences. A decision which leads to an inconsistency is undone by rolling the
//! [`DomainStore`] back to the checkpoint taken just before it, after which the next value of the
//! same variable is tried. When a variable runs out of values, the decision of the enclosing
//! decision point is undone as well.

mod branching;

use log::debug;
use log::trace;

use self::branching::Decision;
use crate::basic_types::Checkpoint;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::DomainStore;
use crate::engine::propagation::ConstraintEngine;
use crate::instance::InstanceModel;
use crate::proctor_assert_simple;
use crate::statistics::SearchStatistics;
use crate::termination::TerminationCondition;

/// The terminal states of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchFlag {
    /// Every variable is fixed and all constraints hold.
    Solved,
    /// No assignment satisfies all constraints.
    Exhausted,
    /// The termination condition triggered before a conclusion was reached.
    TimedOut,
}

/// A variable which is being branched on, together with its values in the order they are tried.
#[derive(Debug)]
struct DecisionPoint {
    candidates: Vec<Decision>,
    next_candidate: usize,
    /// The checkpoint taken before the currently committed value was applied, if any.
    committed: Option<Checkpoint>,
}

impl DecisionPoint {
    fn new(candidates: Vec<Decision>) -> Self {
        DecisionPoint {
            candidates,
            next_candidate: 0,
            committed: None,
        }
    }

    fn next_value(&mut self) -> Option<Decision> {
        let decision = self.candidates.get(self.next_candidate).copied()?;
        self.next_candidate += 1;
        Some(decision)
    }
}

#[derive(Debug)]
pub(crate) struct SearchScheduler<'a> {
    instance: &'a InstanceModel,
    domains: DomainStore,
    engine: ConstraintEngine,
    decision_points: Vec<DecisionPoint>,
    statistics: SearchStatistics,
}

impl<'a> SearchScheduler<'a> {
    pub(crate) fn new(instance: &'a InstanceModel, num_invigilators: usize) -> Self {
        SearchScheduler {
            instance,
            domains: DomainStore::new(instance, num_invigilators),
            engine: ConstraintEngine::default(),
            decision_points: vec![],
            statistics: SearchStatistics::default(),
        }
    }

    pub(crate) fn domains(&self) -> &DomainStore {
        &self.domains
    }

    pub(crate) fn engine(&self) -> &ConstraintEngine {
        &self.engine
    }

    pub(crate) fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Searches for an assignment of every variable which satisfies all constraints.
    ///
    /// The termination condition is polled every time a new variable is about to be chosen and
    /// before every value that is tried.
    pub(crate) fn search(&mut self, termination: &mut impl TerminationCondition) -> SearchFlag {
        if let Some(exam) = self
            .instance
            .exams()
            .find(|&exam| self.domains.domain_size(exam) == 0)
        {
            debug!("Exam {exam} has no room and slot to take place in");
            return SearchFlag::Exhausted;
        }

        if let Err(inconsistency) = self.propagate() {
            debug!("Root propagation is inconsistent: {inconsistency:?}");
            return SearchFlag::Exhausted;
        }

        loop {
            if termination.should_stop() {
                debug!("Search stopped by the termination condition");
                return SearchFlag::TimedOut;
            }

            let Some(candidates) = branching::next_decisions(self.instance, &self.domains) else {
                proctor_assert_simple!(
                    self.domains.is_assigned(),
                    "No decision left while some variable is unassigned"
                );
                debug!(
                    "Found a schedule after {} decisions",
                    self.statistics.decisions
                );
                return SearchFlag::Solved;
            };

            self.decision_points.push(DecisionPoint::new(candidates));
            self.statistics.max_depth = self
                .statistics
                .max_depth
                .max(self.decision_points.len() as u64);

            if let Err(flag) = self.commit_next_value(termination) {
                return flag;
            }
        }
    }

    /// Commits to the next value of the innermost decision point which survives propagation.
    ///
    /// Decision points which run out of values are abandoned, undoing the committed value of the
    /// decision point enclosing them. Fails with [`SearchFlag::Exhausted`] once every decision
    /// point is abandoned.
    fn commit_next_value(
        &mut self,
        termination: &mut impl TerminationCondition,
    ) -> Result<(), SearchFlag> {
        loop {
            let Some(decision_point) = self.decision_points.last_mut() else {
                debug!("Search space exhausted");
                return Err(SearchFlag::Exhausted);
            };

            let Some(decision) = decision_point.next_value() else {
                let _ = self.decision_points.pop();
                self.statistics.backtracks += 1;

                if let Some(checkpoint) = self
                    .decision_points
                    .last_mut()
                    .and_then(|parent| parent.committed.take())
                {
                    self.domains.rollback(checkpoint);
                }
                continue;
            };

            if termination.should_stop() {
                debug!("Search stopped by the termination condition");
                return Err(SearchFlag::TimedOut);
            }

            let checkpoint = self.domains.checkpoint();
            self.statistics.decisions += 1;
            termination.decision_has_been_made();
            trace!("Decision at depth {}: {decision}", checkpoint.depth());

            match self.apply(decision).and_then(|_| self.propagate()) {
                Ok(()) => {
                    if let Some(decision_point) = self.decision_points.last_mut() {
                        decision_point.committed = Some(checkpoint);
                    }
                    return Ok(());
                }
                Err(inconsistency) => {
                    trace!("Decision {decision} failed: {inconsistency:?}");
                    self.statistics.conflicts += 1;
                    self.domains.rollback(checkpoint);
                }
            }
        }
    }

    fn apply(&mut self, decision: Decision) -> PropagationStatus {
        let _ = match decision {
            Decision::Place { exam, cell } => self.domains.fix_cell(exam, cell)?,
            Decision::Staff { duty, on_duty } => self.domains.set_duty(duty, on_duty)?,
        };
        Ok(())
    }

    fn propagate(&mut self) -> PropagationStatus {
        self.statistics.propagation_rounds += 1;
        self.engine.propagate(self.instance, &mut self.domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checking::check_solution;
    use crate::extraction::SolutionExtractor;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    #[test]
    fn unconstrained_exams_are_scheduled_without_conflicts() {
        let instance =
            InstanceModel::new(3, 3, 3, vec![4, 2], [(0, 0), (1, 1), (2, 2), (0, 1)]).unwrap();
        let mut scheduler = SearchScheduler::new(&instance, 10);

        assert_eq!(scheduler.search(&mut Indefinite), SearchFlag::Solved);
        assert!(scheduler.domains().is_assigned());

        let (assignment, invigilators) =
            SolutionExtractor::new(&instance, scheduler.domains()).extract_schedule();
        assert_eq!(check_solution(&instance, &assignment, &invigilators), Ok(()));
    }

    #[test]
    fn conflicting_exams_without_enough_slots_are_exhausted() {
        let instance = InstanceModel::new(1, 2, 2, vec![5], [(0, 0), (1, 0)]).unwrap();
        let mut scheduler = SearchScheduler::new(&instance, 10);

        assert_eq!(scheduler.search(&mut Indefinite), SearchFlag::Exhausted);
        assert!(scheduler.statistics().conflicts > 0);
        assert_eq!(scheduler.domains().num_checkpoints(), 0);
    }

    #[test]
    fn zero_slots_are_exhausted_without_decisions() {
        let instance = InstanceModel::new(1, 1, 0, vec![5], [(0, 0)]).unwrap();
        let mut scheduler = SearchScheduler::new(&instance, 10);

        assert_eq!(scheduler.search(&mut Indefinite), SearchFlag::Exhausted);
        assert_eq!(scheduler.statistics().decisions, 0);
    }

    #[test]
    fn decision_budget_stops_the_search() {
        let instance = InstanceModel::new(0, 4, 4, vec![5, 5], std::iter::empty()).unwrap();
        let mut scheduler = SearchScheduler::new(&instance, 10);

        assert_eq!(
            scheduler.search(&mut DecisionBudget::new(2)),
            SearchFlag::TimedOut
        );
        assert_eq!(scheduler.statistics().decisions, 2);
    }
}
