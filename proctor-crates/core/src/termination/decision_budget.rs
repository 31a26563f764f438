use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the scheduler has committed to a given number
/// of decisions. Unlike a [`TimeBudget`](super::TimeBudget) it stops every run of the same
/// instance at the same point.
#[derive(Debug, Copy, Clone)]
pub struct DecisionBudget {
    remaining: u64,
}

impl DecisionBudget {
    pub fn new(max_decisions: u64) -> Self {
        DecisionBudget {
            remaining: max_decisions,
        }
    }

    /// The number of decisions the scheduler may still make.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining == 0
    }

    fn decision_has_been_made(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_runs_out_after_the_given_decisions() {
        let mut budget = DecisionBudget::new(2);

        budget.decision_has_been_made();
        assert!(!budget.should_stop());

        budget.decision_has_been_made();
        assert!(budget.should_stop());
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn empty_budget_stops_before_any_decision() {
        assert!(DecisionBudget::new(0).should_stop());
    }
}
