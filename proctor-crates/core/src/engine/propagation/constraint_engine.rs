use enum_map::EnumMap;
use log::trace;

use super::PropagationContext;
use super::Propagator;
use super::PropagatorKind;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::DomainStore;
use crate::instance::InstanceModel;
use crate::proctor_assert_moderate;
use crate::propagators::InvigilatorAdjacencyPropagator;
use crate::propagators::InvigilatorCountPropagator;
use crate::propagators::InvigilatorLoadPropagator;
use crate::propagators::RoomCapacityPropagator;
use crate::propagators::RoomSlotClashPropagator;
use crate::propagators::SlotStaffingPropagator;
use crate::propagators::SmallestFitPropagator;
use crate::propagators::StudentConflictPropagator;

/// Runs a set of propagators over a [`DomainStore`] until none of them prunes anything.
#[derive(Debug)]
pub struct ConstraintEngine {
    /// Sorted by [`Propagator::priority`].
    propagators: Vec<Box<dyn Propagator>>,
    /// The number of values each kind of propagator has removed over the lifetime of the engine.
    prunings: EnumMap<PropagatorKind, u64>,
}

impl Default for ConstraintEngine {
    /// An engine enforcing every scheduling constraint.
    fn default() -> Self {
        ConstraintEngine::new(vec![
            Box::new(RoomCapacityPropagator),
            Box::new(RoomSlotClashPropagator),
            Box::new(StudentConflictPropagator),
            Box::new(InvigilatorCountPropagator),
            Box::new(InvigilatorAdjacencyPropagator),
            Box::new(SlotStaffingPropagator),
            Box::new(InvigilatorLoadPropagator),
            Box::new(SmallestFitPropagator),
        ])
    }
}

impl ConstraintEngine {
    pub fn new(mut propagators: Vec<Box<dyn Propagator>>) -> ConstraintEngine {
        propagators.sort_by_key(|propagator| propagator.priority());
        ConstraintEngine {
            propagators,
            prunings: EnumMap::default(),
        }
    }

    /// Applies all propagators until a fixed point is reached or an inconsistency is found.
    ///
    /// On an inconsistency the domains are left in a partially propagated state; the caller is
    /// expected to roll them back.
    pub fn propagate(
        &mut self,
        instance: &InstanceModel,
        domains: &mut DomainStore,
    ) -> PropagationStatus {
        loop {
            let mut changed = false;

            for propagator in self.propagators.iter() {
                let num_entries_before = domains.num_trail_entries();
                let status = propagator.propagate(PropagationContext::new(instance, domains));
                let num_pruned = domains.num_trail_entries() - num_entries_before;
                self.prunings[propagator.kind()] += num_pruned as u64;

                if let Err(inconsistency) = status {
                    trace!("{} found an inconsistency: {inconsistency:?}", propagator.kind());
                    return Err(inconsistency);
                }

                changed |= num_pruned > 0;
            }

            if !changed {
                break;
            }
        }

        proctor_assert_moderate!(
            self.is_at_fixed_point(instance, domains),
            "Propagation stopped before reaching a fixed point"
        );

        Ok(())
    }

    /// Whether running any single propagator on a copy of the domains would prune nothing.
    fn is_at_fixed_point(&self, instance: &InstanceModel, domains: &DomainStore) -> bool {
        self.propagators.iter().all(|propagator| {
            let mut copy = domains.clone();
            let status = propagator.propagate(PropagationContext::new(instance, &mut copy));
            status.is_ok() && copy.num_trail_entries() == domains.num_trail_entries()
        })
    }

    pub fn prunings(&self) -> &EnumMap<PropagatorKind, u64> {
        &self.prunings
    }
}

/// Runs a single propagator once, convenient for testing propagators in isolation.
#[cfg(test)]
pub(crate) fn propagate_once(
    propagator: &dyn Propagator,
    instance: &InstanceModel,
    domains: &mut DomainStore,
) -> Result<bool, crate::basic_types::Inconsistency> {
    let num_entries_before = domains.num_trail_entries();
    propagator.propagate(PropagationContext::new(instance, domains))?;
    Ok(domains.num_trail_entries() > num_entries_before)
}
