use std::fmt::Debug;
use std::fmt::Display;

use enum_map::Enum;

use crate::basic_types::PropagationStatus;
use crate::engine::domains::DomainStore;
use crate::instance::InstanceModel;

/// A propagator removes values from domains which will never be in any solution, or raises
/// explicit conflicts.
///
/// Propagators are stateless: every invocation inspects the current [`DomainStore`] from scratch.
/// They are not required to propagate until a fixed point; the [`ConstraintEngine`] calls them
/// again until no further pruning happens.
///
/// [`ConstraintEngine`]: super::ConstraintEngine
pub trait Propagator: Debug + Send {
    /// Identifies the constraint family the propagator enforces, used for statistics and logging.
    fn kind(&self) -> PropagatorKind;

    /// Removes values which are inconsistent with the constraint, or returns an
    /// [`Inconsistency`](crate::basic_types::Inconsistency) if the current domains cannot be
    /// extended to a solution.
    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus;

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }
}

/// The view a propagator gets on the problem and the current domains.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    pub instance: &'a InstanceModel,
    pub domains: &'a mut DomainStore,
}

impl<'a> PropagationContext<'a> {
    pub fn new(instance: &'a InstanceModel, domains: &'a mut DomainStore) -> Self {
        PropagationContext { instance, domains }
    }
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called.
///
/// Propagators with high priority are propagated before propagators with low(er) priority.
/// Propagators of the same priority are called in the order in which they were added.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    VeryLow,
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagatorKind {
    RoomCapacity,
    RoomSlotClash,
    StudentConflict,
    InvigilatorCount,
    InvigilatorLoad,
    InvigilatorAdjacency,
    SlotStaffing,
    SmallestFit,
}

impl Display for PropagatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The variant names double as the names of the propagators.
        Debug::fmt(self, f)
    }
}
