use thiserror::Error;

use crate::engine::domains::EmptyDomain;
use crate::engine::propagation::PropagatorKind;
use crate::instance::ExamId;
use crate::instance::InvigilatorId;
use crate::instance::SlotId;

/// The result of invoking a propagator. The propagation can either succeed or identify an
/// inconsistency, in which case the current search node has no solution.
pub type PropagationStatus = Result<(), Inconsistency>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A propagator tried to remove the last value of a variable.
    EmptyDomain,
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator which is not the result of an empty domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The propagator which identified the conflict.
    pub propagator: PropagatorKind,
    pub reason: ConflictReason,
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictReason {
    #[error("exam {exam} has {on_duty} invigilators on duty in slot {slot} but requires {required}")]
    TooManyInvigilators {
        exam: ExamId,
        slot: SlotId,
        on_duty: usize,
        required: usize,
    },
    #[error("invigilator {invigilator} is on duty for {num_exams} exams, at most {limit} allowed")]
    InvigilatorOverloaded {
        invigilator: InvigilatorId,
        num_exams: usize,
        limit: usize,
    },
    #[error("the exams still need {demand} invigilator duties but the pool can supply {capacity}")]
    InsufficientInvigilators { demand: usize, capacity: usize },
    #[error("slot {slot} needs {demand} invigilator duties but the pool has {pool_size} members")]
    SlotOverstaffed {
        slot: SlotId,
        demand: usize,
        pool_size: usize,
    },
}
