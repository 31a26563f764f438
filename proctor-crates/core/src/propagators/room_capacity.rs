use crate::basic_types::PropagationStatus;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;

/// Removes every room which is too small to seat all students of an exam.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomCapacityPropagator;

impl Propagator for RoomCapacityPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::RoomCapacity
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        for exam in instance.exams() {
            let enrollment = instance.enrollment(exam);
            let _ = context
                .domains
                .restrict(exam, |cell| instance.capacity(cell.room) >= enrollment)?;
        }
        Ok(())
    }
}
