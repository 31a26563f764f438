use crate::basic_types::PropagationStatus;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;

/// Keeps the exams of every student at least one free slot apart.
///
/// Once the slot of an exam is known, every exam sharing a student with it loses that slot and
/// both neighbouring slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct StudentConflictPropagator;

impl Propagator for StudentConflictPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::StudentConflict
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;

        for exam in instance.exams() {
            let Some(slot) = domains.fixed_slot(exam) else {
                continue;
            };

            for &other in instance.conflicting_exams(exam) {
                let _ = domains.restrict(other, |cell| cell.slot.distance(slot) > 1)?;
            }
        }
        Ok(())
    }
}
