use crate::basic_types::PropagationStatus;
use crate::engine::domains::Duty;
use crate::engine::domains::DutyState;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;
use crate::instance::SlotId;

/// Prevents an invigilator from supervising two different exams in the same slot or in
/// consecutive slots.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvigilatorAdjacencyPropagator;

impl Propagator for InvigilatorAdjacencyPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::InvigilatorAdjacency
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;

        for invigilator in domains.invigilators() {
            let on_duty = domains
                .duties_of(invigilator)
                .filter(|(_, state)| *state == DutyState::OnDuty)
                .map(|(duty, _)| duty)
                .collect::<Vec<_>>();

            for duty in on_duty {
                let current = duty.slot.id();
                let clashing_slots = [
                    current.checked_sub(1),
                    Some(current),
                    current.checked_add(1),
                ]
                .into_iter()
                .flatten()
                .map(SlotId::new)
                .filter(|slot| (slot.id() as usize) < instance.num_slots());

                for slot in clashing_slots {
                    for exam in instance.exams().filter(|&exam| exam != duty.exam) {
                        let neighbour = Duty {
                            invigilator,
                            exam,
                            slot,
                        };
                        let _ = domains.set_duty(neighbour, false)?;
                    }
                }
            }
        }
        Ok(())
    }
}
