use crate::basic_types::ConflictReason;
use crate::basic_types::PropagationStatus;
use crate::basic_types::PropagatorConflict;
use crate::engine::domains::Duty;
use crate::engine::domains::DutyState;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;
use crate::instance::SlotId;

/// Ensures that every exam is supervised by exactly the required number of invigilators, all of
/// them in the slot the exam takes place in.
///
/// - duties for slots which are no longer a candidate slot of the exam are forced off;
/// - candidate slots in which fewer invigilators than required can still be on duty are removed;
/// - once the slot is fixed, the remaining duties are forced off when the quota is met, or forced
///   on when exactly the quota of candidates remains.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvigilatorCountPropagator;

impl Propagator for InvigilatorCountPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::InvigilatorCount
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;

        for exam in instance.exams() {
            let required = instance.required_invigilators(exam);

            for slot in instance.slots() {
                if domains.has_slot(exam, slot) {
                    continue;
                }
                for invigilator in domains.invigilators() {
                    let duty = Duty {
                        invigilator,
                        exam,
                        slot,
                    };
                    let _ = domains.set_duty(duty, false)?;
                }
            }

            let understaffed_slots = domains
                .candidate_slots(exam)
                .filter(|&slot| {
                    domains
                        .duties_at(exam, slot)
                        .filter(|(_, state)| state.can_be_on_duty())
                        .count()
                        < required
                })
                .collect::<Vec<SlotId>>();
            if !understaffed_slots.is_empty() {
                let _ = domains.restrict(exam, |cell| !understaffed_slots.contains(&cell.slot))?;
            }

            let Some(slot) = domains.fixed_slot(exam) else {
                continue;
            };

            let (on_duty, undecided): (Vec<_>, Vec<_>) = domains
                .duties_at(exam, slot)
                .filter(|(_, state)| state.can_be_on_duty())
                .partition(|(_, state)| *state == DutyState::OnDuty);

            if on_duty.len() > required {
                return Err(PropagatorConflict {
                    propagator: self.kind(),
                    reason: ConflictReason::TooManyInvigilators {
                        exam,
                        slot,
                        on_duty: on_duty.len(),
                        required,
                    },
                }
                .into());
            }

            if on_duty.len() == required {
                for (duty, _) in undecided {
                    let _ = domains.set_duty(duty, false)?;
                }
            } else if on_duty.len() + undecided.len() == required {
                for (duty, _) in undecided {
                    let _ = domains.set_duty(duty, true)?;
                }
            }
        }
        Ok(())
    }
}
