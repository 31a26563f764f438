use crate::basic_types::ConflictReason;
use crate::basic_types::PropagationStatus;
use crate::basic_types::PropagatorConflict;
use crate::engine::domains::DutyState;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;

/// Limits the number of invigilator duties in a single slot to the size of the pool.
///
/// Exams whose slot is fixed reserve their required number of invigilators in that slot. A slot
/// is removed from an exam whose requirement no longer fits next to these reservations, and once
/// the pool is fully on duty in a slot every other duty in it is forced off.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotStaffingPropagator;

impl Propagator for SlotStaffingPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::SlotStaffing
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;
        let pool_size = domains.num_invigilators();

        for slot in instance.slots() {
            let count_on_duty = |exam| {
                domains
                    .duties_at(exam, slot)
                    .filter(|(_, state)| *state == DutyState::OnDuty)
                    .count()
            };

            let mut num_on_duty = 0;
            let mut reserved = 0;
            let mut unplaced = vec![];
            for exam in instance.exams() {
                let on_duty = count_on_duty(exam);
                num_on_duty += on_duty;

                if domains.fixed_slot(exam) == Some(slot) {
                    reserved += on_duty.max(instance.required_invigilators(exam));
                } else {
                    reserved += on_duty;
                    if domains.has_slot(exam, slot) {
                        unplaced.push((exam, on_duty));
                    }
                }
            }

            if reserved > pool_size {
                return Err(PropagatorConflict {
                    propagator: self.kind(),
                    reason: ConflictReason::SlotOverstaffed {
                        slot,
                        demand: reserved,
                        pool_size,
                    },
                }
                .into());
            }

            for (exam, on_duty) in unplaced {
                let additional = instance.required_invigilators(exam).saturating_sub(on_duty);
                if reserved + additional > pool_size {
                    let _ = domains.restrict(exam, |cell| cell.slot != slot)?;
                }
            }

            if num_on_duty == pool_size {
                let released = instance
                    .exams()
                    .flat_map(|exam| domains.duties_at(exam, slot))
                    .filter(|(_, state)| *state == DutyState::Undecided)
                    .map(|(duty, _)| duty)
                    .collect::<Vec<_>>();
                for duty in released {
                    let _ = domains.set_duty(duty, false)?;
                }
            }
        }
        Ok(())
    }
}
