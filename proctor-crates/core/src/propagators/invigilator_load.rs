use fnv::FnvHashSet;

use crate::basic_types::ConflictReason;
use crate::basic_types::PropagationStatus;
use crate::basic_types::PropagatorConflict;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::engine::domains::DutyState;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;
use crate::instance::ExamId;
use crate::instance::InvigilatorId;

/// The maximum number of distinct exams a single invigilator may supervise.
pub const MAX_EXAMS_PER_INVIGILATOR: usize = 2;

/// Limits the number of distinct exams every invigilator supervises.
///
/// An invigilator who reached the limit is taken off duty for every other exam. Additionally the
/// invigilators which are still needed by all exams together may not exceed what the pool can
/// still supply.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvigilatorLoadPropagator;

impl Propagator for InvigilatorLoadPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::InvigilatorLoad
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;

        let mut remaining_capacity = 0;
        let mut num_supervisors: KeyedVec<ExamId, usize> =
            KeyedVec::filled(instance.num_exams(), 0);
        for invigilator in domains.invigilators() {
            let supervised = supervised_exams(domains, invigilator);
            for &exam in supervised.iter() {
                num_supervisors[exam] += 1;
            }

            if supervised.len() > MAX_EXAMS_PER_INVIGILATOR {
                return Err(PropagatorConflict {
                    propagator: self.kind(),
                    reason: ConflictReason::InvigilatorOverloaded {
                        invigilator,
                        num_exams: supervised.len(),
                        limit: MAX_EXAMS_PER_INVIGILATOR,
                    },
                }
                .into());
            }

            if supervised.len() == MAX_EXAMS_PER_INVIGILATOR {
                let released = domains
                    .duties_of(invigilator)
                    .filter(|(duty, state)| {
                        *state == DutyState::Undecided && !supervised.contains(&duty.exam)
                    })
                    .map(|(duty, _)| duty)
                    .collect::<Vec<_>>();
                for duty in released {
                    let _ = domains.set_duty(duty, false)?;
                }
            }

            remaining_capacity += MAX_EXAMS_PER_INVIGILATOR - supervised.len();
        }

        let remaining_demand = instance
            .exams()
            .map(|exam| {
                instance
                    .required_invigilators(exam)
                    .saturating_sub(num_supervisors[exam])
            })
            .sum::<usize>();

        if remaining_demand > remaining_capacity {
            return Err(PropagatorConflict {
                propagator: self.kind(),
                reason: ConflictReason::InsufficientInvigilators {
                    demand: remaining_demand,
                    capacity: remaining_capacity,
                },
            }
            .into());
        }

        Ok(())
    }
}

/// The exams for which the invigilator is on duty in at least one slot.
fn supervised_exams(domains: &DomainStore, invigilator: InvigilatorId) -> FnvHashSet<ExamId> {
    domains
        .duties_of(invigilator)
        .filter(|(_, state)| *state == DutyState::OnDuty)
        .map(|(duty, _)| duty.exam)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::domains::Duty;
    use crate::engine::propagation::propagate_once;
    use crate::instance::InstanceModel;
    use crate::instance::SlotId;

    fn duty(invigilator: u32, exam: u32, slot: u32) -> Duty {
        Duty {
            invigilator: InvigilatorId::new(invigilator),
            exam: ExamId::new(exam),
            slot: SlotId::new(slot),
        }
    }

    /// Instance with the given number of single-student exams.
    fn instance(num_exams: usize, num_slots: usize) -> InstanceModel {
        InstanceModel::new(1, num_exams, num_slots, vec![5], std::iter::empty()).unwrap()
    }

    #[test]
    fn invigilator_at_the_limit_is_released_from_other_exams() {
        let instance = instance(3, 2);
        let mut domains = DomainStore::new(&instance, 2);
        let _ = domains.set_duty(duty(0, 0, 0), true).unwrap();
        let _ = domains.set_duty(duty(0, 1, 1), true).unwrap();

        assert_eq!(
            propagate_once(&InvigilatorLoadPropagator, &instance, &mut domains),
            Ok(true)
        );

        assert_eq!(domains.duty(duty(0, 2, 0)), DutyState::OffDuty);
        assert_eq!(domains.duty(duty(0, 2, 1)), DutyState::OffDuty);
        // Duties for the exams already supervised are left to the count constraint.
        assert_eq!(domains.duty(duty(0, 0, 1)), DutyState::Undecided);
        assert_eq!(domains.duty(duty(1, 2, 0)), DutyState::Undecided);
    }

    #[test]
    fn more_than_two_exams_is_a_conflict() {
        let instance = instance(3, 1);
        let mut domains = DomainStore::new(&instance, 2);
        for exam in 0..3 {
            let _ = domains.set_duty(duty(1, exam, 0), true).unwrap();
        }

        assert!(matches!(
            propagate_once(&InvigilatorLoadPropagator, &instance, &mut domains),
            Err(Inconsistency::Conflict(PropagatorConflict {
                reason: ConflictReason::InvigilatorOverloaded { num_exams: 3, .. },
                ..
            }))
        ));
    }

    #[test]
    fn demand_beyond_pool_capacity_is_a_conflict() {
        // Five exams of one invigilator each, while two invigilators can cover at most four.
        let instance = instance(5, 5);
        let mut domains = DomainStore::new(&instance, 2);

        assert_eq!(
            propagate_once(&InvigilatorLoadPropagator, &instance, &mut domains),
            Err(Inconsistency::Conflict(PropagatorConflict {
                propagator: PropagatorKind::InvigilatorLoad,
                reason: ConflictReason::InsufficientInvigilators {
                    demand: 5,
                    capacity: 4,
                },
            }))
        );
    }

    #[test]
    fn demand_within_pool_capacity_is_accepted() {
        let instance = instance(4, 5);
        let mut domains = DomainStore::new(&instance, 2);

        assert_eq!(
            propagate_once(&InvigilatorLoadPropagator, &instance, &mut domains),
            Ok(false)
        );
    }
}
