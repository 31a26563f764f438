use crate::basic_types::PropagationStatus;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;

/// Ensures that no two exams occupy the same room in the same slot: once an exam is fixed to a
/// cell, that cell is removed from every other exam.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomSlotClashPropagator;

impl Propagator for RoomSlotClashPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::RoomSlotClash
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;

        for exam in instance.exams() {
            let Some(cell) = domains.fixed_cell(exam) else {
                continue;
            };

            for other in instance.exams().filter(|&other| other != exam) {
                let _ = domains.remove_cell(other, cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::domains::Cell;
    use crate::engine::domains::DomainStore;
    use crate::engine::propagation::propagate_once;
    use crate::instance::ExamId;
    use crate::instance::InstanceModel;
    use crate::instance::RoomId;
    use crate::instance::SlotId;

    fn cell(room: u32, slot: u32) -> Cell {
        Cell {
            room: RoomId::new(room),
            slot: SlotId::new(slot),
        }
    }

    #[test]
    fn fixed_cell_is_removed_from_other_exams() {
        let instance = InstanceModel::new(0, 3, 2, vec![5, 5], std::iter::empty()).unwrap();
        let mut domains = DomainStore::new(&instance, 1);
        let _ = domains.fix_cell(ExamId::new(0), cell(1, 0)).unwrap();

        assert_eq!(
            propagate_once(&RoomSlotClashPropagator, &instance, &mut domains),
            Ok(true)
        );

        assert!(domains.contains(ExamId::new(0), cell(1, 0)));
        assert!(!domains.contains(ExamId::new(1), cell(1, 0)));
        assert!(!domains.contains(ExamId::new(2), cell(1, 0)));
        assert_eq!(domains.domain_size(ExamId::new(1)), 3);
    }

    #[test]
    fn two_exams_fixed_to_the_same_cell_clash() {
        let instance = InstanceModel::new(0, 2, 2, vec![5], std::iter::empty()).unwrap();
        let mut domains = DomainStore::new(&instance, 1);
        let _ = domains.fix_cell(ExamId::new(0), cell(0, 1)).unwrap();
        let _ = domains.fix_cell(ExamId::new(1), cell(0, 1)).unwrap();

        assert_eq!(
            propagate_once(&RoomSlotClashPropagator, &instance, &mut domains),
            Err(Inconsistency::EmptyDomain)
        );
    }
}
