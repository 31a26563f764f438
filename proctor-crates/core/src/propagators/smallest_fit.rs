use crate::basic_types::PropagationStatus;
use crate::engine::domains::Cell;
use crate::engine::domains::DomainStore;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorKind;
use crate::instance::InstanceModel;

/// Places every exam in the smallest room that fits it.
///
/// An exam may only use a room in some slot if no room of smaller, yet sufficient, capacity stays
/// empty in that slot. A smaller room stays empty when no other exam can still be placed in it,
/// in which case every larger room in that slot is removed from the exam. Rooms of equal capacity
/// are interchangeable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmallestFitPropagator;

impl Propagator for SmallestFitPropagator {
    fn kind(&self) -> PropagatorKind {
        PropagatorKind::SmallestFit
    }

    fn propagate(&self, context: PropagationContext<'_>) -> PropagationStatus {
        let instance = context.instance;
        let domains = context.domains;
        let claimants = Claimants::count(instance, domains);

        for exam in instance.exams() {
            let enrollment = instance.enrollment(exam);

            // For every slot, the capacity of the smallest sufficient room which no other exam
            // can occupy.
            let largest_allowed = instance
                .slots()
                .map(|slot| {
                    instance
                        .rooms_by_capacity()
                        .iter()
                        .filter(|&&room| instance.capacity(room) >= enrollment)
                        .find(|&&room| {
                            let cell = Cell { room, slot };
                            let own_claim = usize::from(domains.contains(exam, cell));
                            claimants.of(cell) == own_claim
                        })
                        .map(|&room| instance.capacity(room))
                })
                .collect::<Vec<_>>();

            let _ = domains.restrict(exam, |cell| {
                largest_allowed[cell.slot.id() as usize]
                    .map_or(true, |capacity| instance.capacity(cell.room) <= capacity)
            })?;
        }
        Ok(())
    }
}

/// The number of exams which can still be placed in every cell.
#[derive(Debug)]
struct Claimants {
    num_slots: usize,
    counts: Vec<usize>,
}

impl Claimants {
    fn count(instance: &InstanceModel, domains: &DomainStore) -> Claimants {
        let num_slots = instance.num_slots();
        let mut counts = vec![0; instance.num_rooms() * num_slots];
        for exam in instance.exams() {
            for cell in domains.cells(exam) {
                counts[cell.room.id() as usize * num_slots + cell.slot.id() as usize] += 1;
            }
        }
        Claimants { num_slots, counts }
    }

    fn of(&self, cell: Cell) -> usize {
        self.counts[cell.room.id() as usize * self.num_slots + cell.slot.id() as usize]
    }
}
