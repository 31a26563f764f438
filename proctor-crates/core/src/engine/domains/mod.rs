//! The candidate values of every decision variable, with trail-based undo.
//!
//! There are two kinds of variables:
//! - for every exam, the set of `(room, slot)` [`Cell`]s it may still be placed in; the candidate
//!   rooms and candidate slots of an exam are projections of this joint domain;
//! - for every `(invigilator, exam, slot)` [`Duty`], a tri-state [`DutyState`].
//!
//! Domains only ever shrink. Every removal is recorded on a trail so that [`DomainStore::rollback`]
//! can restore the state at an earlier [`Checkpoint`] in time proportional to the number of
//! changes made since.

mod values;

pub use values::Cell;
pub use values::Duty;
pub use values::DutyState;

use crate::basic_types::Checkpoint;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::instance::ExamId;
use crate::instance::InstanceModel;
use crate::instance::InvigilatorId;
use crate::instance::RoomId;
use crate::instance::SlotId;
use crate::proctor_assert_simple;

/// Returned when an operation would leave a variable without any candidate value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

#[derive(Clone, Copy, Debug)]
enum DomainChange {
    CellRemoved { exam: ExamId, cell_index: usize },
    DutyFixed { duty_index: usize },
}

#[derive(Clone, Debug)]
pub struct DomainStore {
    num_exams: usize,
    num_rooms: usize,
    num_slots: usize,
    num_invigilators: usize,
    /// One block of `num_rooms * num_slots` flags per exam.
    cells: Vec<bool>,
    domain_sizes: KeyedVec<ExamId, usize>,
    /// Indexed by `(invigilator, exam, slot)`, see [`DomainStore::duty_index`].
    duties: Vec<DutyState>,
    trail: Trail<DomainChange>,
}

impl DomainStore {
    /// Creates the initial store in which every exam may take every cell and every duty is
    /// undecided.
    pub fn new(instance: &InstanceModel, num_invigilators: usize) -> DomainStore {
        let num_exams = instance.num_exams();
        let num_rooms = instance.num_rooms();
        let num_slots = instance.num_slots();
        let cells_per_exam = num_rooms * num_slots;

        DomainStore {
            num_exams,
            num_rooms,
            num_slots,
            num_invigilators,
            cells: vec![true; num_exams * cells_per_exam],
            domain_sizes: KeyedVec::filled(num_exams, cells_per_exam),
            duties: vec![DutyState::Undecided; num_invigilators * num_exams * num_slots],
            trail: Trail::default(),
        }
    }

    pub fn num_invigilators(&self) -> usize {
        self.num_invigilators
    }

    pub fn invigilators(&self) -> impl Iterator<Item = InvigilatorId> {
        (0..self.num_invigilators).map(InvigilatorId::create_from_index)
    }

    fn slots(&self) -> impl Iterator<Item = SlotId> {
        (0..self.num_slots).map(SlotId::create_from_index)
    }

    fn cell_index(&self, exam: ExamId, cell: Cell) -> usize {
        (exam.index() * self.num_rooms + cell.room.index()) * self.num_slots + cell.slot.index()
    }

    fn duty_index(&self, duty: Duty) -> usize {
        (duty.invigilator.index() * self.num_exams + duty.exam.index()) * self.num_slots
            + duty.slot.index()
    }

    pub fn contains(&self, exam: ExamId, cell: Cell) -> bool {
        self.cells[self.cell_index(exam, cell)]
    }

    /// The number of cells remaining in the domain of the exam.
    pub fn domain_size(&self, exam: ExamId) -> usize {
        self.domain_sizes[exam]
    }

    pub fn is_fixed(&self, exam: ExamId) -> bool {
        self.domain_size(exam) == 1
    }

    /// The remaining cells of the exam, ordered by room id and then by slot.
    pub fn cells(&self, exam: ExamId) -> impl Iterator<Item = Cell> + '_ {
        let num_slots = self.num_slots;
        let start = exam.index() * self.num_rooms * num_slots;
        self.cells[start..start + self.num_rooms * num_slots]
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(move |(offset, _)| Cell {
                room: RoomId::create_from_index(offset / num_slots),
                slot: SlotId::create_from_index(offset % num_slots),
            })
    }

    /// The cell of the exam if its domain is a singleton.
    pub fn fixed_cell(&self, exam: ExamId) -> Option<Cell> {
        if self.is_fixed(exam) {
            self.cells(exam).next()
        } else {
            None
        }
    }

    /// Whether the exam can still take place in the given slot.
    pub fn has_slot(&self, exam: ExamId, slot: SlotId) -> bool {
        (0..self.num_rooms)
            .map(RoomId::create_from_index)
            .any(|room| self.contains(exam, Cell { room, slot }))
    }

    /// The slots the exam can still take place in, in ascending order.
    pub fn candidate_slots(&self, exam: ExamId) -> impl Iterator<Item = SlotId> + '_ {
        self.slots().filter(move |&slot| self.has_slot(exam, slot))
    }

    /// The rooms the exam can still take place in, in ascending order of id.
    pub fn candidate_rooms(&self, exam: ExamId) -> impl Iterator<Item = RoomId> + '_ {
        (0..self.num_rooms)
            .map(RoomId::create_from_index)
            .filter(move |&room| {
                self.slots()
                    .any(|slot| self.contains(exam, Cell { room, slot }))
            })
    }

    /// The slot of the exam if all of its remaining cells share the same slot, even if the room
    /// is still open.
    pub fn fixed_slot(&self, exam: ExamId) -> Option<SlotId> {
        let mut slots = self.candidate_slots(exam);
        let slot = slots.next()?;
        if slots.next().is_none() {
            Some(slot)
        } else {
            None
        }
    }

    /// Removes every cell of the exam for which `keep` returns false.
    ///
    /// Returns whether the domain changed. If no cell would remain, nothing is removed and
    /// [`EmptyDomain`] is returned. The predicate may be called more than once per cell and should
    /// therefore be pure.
    pub fn restrict(
        &mut self,
        exam: ExamId,
        mut keep: impl FnMut(Cell) -> bool,
    ) -> Result<bool, EmptyDomain> {
        let num_remaining = self.cells(exam).filter(|&cell| keep(cell)).count();
        if num_remaining == 0 {
            return Err(EmptyDomain);
        }
        if num_remaining == self.domain_size(exam) {
            return Ok(false);
        }

        let removed = self
            .cells(exam)
            .filter(|&cell| !keep(cell))
            .map(|cell| self.cell_index(exam, cell))
            .collect::<Vec<_>>();
        for cell_index in removed {
            self.cells[cell_index] = false;
            self.trail
                .push(DomainChange::CellRemoved { exam, cell_index });
        }
        self.domain_sizes[exam] = num_remaining;

        Ok(true)
    }

    /// Removes a single cell from the domain of the exam.
    pub fn remove_cell(&mut self, exam: ExamId, cell: Cell) -> Result<bool, EmptyDomain> {
        if !self.contains(exam, cell) {
            return Ok(false);
        }
        if self.is_fixed(exam) {
            return Err(EmptyDomain);
        }

        let cell_index = self.cell_index(exam, cell);
        self.cells[cell_index] = false;
        self.domain_sizes[exam] -= 1;
        self.trail
            .push(DomainChange::CellRemoved { exam, cell_index });

        Ok(true)
    }

    /// Reduces the domain of the exam to the single given cell.
    pub fn fix_cell(&mut self, exam: ExamId, cell: Cell) -> Result<bool, EmptyDomain> {
        if !self.contains(exam, cell) {
            return Err(EmptyDomain);
        }
        self.restrict(exam, |candidate| candidate == cell)
    }

    pub fn duty(&self, duty: Duty) -> DutyState {
        self.duties[self.duty_index(duty)]
    }

    /// Decides whether the invigilator is on duty.
    ///
    /// Returns whether the state changed, or [`EmptyDomain`] if the duty was already decided the
    /// other way.
    pub fn set_duty(&mut self, duty: Duty, on_duty: bool) -> Result<bool, EmptyDomain> {
        let duty_index = self.duty_index(duty);
        let target = DutyState::from(on_duty);
        match self.duties[duty_index] {
            DutyState::Undecided => {
                self.duties[duty_index] = target;
                self.trail.push(DomainChange::DutyFixed { duty_index });
                Ok(true)
            }
            state if state == target => Ok(false),
            _ => Err(EmptyDomain),
        }
    }

    /// The state of every invigilator's duty for the exam in the given slot.
    pub fn duties_at(
        &self,
        exam: ExamId,
        slot: SlotId,
    ) -> impl Iterator<Item = (Duty, DutyState)> + '_ {
        self.invigilators().map(move |invigilator| {
            let duty = Duty {
                invigilator,
                exam,
                slot,
            };
            (duty, self.duty(duty))
        })
    }

    /// The state of every duty of the invigilator, ordered by exam and then by slot.
    pub fn duties_of(
        &self,
        invigilator: InvigilatorId,
    ) -> impl Iterator<Item = (Duty, DutyState)> + '_ {
        (0..self.num_exams)
            .map(ExamId::create_from_index)
            .flat_map(move |exam| {
                self.slots().map(move |slot| {
                    let duty = Duty {
                        invigilator,
                        exam,
                        slot,
                    };
                    (duty, self.duty(duty))
                })
            })
    }

    /// Whether every exam is fixed to one cell and every duty is decided.
    pub fn is_assigned(&self) -> bool {
        self.domain_sizes.iter().all(|&size| size == 1)
            && self
                .duties
                .iter()
                .all(|&state| state != DutyState::Undecided)
    }

    pub fn checkpoint(&mut self) -> Checkpoint {
        self.trail.checkpoint()
    }

    /// Restores the domains to their state at the moment `checkpoint` was taken. Checkpoints taken
    /// after it are released as well.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        for change in self.trail.rollback(checkpoint) {
            match change {
                DomainChange::CellRemoved { exam, cell_index } => {
                    self.cells[cell_index] = true;
                    self.domain_sizes[exam] += 1;
                }
                DomainChange::DutyFixed { duty_index } => {
                    self.duties[duty_index] = DutyState::Undecided;
                }
            }
        }
        proctor_assert_simple!(self.trail.num_checkpoints() == checkpoint.depth());
    }

    pub fn num_checkpoints(&self) -> usize {
        self.trail.num_checkpoints()
    }

    /// The number of changes recorded since the store was created; a propagator which leaves this
    /// number untouched did not prune anything.
    pub fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(num_rooms: usize, num_slots: usize) -> DomainStore {
        let instance =
            InstanceModel::new(1, 2, num_slots, vec![10; num_rooms], [(0, 0), (1, 0)]).unwrap();
        DomainStore::new(&instance, 2)
    }

    fn cell(room: u32, slot: u32) -> Cell {
        Cell {
            room: RoomId::new(room),
            slot: SlotId::new(slot),
        }
    }

    fn duty(invigilator: u32, exam: u32, slot: u32) -> Duty {
        Duty {
            invigilator: InvigilatorId::new(invigilator),
            exam: ExamId::new(exam),
            slot: SlotId::new(slot),
        }
    }

    const EXAM: ExamId = ExamId::new(0);

    #[test]
    fn initial_domain_contains_every_cell() {
        let store = store(2, 3);

        assert_eq!(store.domain_size(EXAM), 6);
        assert_eq!(
            store.cells(EXAM).collect::<Vec<_>>(),
            vec![
                cell(0, 0),
                cell(0, 1),
                cell(0, 2),
                cell(1, 0),
                cell(1, 1),
                cell(1, 2)
            ]
        );
        assert_eq!(store.fixed_cell(EXAM), None);
        assert_eq!(store.fixed_slot(EXAM), None);
    }

    #[test]
    fn restrict_reports_whether_the_domain_changed() {
        let mut store = store(2, 3);

        assert_eq!(store.restrict(EXAM, |cell| cell.slot.id() != 2), Ok(true));
        assert_eq!(store.restrict(EXAM, |cell| cell.slot.id() != 2), Ok(false));
        assert_eq!(store.domain_size(EXAM), 4);
    }

    #[test]
    fn emptying_restriction_leaves_domain_untouched() {
        let mut store = store(2, 3);

        assert_eq!(store.restrict(EXAM, |_| false), Err(EmptyDomain));
        assert_eq!(store.domain_size(EXAM), 6);
        assert_eq!(store.num_trail_entries(), 0);
    }

    #[test]
    fn fixed_slot_is_detected_before_room_is_fixed() {
        let mut store = store(2, 3);

        let _ = store.restrict(EXAM, |cell| cell.slot.id() == 1).unwrap();

        assert_eq!(store.fixed_slot(EXAM), Some(SlotId::new(1)));
        assert_eq!(store.fixed_cell(EXAM), None);
        assert_eq!(
            store.candidate_slots(EXAM).collect::<Vec<_>>(),
            vec![SlotId::new(1)]
        );
    }

    #[test]
    fn removing_the_last_cell_fails() {
        let mut store = store(1, 2);

        assert_eq!(store.remove_cell(EXAM, cell(0, 0)), Ok(true));
        assert_eq!(store.remove_cell(EXAM, cell(0, 0)), Ok(false));
        assert_eq!(store.remove_cell(EXAM, cell(0, 1)), Err(EmptyDomain));
        assert_eq!(store.fixed_cell(EXAM), Some(cell(0, 1)));
    }

    #[test]
    fn fixing_an_absent_cell_fails() {
        let mut store = store(1, 2);

        let _ = store.remove_cell(EXAM, cell(0, 0)).unwrap();

        assert_eq!(store.fix_cell(EXAM, cell(0, 0)), Err(EmptyDomain));
    }

    #[test]
    fn duty_cannot_be_decided_both_ways() {
        let mut store = store(1, 2);

        assert_eq!(store.set_duty(duty(1, 0, 1), true), Ok(true));
        assert_eq!(store.set_duty(duty(1, 0, 1), true), Ok(false));
        assert_eq!(store.set_duty(duty(1, 0, 1), false), Err(EmptyDomain));
        assert_eq!(store.duty(duty(1, 0, 1)), DutyState::OnDuty);
        assert_eq!(store.duty(duty(0, 0, 1)), DutyState::Undecided);
    }

    #[test]
    fn rollback_restores_state_at_checkpoint() {
        let mut store = store(2, 3);
        let _ = store.remove_cell(EXAM, cell(1, 2)).unwrap();

        let checkpoint = store.checkpoint();
        let _ = store.fix_cell(EXAM, cell(0, 1)).unwrap();
        let _ = store.set_duty(duty(0, 0, 1), true).unwrap();
        let _ = store.checkpoint();
        let _ = store.set_duty(duty(1, 0, 1), false).unwrap();

        store.rollback(checkpoint);

        assert_eq!(store.domain_size(EXAM), 5);
        assert!(!store.contains(EXAM, cell(1, 2)));
        assert!(store.contains(EXAM, cell(0, 0)));
        assert_eq!(store.duty(duty(0, 0, 1)), DutyState::Undecided);
        assert_eq!(store.duty(duty(1, 0, 1)), DutyState::Undecided);
        assert_eq!(store.num_checkpoints(), 0);
        assert_eq!(store.num_trail_entries(), 1);
    }

    #[test]
    fn store_is_assigned_once_every_variable_is_decided() {
        let mut store = store(1, 1);
        assert!(!store.is_assigned());

        for invigilator in 0..2 {
            for exam in 0..2 {
                let _ = store.set_duty(duty(invigilator, exam, 0), false).unwrap();
            }
        }

        assert!(store.is_assigned());
    }
}
