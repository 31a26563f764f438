use std::fmt::Display;

use crate::containers::KeyedVec;
use crate::engine::domains::Cell;
use crate::engine::domains::Duty;
use crate::instance::ExamId;
use crate::instance::InvigilatorId;
use crate::instance::RoomId;
use crate::instance::SlotId;

/// The room and slot an exam takes place in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    pub room: RoomId,
    pub slot: SlotId,
}

impl From<Cell> for Placement {
    fn from(cell: Cell) -> Self {
        Placement {
            room: cell.room,
            slot: cell.slot,
        }
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room {} in slot {}", self.room, self.slot)
    }
}

/// The placement of every exam.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    placements: KeyedVec<ExamId, Placement>,
}

impl Assignment {
    pub fn new(placements: KeyedVec<ExamId, Placement>) -> Assignment {
        Assignment { placements }
    }

    pub fn num_exams(&self) -> usize {
        self.placements.len()
    }

    pub fn placement(&self, exam: ExamId) -> Placement {
        self.placements[exam]
    }

    /// Iterates over the placements in ascending order of exam.
    pub fn iter(&self) -> impl Iterator<Item = (ExamId, Placement)> + '_ {
        self.placements
            .iter_with_keys()
            .map(|(exam, &placement)| (exam, placement))
    }

    /// The exam taking place in the room during the slot, if any.
    pub fn occupant(&self, room: RoomId, slot: SlotId) -> Option<ExamId> {
        self.iter()
            .find(|(_, placement)| placement.room == room && placement.slot == slot)
            .map(|(exam, _)| exam)
    }
}

/// The invigilator duties of a schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvigilatorAssignment {
    /// Ordered by invigilator, exam and slot.
    duties: Vec<Duty>,
    rosters: KeyedVec<InvigilatorId, Vec<Duty>>,
}

impl InvigilatorAssignment {
    /// Creates the assignment of a pool of `num_invigilators` from the duties which are on.
    pub fn new(num_invigilators: usize, mut duties: Vec<Duty>) -> InvigilatorAssignment {
        duties.sort();
        duties.dedup();

        let mut rosters: KeyedVec<InvigilatorId, Vec<Duty>> =
            KeyedVec::filled(num_invigilators, vec![]);
        for &duty in duties.iter() {
            rosters[duty.invigilator].push(duty);
        }

        InvigilatorAssignment { duties, rosters }
    }

    /// The size of the pool the duties were drawn from.
    pub fn num_invigilators(&self) -> usize {
        self.rosters.len()
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    /// The duties of a single invigilator, ordered by exam and slot.
    pub fn roster(&self, invigilator: InvigilatorId) -> &[Duty] {
        &self.rosters[invigilator]
    }

    pub fn rosters(&self) -> impl Iterator<Item = (InvigilatorId, &[Duty])> + '_ {
        self.rosters
            .iter_with_keys()
            .map(|(invigilator, roster)| (invigilator, roster.as_slice()))
    }

    /// The invigilators on duty for the exam, in ascending order.
    pub fn supervisors(&self, exam: ExamId) -> impl Iterator<Item = InvigilatorId> + '_ {
        self.duties
            .iter()
            .filter(move |duty| duty.exam == exam)
            .map(|duty| duty.invigilator)
    }
}
