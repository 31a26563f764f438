use std::fmt::Display;

use crate::instance::ExamId;
use crate::instance::InvigilatorId;
use crate::instance::RoomId;
use crate::instance::SlotId;

/// A `(room, slot)` pair; at most one exam can occupy a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub room: RoomId,
    pub slot: SlotId,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(room {}, slot {})", self.room, self.slot)
    }
}

/// The fact that an invigilator supervises an exam in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duty {
    pub invigilator: InvigilatorId,
    pub exam: ExamId,
    pub slot: SlotId,
}

impl Display for Duty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invigilator {} on exam {} in slot {}",
            self.invigilator, self.exam, self.slot
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DutyState {
    #[default]
    Undecided,
    OnDuty,
    OffDuty,
}

impl DutyState {
    /// Whether the duty may still become true.
    pub fn can_be_on_duty(self) -> bool {
        self != DutyState::OffDuty
    }
}

impl From<bool> for DutyState {
    fn from(on_duty: bool) -> Self {
        if on_duty {
            DutyState::OnDuty
        } else {
            DutyState::OffDuty
        }
    }
}
