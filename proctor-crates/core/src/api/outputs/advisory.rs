use std::fmt::Display;

use crate::containers::KeyedVec;
use crate::instance::ExamId;
use crate::instance::RoomId;
use crate::instance::SlotId;
use crate::instance::StudentId;

/// Students registered for more than this many exams are reported as overloaded.
pub const OVERLOADED_STUDENT_EXAMS: usize = 3;

/// One exam in the timetable of a student.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItineraryEntry {
    pub exam: ExamId,
    pub slot: SlotId,
    pub room: RoomId,
}

/// Informational findings about a schedule; none of these make a schedule invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    OverloadedStudent { student: StudentId, num_exams: usize },
    UnregisteredStudent { student: StudentId },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::OverloadedStudent { student, num_exams } => write!(
                f,
                "student {student} is registered for {num_exams} exams, more than {OVERLOADED_STUDENT_EXAMS}"
            ),
            Warning::UnregisteredStudent { student } => {
                write!(f, "student {student} is not registered for any exam")
            }
        }
    }
}

/// Per-student timetables and warnings derived from a schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advisory {
    itineraries: KeyedVec<StudentId, Vec<ItineraryEntry>>,
    warnings: Vec<Warning>,
}

impl Advisory {
    pub(crate) fn new(
        itineraries: KeyedVec<StudentId, Vec<ItineraryEntry>>,
        warnings: Vec<Warning>,
    ) -> Advisory {
        Advisory {
            itineraries,
            warnings,
        }
    }

    /// The exams of the student, ordered by slot.
    pub fn itinerary(&self, student: StudentId) -> &[ItineraryEntry] {
        &self.itineraries[student]
    }

    pub fn itineraries(&self) -> impl Iterator<Item = (StudentId, &[ItineraryEntry])> + '_ {
        self.itineraries
            .iter_with_keys()
            .map(|(student, itinerary)| (student, itinerary.as_slice()))
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
