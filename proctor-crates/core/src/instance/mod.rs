//! The immutable description of a scheduling problem.
//!
//! An [`InstanceModel`] is built once from the declared counts, the room capacities and the list
//! of `(exam, student)` registrations. Everything the engine derives from those inputs (exam
//! enrollments, the exams of each student, the pairs of exams that share a student and the rooms
//! ordered by capacity) is computed here so that the search never has to.

mod ids;

use fnv::FnvHashSet;
pub use ids::ExamId;
pub use ids::InvigilatorId;
pub use ids::RoomId;
pub use ids::SlotId;
pub use ids::StudentId;
use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// Exams with at most this many students need a single invigilator.
pub const SINGLE_INVIGILATOR_ENROLLMENT: u32 = 10;
/// Exams with at most this many students (and more than [`SINGLE_INVIGILATOR_ENROLLMENT`]) need
/// two invigilators; larger exams need three.
pub const DOUBLE_INVIGILATOR_ENROLLMENT: u32 = 20;

/// Errors related to constructing an [`InstanceModel`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("registration refers to exam {exam}, but the instance declares {num_exams} exams")]
    UnknownExam { exam: usize, num_exams: usize },
    #[error(
        "registration refers to student {student}, but the instance declares {num_students} students"
    )]
    UnknownStudent { student: usize, num_students: usize },
    #[error("the instance declares {count} {what}, more than the supported {}", u32::MAX)]
    TooMany { what: &'static str, count: usize },
    #[error(
        "{num_exams} exams over {num_rooms} rooms and {num_slots} slots exceed the supported number of placements"
    )]
    TooManyPlacements {
        num_exams: usize,
        num_rooms: usize,
        num_slots: usize,
    },
}

/// The number of invigilators an exam with `enrollment` students requires.
pub fn required_invigilators(enrollment: u32) -> usize {
    if enrollment <= SINGLE_INVIGILATOR_ENROLLMENT {
        1
    } else if enrollment <= DOUBLE_INVIGILATOR_ENROLLMENT {
        2
    } else {
        3
    }
}

#[derive(Clone, Debug)]
pub struct InstanceModel {
    num_slots: usize,
    room_capacities: KeyedVec<RoomId, u32>,
    exam_students: KeyedVec<ExamId, Vec<StudentId>>,
    student_exams: KeyedVec<StudentId, Vec<ExamId>>,
    /// For every exam, the other exams which share at least one student with it.
    conflicts: KeyedVec<ExamId, Vec<ExamId>>,
    rooms_by_capacity: Vec<RoomId>,
}

impl InstanceModel {
    /// Creates the model from the declared counts and the `(exam, student)` registrations.
    ///
    /// Duplicate registrations are ignored. A registration referring to an exam or a student
    /// outside of the declared counts is rejected, as are counts which cannot be identified by a
    /// `u32` and instances with more `(exam, room, slot)` placements than that.
    pub fn new(
        num_students: usize,
        num_exams: usize,
        num_slots: usize,
        room_capacities: Vec<u32>,
        registrations: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<InstanceModel, InstanceError> {
        let num_rooms = room_capacities.len();
        for (what, count) in [
            ("students", num_students),
            ("exams", num_exams),
            ("slots", num_slots),
            ("rooms", num_rooms),
        ] {
            if u32::try_from(count).is_err() {
                return Err(InstanceError::TooMany { what, count });
            }
        }
        let num_placements = num_exams
            .checked_mul(num_rooms)
            .and_then(|placements| placements.checked_mul(num_slots));
        if !num_placements.is_some_and(|placements| u32::try_from(placements).is_ok()) {
            return Err(InstanceError::TooManyPlacements {
                num_exams,
                num_rooms,
                num_slots,
            });
        }

        let mut exam_students: KeyedVec<ExamId, Vec<StudentId>> =
            KeyedVec::filled(num_exams, vec![]);
        let mut student_exams: KeyedVec<StudentId, Vec<ExamId>> =
            KeyedVec::filled(num_students, vec![]);

        let mut seen = FnvHashSet::default();
        for (exam, student) in registrations {
            if exam >= num_exams {
                return Err(InstanceError::UnknownExam { exam, num_exams });
            }
            if student >= num_students {
                return Err(InstanceError::UnknownStudent {
                    student,
                    num_students,
                });
            }
            if !seen.insert((exam, student)) {
                continue;
            }

            let exam = ExamId::create_from_index(exam);
            let student = StudentId::create_from_index(student);
            exam_students[exam].push(student);
            student_exams[student].push(exam);
        }

        let mut conflicts: KeyedVec<ExamId, Vec<ExamId>> = KeyedVec::filled(num_exams, vec![]);
        for exams in student_exams.iter_mut() {
            exams.sort();
            for (&first, &second) in exams.iter().tuple_combinations() {
                conflicts[first].push(second);
                conflicts[second].push(first);
            }
        }
        for exams in conflicts.iter_mut() {
            exams.sort();
            exams.dedup();
        }
        for students in exam_students.iter_mut() {
            students.sort();
        }

        let room_capacities = KeyedVec::from(room_capacities);
        let rooms_by_capacity = room_capacities
            .keys()
            .sorted_by_key(|&room| (room_capacities[room], room))
            .collect();

        if num_exams == 0 {
            warn!("The instance does not contain any exams");
        }

        Ok(InstanceModel {
            num_slots,
            room_capacities,
            exam_students,
            student_exams,
            conflicts,
            rooms_by_capacity,
        })
    }

    pub fn num_exams(&self) -> usize {
        self.exam_students.len()
    }

    pub fn num_rooms(&self) -> usize {
        self.room_capacities.len()
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn num_students(&self) -> usize {
        self.student_exams.len()
    }

    pub fn exams(&self) -> impl Iterator<Item = ExamId> {
        self.exam_students.keys()
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> {
        self.room_capacities.keys()
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        (0..self.num_slots).map(SlotId::create_from_index)
    }

    pub fn students(&self) -> impl Iterator<Item = StudentId> {
        self.student_exams.keys()
    }

    pub fn capacity(&self, room: RoomId) -> u32 {
        self.room_capacities[room]
    }

    /// The number of distinct students registered for the exam.
    pub fn enrollment(&self, exam: ExamId) -> u32 {
        self.exam_students[exam].len() as u32
    }

    /// The number of invigilators which should be on duty for the exam.
    pub fn required_invigilators(&self, exam: ExamId) -> usize {
        required_invigilators(self.enrollment(exam))
    }

    /// The students registered for the exam, in ascending order.
    pub fn students_of(&self, exam: ExamId) -> &[StudentId] {
        &self.exam_students[exam]
    }

    /// The exams the student is registered for, in ascending order.
    pub fn exams_of(&self, student: StudentId) -> &[ExamId] {
        &self.student_exams[student]
    }

    /// The exams which share at least one student with `exam`.
    pub fn conflicting_exams(&self, exam: ExamId) -> &[ExamId] {
        &self.conflicts[exam]
    }

    /// All rooms ordered by ascending capacity; rooms of equal capacity are ordered by id.
    pub fn rooms_by_capacity(&self) -> &[RoomId] {
        &self.rooms_by_capacity
    }
}
