//! An independent verifier for schedules.
//!
//! [`check_solution`] re-checks every scheduling rule on a materialized schedule without using any
//! of the propagators, so that it can be used to validate the output of the search.

use fnv::FnvHashMap;
use itertools::Itertools;
use thiserror::Error;

use crate::api::outputs::Assignment;
use crate::api::outputs::InvigilatorAssignment;
use crate::containers::KeyedVec;
use crate::engine::domains::Duty;
use crate::instance::ExamId;
use crate::instance::InstanceModel;
use crate::instance::InvigilatorId;
use crate::instance::RoomId;
use crate::instance::SlotId;
use crate::instance::StudentId;
use crate::propagators::MAX_EXAMS_PER_INVIGILATOR;

/// A scheduling rule which a schedule breaks.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    #[error("the schedule places {placed} exams but the instance has {expected}")]
    WrongNumberOfExams { placed: usize, expected: usize },
    #[error("exam {exam} is placed outside of the instance in room {room}, slot {slot}")]
    UnknownCell {
        exam: ExamId,
        room: RoomId,
        slot: SlotId,
    },
    #[error("exam {exam} has {enrollment} students but room {room} seats {capacity}")]
    RoomTooSmall {
        exam: ExamId,
        room: RoomId,
        capacity: u32,
        enrollment: u32,
    },
    #[error("exams {first} and {second} both take place in room {room} in slot {slot}")]
    CellClash {
        first: ExamId,
        second: ExamId,
        room: RoomId,
        slot: SlotId,
    },
    #[error("student {student} has exams {first} and {second} in the same or consecutive slots")]
    StudentClash {
        student: StudentId,
        first: ExamId,
        second: ExamId,
    },
    #[error("exam {exam} is supervised by {on_duty} invigilators but requires {required}")]
    WrongStaffing {
        exam: ExamId,
        on_duty: usize,
        required: usize,
    },
    #[error("{duty} does not match the slot of the exam")]
    DutyOutsideExamSlot { duty: Duty },
    #[error("slot {slot} has {num_duties} invigilator duties but the pool has {pool_size} members")]
    SlotOverstaffed {
        slot: SlotId,
        num_duties: usize,
        pool_size: usize,
    },
    #[error("invigilator {invigilator} supervises {num_exams} exams")]
    InvigilatorOverloaded {
        invigilator: InvigilatorId,
        num_exams: usize,
    },
    #[error("invigilator {invigilator} supervises exams {first} and {second} both in slot {slot}")]
    SimultaneousDuties {
        invigilator: InvigilatorId,
        first: ExamId,
        second: ExamId,
        slot: SlotId,
    },
    #[error("invigilator {invigilator} supervises exams {first} and {second} in consecutive slots")]
    ConsecutiveDuties {
        invigilator: InvigilatorId,
        first: ExamId,
        second: ExamId,
    },
    #[error("exam {exam} uses room {room} while smaller room {smaller} is empty in slot {slot}")]
    NotSmallestFit {
        exam: ExamId,
        room: RoomId,
        smaller: RoomId,
        slot: SlotId,
    },
}

/// Checks the schedule against every scheduling rule, reporting the first violation found.
pub fn check_solution(
    instance: &InstanceModel,
    assignment: &Assignment,
    invigilators: &InvigilatorAssignment,
) -> Result<(), Violation> {
    check_placements(instance, assignment)?;
    check_students(instance, assignment)?;
    check_staffing(instance, assignment, invigilators)?;
    check_invigilators(invigilators)?;
    check_smallest_fit(instance, assignment)?;
    Ok(())
}

fn check_placements(instance: &InstanceModel, assignment: &Assignment) -> Result<(), Violation> {
    if assignment.num_exams() != instance.num_exams() {
        return Err(Violation::WrongNumberOfExams {
            placed: assignment.num_exams(),
            expected: instance.num_exams(),
        });
    }

    let mut occupants = FnvHashMap::default();
    for (exam, placement) in assignment.iter() {
        if placement.room.id() as usize >= instance.num_rooms()
            || placement.slot.id() as usize >= instance.num_slots()
        {
            return Err(Violation::UnknownCell {
                exam,
                room: placement.room,
                slot: placement.slot,
            });
        }

        let capacity = instance.capacity(placement.room);
        let enrollment = instance.enrollment(exam);
        if capacity < enrollment {
            return Err(Violation::RoomTooSmall {
                exam,
                room: placement.room,
                capacity,
                enrollment,
            });
        }

        if let Some(first) = occupants.insert(placement, exam) {
            return Err(Violation::CellClash {
                first,
                second: exam,
                room: placement.room,
                slot: placement.slot,
            });
        }
    }
    Ok(())
}

fn check_students(instance: &InstanceModel, assignment: &Assignment) -> Result<(), Violation> {
    for student in instance.students() {
        for (&first, &second) in instance.exams_of(student).iter().tuple_combinations() {
            let first_slot = assignment.placement(first).slot;
            let second_slot = assignment.placement(second).slot;
            if first_slot.distance(second_slot) <= 1 {
                return Err(Violation::StudentClash {
                    student,
                    first,
                    second,
                });
            }
        }
    }
    Ok(())
}

fn check_staffing(
    instance: &InstanceModel,
    assignment: &Assignment,
    invigilators: &InvigilatorAssignment,
) -> Result<(), Violation> {
    let mut on_duty: KeyedVec<ExamId, usize> = KeyedVec::filled(instance.num_exams(), 0);
    let mut duties_per_slot: FnvHashMap<SlotId, usize> = FnvHashMap::default();

    for &duty in invigilators.duties() {
        if duty.exam.id() as usize >= instance.num_exams()
            || assignment.placement(duty.exam).slot != duty.slot
        {
            return Err(Violation::DutyOutsideExamSlot { duty });
        }
        on_duty[duty.exam] += 1;
        *duties_per_slot.entry(duty.slot).or_default() += 1;
    }

    for exam in instance.exams() {
        let required = instance.required_invigilators(exam);
        if on_duty[exam] != required {
            return Err(Violation::WrongStaffing {
                exam,
                on_duty: on_duty[exam],
                required,
            });
        }
    }

    let pool_size = invigilators.num_invigilators();
    if let Some((&slot, &num_duties)) = duties_per_slot
        .iter()
        .filter(|(_, num_duties)| **num_duties > pool_size)
        .min_by_key(|(slot, _)| **slot)
    {
        return Err(Violation::SlotOverstaffed {
            slot,
            num_duties,
            pool_size,
        });
    }
    Ok(())
}

fn check_invigilators(invigilators: &InvigilatorAssignment) -> Result<(), Violation> {
    for (invigilator, roster) in invigilators.rosters() {
        let num_exams = roster.iter().map(|duty| duty.exam).unique().count();
        if num_exams > MAX_EXAMS_PER_INVIGILATOR {
            return Err(Violation::InvigilatorOverloaded {
                invigilator,
                num_exams,
            });
        }

        for (first, second) in roster.iter().tuple_combinations() {
            if first.exam == second.exam {
                continue;
            }
            match first.slot.distance(second.slot) {
                0 => {
                    return Err(Violation::SimultaneousDuties {
                        invigilator,
                        first: first.exam,
                        second: second.exam,
                        slot: first.slot,
                    })
                }
                1 => {
                    return Err(Violation::ConsecutiveDuties {
                        invigilator,
                        first: first.exam,
                        second: second.exam,
                    })
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn check_smallest_fit(instance: &InstanceModel, assignment: &Assignment) -> Result<(), Violation> {
    for (exam, placement) in assignment.iter() {
        let enrollment = instance.enrollment(exam);
        let capacity = instance.capacity(placement.room);

        let empty_smaller_room = instance.rooms().find(|&room| {
            let smaller_capacity = instance.capacity(room);
            enrollment <= smaller_capacity
                && smaller_capacity < capacity
                && assignment.occupant(room, placement.slot).is_none()
        });

        if let Some(smaller) = empty_smaller_room {
            return Err(Violation::NotSmallestFit {
                exam,
                room: placement.room,
                smaller,
                slot: placement.slot,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::outputs::Placement;

    fn placement(room: u32, slot: u32) -> Placement {
        Placement {
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

    fn assignment(placements: Vec<Placement>) -> Assignment {
        Assignment::new(KeyedVec::from(placements))
    }

    /// Two exams sharing student 0; rooms of capacity 5 and 10.
    fn instance() -> InstanceModel {
        InstanceModel::new(2, 2, 4, vec![5, 10], [(0, 0), (1, 0), (1, 1)]).unwrap()
    }

    #[test]
    fn valid_schedule_is_accepted() {
        let schedule = assignment(vec![placement(0, 0), placement(0, 2)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 0), duty(0, 1, 2)]);

        assert_eq!(check_solution(&instance(), &schedule, &duties), Ok(()));
    }

    #[test]
    fn cell_clash_is_reported() {
        let schedule = assignment(vec![placement(0, 1), placement(0, 1)]);
        let duties = InvigilatorAssignment::new(2, vec![]);

        assert!(matches!(
            check_solution(&instance(), &schedule, &duties),
            Err(Violation::CellClash { .. })
        ));
    }

    #[test]
    fn student_clash_is_reported() {
        let schedule = assignment(vec![placement(0, 1), placement(0, 2)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 1), duty(1, 1, 2)]);

        assert_eq!(
            check_solution(&instance(), &schedule, &duties),
            Err(Violation::StudentClash {
                student: StudentId::new(0),
                first: ExamId::new(0),
                second: ExamId::new(1),
            })
        );
    }

    #[test]
    fn understaffed_exam_is_reported() {
        let schedule = assignment(vec![placement(0, 0), placement(0, 2)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 0)]);

        assert_eq!(
            check_solution(&instance(), &schedule, &duties),
            Err(Violation::WrongStaffing {
                exam: ExamId::new(1),
                on_duty: 0,
                required: 1,
            })
        );
    }

    #[test]
    fn duty_in_another_slot_is_reported() {
        let schedule = assignment(vec![placement(0, 0), placement(0, 2)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 1), duty(0, 1, 2)]);

        assert_eq!(
            check_solution(&instance(), &schedule, &duties),
            Err(Violation::DutyOutsideExamSlot {
                duty: duty(0, 0, 1)
            })
        );
    }

    #[test]
    fn consecutive_duties_are_reported() {
        let instance =
            InstanceModel::new(2, 2, 2, vec![5, 5], [(0, 0), (1, 1)]).unwrap();
        let schedule = assignment(vec![placement(0, 0), placement(0, 1)]);
        let duties = InvigilatorAssignment::new(1, vec![duty(0, 0, 0), duty(0, 1, 1)]);

        assert!(matches!(
            check_solution(&instance, &schedule, &duties),
            Err(Violation::ConsecutiveDuties { .. })
        ));
    }

    #[test]
    fn simultaneous_duties_are_reported() {
        let instance = InstanceModel::new(2, 2, 1, vec![5, 5], [(0, 0), (1, 1)]).unwrap();
        let schedule = assignment(vec![placement(0, 0), placement(1, 0)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 0), duty(0, 1, 0)]);

        assert_eq!(
            check_solution(&instance, &schedule, &duties),
            Err(Violation::SimultaneousDuties {
                invigilator: InvigilatorId::new(0),
                first: ExamId::new(0),
                second: ExamId::new(1),
                slot: SlotId::new(0),
            })
        );
    }

    #[test]
    fn larger_room_next_to_empty_smaller_room_is_reported() {
        let schedule = assignment(vec![placement(0, 0), placement(1, 2)]);
        let duties = InvigilatorAssignment::new(2, vec![duty(0, 0, 0), duty(0, 1, 2)]);

        assert_eq!(
            check_solution(&instance(), &schedule, &duties),
            Err(Violation::NotSmallestFit {
                exam: ExamId::new(1),
                room: RoomId::new(1),
                smaller: RoomId::new(0),
                slot: SlotId::new(2),
            })
        );
    }

    #[test]
    fn overloaded_slot_is_reported() {
        let instance = InstanceModel::new(0, 2, 1, vec![5, 5], std::iter::empty()).unwrap();
        let schedule = assignment(vec![placement(0, 0), placement(1, 0)]);
        let duties = InvigilatorAssignment::new(1, vec![duty(0, 0, 0), duty(0, 1, 0)]);

        assert_eq!(
            check_solution(&instance, &schedule, &duties),
            Err(Violation::SlotOverstaffed {
                slot: SlotId::new(0),
                num_duties: 2,
                pool_size: 1,
            })
        );
    }
}
