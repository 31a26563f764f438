//! Turns a fully assigned [`DomainStore`] into the schedule handed to the caller.

use log::debug;

use crate::api::outputs::Advisory;
use crate::api::outputs::Assignment;
use crate::api::outputs::InvigilatorAssignment;
use crate::api::outputs::ItineraryEntry;
use crate::api::outputs::Placement;
use crate::api::outputs::SearchSummary;
use crate::api::outputs::Solution;
use crate::api::outputs::Warning;
use crate::api::outputs::OVERLOADED_STUDENT_EXAMS;
use crate::containers::KeyedVec;
use crate::engine::domains::Cell;
use crate::engine::domains::DomainStore;
use crate::engine::domains::DutyState;
use crate::instance::ExamId;
use crate::instance::InstanceModel;
use crate::instance::StudentId;
use crate::proctor_assert_simple;

/// Reads the schedule off a [`DomainStore`] in which every variable is fixed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SolutionExtractor<'a> {
    instance: &'a InstanceModel,
    domains: &'a DomainStore,
}

impl<'a> SolutionExtractor<'a> {
    pub(crate) fn new(instance: &'a InstanceModel, domains: &'a DomainStore) -> Self {
        proctor_assert_simple!(
            domains.is_assigned(),
            "Extracting a schedule from domains which are not fully assigned"
        );
        SolutionExtractor { instance, domains }
    }

    pub(crate) fn extract(&self, summary: SearchSummary) -> Solution {
        let (assignment, invigilators) = self.extract_schedule();
        let advisory = advisory(self.instance, &assignment);

        Solution {
            assignment,
            invigilators,
            advisory,
            summary,
        }
    }

    pub(crate) fn extract_schedule(&self) -> (Assignment, InvigilatorAssignment) {
        let placements = self
            .instance
            .exams()
            .map(|exam| Placement::from(self.placed_cell(exam)))
            .collect::<Vec<_>>();

        let duties = self
            .domains
            .invigilators()
            .flat_map(|invigilator| self.domains.duties_of(invigilator))
            .filter(|(_, state)| *state == DutyState::OnDuty)
            .map(|(duty, _)| duty)
            .collect();

        (
            Assignment::new(KeyedVec::from(placements)),
            InvigilatorAssignment::new(self.domains.num_invigilators(), duties),
        )
    }

    fn placed_cell(&self, exam: ExamId) -> Cell {
        match self.domains.fixed_cell(exam) {
            Some(cell) => cell,
            None => panic!(
                "Exam {exam} has {} candidate cells after the search completed",
                self.domains.domain_size(exam)
            ),
        }
    }
}

/// Computes the itinerary of every student and the warnings about the students.
pub(crate) fn advisory(instance: &InstanceModel, assignment: &Assignment) -> Advisory {
    let mut itineraries: KeyedVec<StudentId, Vec<ItineraryEntry>> =
        KeyedVec::filled(instance.num_students(), vec![]);
    let mut warnings = vec![];

    for student in instance.students() {
        let exams = instance.exams_of(student);

        let mut itinerary = exams
            .iter()
            .map(|&exam| {
                let placement = assignment.placement(exam);
                ItineraryEntry {
                    exam,
                    slot: placement.slot,
                    room: placement.room,
                }
            })
            .collect::<Vec<_>>();
        itinerary.sort_by_key(|entry| (entry.slot, entry.exam));
        itineraries[student] = itinerary;

        if exams.is_empty() {
            warnings.push(Warning::UnregisteredStudent { student });
        } else if exams.len() > OVERLOADED_STUDENT_EXAMS {
            warnings.push(Warning::OverloadedStudent {
                student,
                num_exams: exams.len(),
            });
        }
    }

    if !warnings.is_empty() {
        debug!("The schedule comes with {} warnings", warnings.len());
    }

    Advisory::new(itineraries, warnings)
}
