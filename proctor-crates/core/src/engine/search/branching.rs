//! Variable and value selection for the scheduler.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::engine::domains::Cell;
use crate::engine::domains::DomainStore;
use crate::engine::domains::Duty;
use crate::engine::domains::DutyState;
use crate::instance::ExamId;
use crate::instance::InstanceModel;

/// A single commitment made by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Place the exam in the cell.
    Place { exam: ExamId, cell: Cell },
    /// Put the invigilator on or off duty.
    Staff { duty: Duty, on_duty: bool },
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Place { exam, cell } => write!(f, "exam {exam} in {cell}"),
            Decision::Staff {
                duty,
                on_duty: true,
            } => write!(f, "{duty}"),
            Decision::Staff {
                duty,
                on_duty: false,
            } => write!(f, "not {duty}"),
        }
    }
}

/// Selects the next variable to branch on and returns its values in the order in which they
/// should be tried, or `None` if every variable is fixed.
///
/// Duties of exams whose slot is known are decided first, keeping staffing failures close to the
/// placement which caused them. Otherwise the most constrained exam is placed.
pub(crate) fn next_decisions(
    instance: &InstanceModel,
    domains: &DomainStore,
) -> Option<Vec<Decision>> {
    if let Some(duty) = pending_duty(instance, domains) {
        return Some(vec![
            Decision::Staff {
                duty,
                on_duty: true,
            },
            Decision::Staff {
                duty,
                on_duty: false,
            },
        ]);
    }

    let exam = most_constrained_exam(instance, domains)?;
    Some(
        ordered_cells(instance, domains, exam)
            .map(|cell| Decision::Place { exam, cell })
            .collect(),
    )
}

/// The first undecided duty, by exam and then by invigilator, of an exam whose slot is fixed.
fn pending_duty(instance: &InstanceModel, domains: &DomainStore) -> Option<Duty> {
    instance.exams().find_map(|exam| {
        let slot = domains.fixed_slot(exam)?;
        domains
            .duties_at(exam, slot)
            .find(|(_, state)| *state == DutyState::Undecided)
            .map(|(duty, _)| duty)
    })
}

#[derive(PartialEq, Eq)]
struct MostConstrainedValue {
    domain_size: usize,
    enrollment: u32,
    exam: ExamId,
}

impl PartialOrd for MostConstrainedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MostConstrainedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Larger exams are harder to place, hence `other` is compared to `self` for enrollment.
        self.domain_size
            .cmp(&other.domain_size)
            .then_with(|| other.enrollment.cmp(&self.enrollment))
            .then_with(|| self.exam.cmp(&other.exam))
    }
}

/// The unfixed exam with the fewest remaining cells; ties go to the exam with most students and
/// then to the lowest id.
fn most_constrained_exam(instance: &InstanceModel, domains: &DomainStore) -> Option<ExamId> {
    instance
        .exams()
        .filter(|&exam| !domains.is_fixed(exam))
        .map(|exam| MostConstrainedValue {
            domain_size: domains.domain_size(exam),
            enrollment: instance.enrollment(exam),
            exam,
        })
        .min()
        .map(|value| value.exam)
}

/// The remaining cells of the exam by ascending room capacity, room id and slot.
fn ordered_cells<'a>(
    instance: &'a InstanceModel,
    domains: &'a DomainStore,
    exam: ExamId,
) -> impl Iterator<Item = Cell> + 'a {
    instance
        .rooms_by_capacity()
        .iter()
        .flat_map(move |&room| instance.slots().map(move |slot| Cell { room, slot }))
        .filter(move |&cell| domains.contains(exam, cell))
}
