//! Renders the outcome of a run as plain text.

use std::io::Write;
use std::time::Duration;

use itertools::Itertools;
use proctor_core::instance::InstanceModel;
use proctor_core::outputs::Solution;
use proctor_core::outputs::SolveOutcome;

pub(crate) fn write_report(
    out: &mut impl Write,
    instance: &InstanceModel,
    outcome: &SolveOutcome,
) -> std::io::Result<()> {
    match outcome {
        SolveOutcome::Solved(solution) => {
            writeln!(out, "Satisfied")?;
            write_solution(out, instance, solution)?;
        }
        SolveOutcome::Infeasible(_) => writeln!(out, "Unsatisfied")?,
        SolveOutcome::TimedOut(_) => writeln!(out, "Timed out")?,
    }

    write_elapsed(out, outcome.summary().elapsed)
}

fn write_solution(
    out: &mut impl Write,
    instance: &InstanceModel,
    solution: &Solution,
) -> std::io::Result<()> {
    writeln!(out, "Exam timetable:")?;
    for (exam, placement) in solution.assignment.iter() {
        writeln!(
            out,
            "Exam: {exam} | Room: {} | Slot: {} | Students: {} | Invigilators: {}",
            placement.room,
            placement.slot,
            instance.enrollment(exam),
            solution.invigilators.supervisors(exam).count()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Individual timetables (exam, slot, room):")?;
    for (student, itinerary) in solution.advisory.itineraries() {
        if itinerary.is_empty() {
            writeln!(out, "Student {student}: not registered for any exam")?;
        } else {
            let entries = itinerary
                .iter()
                .map(|entry| format!("({}, {}, {})", entry.exam, entry.slot, entry.room))
                .join(" | ");
            writeln!(out, "Student {student}: {entries}")?;
        }
    }

    let warnings = solution.advisory.warnings();
    if !warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "Warnings:")?;
        for warning in warnings {
            writeln!(out, "- {warning}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Invigilator timetable:")?;
    for (invigilator, roster) in solution.invigilators.rosters() {
        if roster.is_empty() {
            writeln!(out, "Invigilator {invigilator}: no assigned exams")?;
        } else {
            let duties = roster
                .iter()
                .map(|duty| format!("Exam {} (slot {})", duty.exam, duty.slot))
                .join(", ");
            writeln!(out, "Invigilator {invigilator}: {duties}")?;
        }
    }

    Ok(())
}

fn write_elapsed(out: &mut impl Write, elapsed: Duration) -> std::io::Result<()> {
    writeln!(
        out,
        "Time taken to solve the instance: {:.2} ms",
        elapsed.as_secs_f64() * 1000.0
    )
}
