//! Reads instance files of the following form:
//!
//! ```text
//! Number of students: 3
//! Number of exams: 2
//! Number of slots: 4
//! Number of rooms: 2
//! Room 0 capacity: 10
//! Room 1 capacity: 25
//! 0 0
//! 0 1
//! 1 2
//! ```
//!
//! The attributes come first and in exactly this order, followed by one `<exam> <student>`
//! registration per line. Blank lines between registrations are skipped.

use std::io::BufRead;
use std::str::FromStr;

use proctor_core::instance::InstanceError;
use proctor_core::instance::InstanceModel;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ParseError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected the '{attribute}' attribute, got '{content}'")]
    InvalidAttribute {
        line: usize,
        attribute: String,
        content: String,
    },

    #[error("the file ended before the '{attribute}' attribute")]
    MissingAttribute { attribute: String },

    #[error("line {line}: expected a registration '<exam> <student>', got '{content}'")]
    InvalidRegistration { line: usize, content: String },

    #[error(transparent)]
    InconsistentInstance(#[from] InstanceError),
}

/// Reads the instance from `source`.
pub(crate) fn parse_instance(source: impl BufRead) -> Result<InstanceModel, ParseError> {
    let mut lines = source.lines().enumerate();

    let num_students = read_attribute(&mut lines, "Number of students")?;
    let num_exams = read_attribute(&mut lines, "Number of exams")?;
    let num_slots = read_attribute(&mut lines, "Number of slots")?;
    let num_rooms: usize = read_attribute(&mut lines, "Number of rooms")?;

    let room_capacities = (0..num_rooms)
        .map(|room| read_attribute(&mut lines, &format!("Room {room} capacity")))
        .collect::<Result<Vec<u32>, _>>()?;

    let mut registrations = vec![];
    for (index, content) in lines {
        let content = content?;
        if content.trim().is_empty() {
            continue;
        }

        let registration =
            parse_registration(&content).ok_or_else(|| ParseError::InvalidRegistration {
                line: index + 1,
                content,
            })?;
        registrations.push(registration);
    }

    Ok(InstanceModel::new(
        num_students,
        num_exams,
        num_slots,
        room_capacities,
        registrations,
    )?)
}

/// Reads the next line as `<attribute>: <value>`, allowing whitespace around the value.
fn read_attribute<Value: FromStr>(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<String>)>,
    attribute: &str,
) -> Result<Value, ParseError> {
    let (index, content) = lines.next().ok_or_else(|| ParseError::MissingAttribute {
        attribute: attribute.to_owned(),
    })?;
    let content = content?;

    content
        .strip_prefix(attribute)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| ParseError::InvalidAttribute {
            line: index + 1,
            attribute: attribute.to_owned(),
            content,
        })
}

fn parse_registration(content: &str) -> Option<(usize, usize)> {
    let mut fields = content.split_whitespace();
    let exam = fields.next()?.parse().ok()?;
    let student = fields.next()?.parse().ok()?;

    fields.next().is_none().then_some((exam, student))
}
