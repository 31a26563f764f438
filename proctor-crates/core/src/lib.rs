//! # Proctor
//! Proctor schedules written exams. Every exam is placed in a room and a time slot such that no
//! student sits two exams at once, every room is large enough, and every exam is supervised by
//! enough invigilators. The schedule is found with a backtracking search over finite domains,
//! pruned by a propagator for every scheduling rule.
//!
//! # Example
//! ```rust
//! # use std::time::Duration;
//! # use proctor_core::instance::InstanceModel;
//! # use proctor_core::instance::ExamId;
//! # use proctor_core::outputs::SolveOutcome;
//! // Two students, two exams, three slots and rooms with 30 and 10 seats. Registrations are
//! // (exam, student) pairs.
//! let registrations = [(0, 0), (0, 1), (1, 1)];
//! let instance = InstanceModel::new(2, 2, 3, vec![30, 10], registrations).unwrap();
//!
//! let outcome = proctor_core::solve(&instance, Duration::from_secs(1));
//!
//! let SolveOutcome::Solved(solution) = outcome else {
//!     panic!("the instance has a schedule")
//! };
//! // Exams 0 and 1 share student 1 and are held in different slots.
//! let first = solution.assignment.placement(ExamId::new(0));
//! let second = solution.assignment.placement(ExamId::new(1));
//! assert_ne!(first.slot, second.slot);
//! ```
//!
//! A [`Solver`] can be configured with [`SolverOptions`] and stopped early with any
//! [`TerminationCondition`](termination::TerminationCondition).

#[doc(hidden)]
pub mod asserts;
pub mod basic_types;
pub mod checking;
pub mod containers;
pub mod engine;
pub(crate) mod extraction;
pub mod instance;
pub mod propagators;
pub mod statistics;
pub mod termination;

pub use convert_case;

// Everything in the API is exported directly from the crate root, e.g. `proctor_core::Solver`
// rather than `proctor_core::api::Solver`.
mod api;

pub use api::*;
