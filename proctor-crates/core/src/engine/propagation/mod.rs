//! The engine which enforces the scheduling constraints by pruning the [`DomainStore`].
//!
//! Every constraint family is enforced by its own [`Propagator`]; the [`ConstraintEngine`] runs
//! them in order of [`Priority`] until a fixed point is reached.
//!
//! [`DomainStore`]: crate::engine::domains::DomainStore

mod constraint_engine;
mod propagator;

pub use constraint_engine::ConstraintEngine;
#[cfg(test)]
pub(crate) use constraint_engine::propagate_once;
pub use propagator::Priority;
pub use propagator::PropagationContext;
pub use propagator::Propagator;
pub use propagator::PropagatorKind;
