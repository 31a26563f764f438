mod propagation_status;
mod trail;

pub use propagation_status::ConflictReason;
pub use propagation_status::Inconsistency;
pub use propagation_status::PropagationStatus;
pub use propagation_status::PropagatorConflict;
pub use trail::Checkpoint;
pub(crate) use trail::Trail;
