//! The propagators enforcing the scheduling constraints, one per constraint family.
//!
//! Placement constraints prune the `(room, slot)` domains of exams, while staffing constraints
//! decide invigilator duties (and remove slots in which an exam could not be staffed).

mod invigilator_adjacency;
mod invigilator_count;
mod invigilator_load;
mod room_capacity;
mod room_slot_clash;
mod slot_staffing;
mod smallest_fit;
mod student_conflict;

pub use invigilator_adjacency::InvigilatorAdjacencyPropagator;
pub use invigilator_count::InvigilatorCountPropagator;
pub use invigilator_load::InvigilatorLoadPropagator;
pub use invigilator_load::MAX_EXAMS_PER_INVIGILATOR;
pub use room_capacity::RoomCapacityPropagator;
pub use room_slot_clash::RoomSlotClashPropagator;
pub use slot_staffing::SlotStaffingPropagator;
pub use smallest_fit::SmallestFitPropagator;
pub use student_conflict::StudentConflictPropagator;
