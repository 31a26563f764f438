use std::fmt::Display;

use crate::containers::StorageKey;

macro_rules! storage_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: u32,
        }

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self { id }
            }

            pub fn id(&self) -> u32 {
                self.id
            }
        }

        impl StorageKey for $name {
            fn index(&self) -> usize {
                self.id as usize
            }

            fn create_from_index(index: usize) -> Self {
                Self { id: index as u32 }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.id)
            }
        }
    };
}

storage_id!(
    /// Identifies an exam; exams are numbered densely from zero.
    ExamId
);
storage_id!(
    /// Identifies a room.
    RoomId
);
storage_id!(
    /// Identifies a time slot in `[0, number of slots)`. Consecutive ids are adjacent periods.
    SlotId
);
storage_id!(
    /// Identifies a student.
    StudentId
);
storage_id!(
    /// Identifies an invigilator of the pool.
    InvigilatorId
);

impl SlotId {
    /// The number of periods between two slots.
    pub fn distance(&self, other: SlotId) -> u32 {
        self.id.abs_diff(other.id)
    }
}
