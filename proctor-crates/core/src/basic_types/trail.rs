use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::proctor_assert_simple;

/// An opaque marker into the history of a [`Trail`], obtained through [`Trail::checkpoint`].
///
/// Rolling back to a checkpoint restores exactly the entries which were present when it was
/// taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// The number of checkpoints which were open before this one was taken.
    pub fn depth(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    /// At index i is the length of the trail at the moment the i-th checkpoint was taken
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// We explicitly implement the Default and not as a macro, because we want to avoid imposing Default
// on the generic type T.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            trail_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint(self.trail_delimiter.len());
        self.trail_delimiter.push(self.trail.len());
        checkpoint
    }

    /// The number of checkpoints which are currently open.
    pub(crate) fn num_checkpoints(&self) -> usize {
        self.trail_delimiter.len()
    }

    /// Removes all entries recorded since `checkpoint` was taken, together with every checkpoint
    /// taken after it. The entries are returned in reverse order so that they can be undone.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) -> Rev<Drain<'_, T>> {
        proctor_assert_simple!(
            checkpoint.0 < self.trail_delimiter.len(),
            "Rolling back to checkpoint {} which has already been released",
            checkpoint.0
        );

        let new_trail_len = self.trail_delimiter[checkpoint.0];

        self.trail_delimiter.truncate(checkpoint.0);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_observed_through_indexing() {
        let mut trail = Trail::default();

        let expected = [1, 2, 3, 4];
        for &elem in expected.iter() {
            trail.push(elem);
        }

        assert_eq!(&expected, trail.deref());
    }

    #[test]
    fn rollback_removes_elements_beyond_checkpoint() {
        let mut trail = Trail::default();

        let checkpoint = trail.checkpoint();
        trail.push(1);
        let _ = trail.rollback(checkpoint);

        assert!(trail.is_empty());
        assert_eq!(trail.num_checkpoints(), 0);
    }

    #[test]
    fn rollback_releases_later_checkpoints() {
        let mut trail = Trail::default();
        trail.push(1);

        let _ = trail.checkpoint();
        trail.push(2);
        let second = trail.checkpoint();
        trail.push(3);
        let _ = trail.checkpoint();
        trail.push(4);

        let _ = trail.rollback(second);

        assert_eq!(&[1, 2], trail.deref());
        assert_eq!(trail.num_checkpoints(), 1);
    }

    #[test]
    fn rolled_back_elements_are_given_in_reverse_order() {
        let mut trail = Trail::default();
        trail.push(1);

        let first = trail.checkpoint();
        trail.push(2);
        let _ = trail.checkpoint();
        trail.push(3);
        trail.push(4);

        let popped = trail.rollback(first).collect::<Vec<_>>();
        assert_eq!(vec![4, 3, 2], popped);
    }

    #[test]
    #[should_panic]
    fn rollback_to_released_checkpoint_panics() {
        let mut trail: Trail<u32> = Trail::default();

        let first = trail.checkpoint();
        let second = trail.checkpoint();
        let _ = trail.rollback(first);
        let _ = trail.rollback(second);
    }
}
