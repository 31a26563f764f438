use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers, letting the scheduler run until it finds a
/// schedule or proves that none exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
