//! Counters describing a search run and the logging of those counters.

mod statistic_logger;
mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;

/// A loggable statistic.
///
/// See [`create_statistics_struct!`](crate::create_statistics_struct) for creating a struct of
/// statistics which implements this trait.
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log(self);
    }
}

/// Generates a struct of statistics, every field of which is logged under its own name.
///
/// # Example
/// ```rust
/// # use proctor_core::create_statistics_struct;
/// create_statistics_struct!(Statistics {
///     number_of_calls: u64
/// });
///
/// let statistics = Statistics::default();
///
/// assert_eq!(statistics.number_of_calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name {
            $($(#[$variable_documentation])* pub $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(
                    &self.$field,
                    statistic_logger.attach_to_prefix(stringify!($field)),
                );)+
            }
        }
    };
}

create_statistics_struct!(
    /// Counters collected while searching for a schedule.
    SearchStatistics {
        /// The number of values the scheduler committed to.
        decisions: u64,
        /// The number of decisions which propagation proved inconsistent.
        conflicts: u64,
        /// The number of times a decision point ran out of values and was abandoned.
        backtracks: u64,
        /// The number of times the constraint engine was run to a fixed point.
        propagation_rounds: u64,
        /// The largest number of simultaneously open decisions.
        max_depth: u64,
    }
);
