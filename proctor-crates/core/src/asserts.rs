//! Assertion macros guarding the internal invariants of the engine.
//!
//! A failing assertion signals a defect in the engine, never a property of the instance; these
//! checks are therefore not recoverable. The amount of checking is controlled by
//! [`PROCTOR_ASSERT_LEVEL_DEFINITION`]: cheap checks are always on, while expensive checks (such
//! as re-verifying every solution from scratch) are only enabled in tests or with the
//! `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const PROCTOR_ASSERT_LEVEL_DEFINITION: u8 = PROCTOR_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const PROCTOR_ASSERT_LEVEL_DEFINITION: u8 = PROCTOR_ASSERT_MODERATE;

pub const PROCTOR_ASSERT_SIMPLE: u8 = 1;
pub const PROCTOR_ASSERT_MODERATE: u8 = 2;
pub const PROCTOR_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! proctor_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PROCTOR_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! proctor_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PROCTOR_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! proctor_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PROCTOR_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! proctor_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::PROCTOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PROCTOR_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
