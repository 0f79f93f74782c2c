//! Argument errors
//!
//! The only error the bridge can detect on its own. Platform calls are
//! infallible at this layer, so nothing else is reported.

use core::fmt;

use crate::args::ArgKind;

/// Rejected call arguments
///
/// Returned before any platform call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// Wrong number of arguments
    WrongCount { given: usize, expected: u8 },
    /// Argument at `index` has the wrong type
    WrongType {
        index: usize,
        expected: ArgKind,
        given: ArgKind,
    },
    /// Integer argument at `index` is negative
    OutOfRange { index: usize, value: i64 },
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::WrongCount { given, expected } => write!(
                f,
                "wrong number of arguments (given {}, expected {})",
                given, expected
            ),
            ArgumentError::WrongType {
                index,
                expected,
                given,
            } => write!(
                f,
                "argument {}: can't convert {} into {}",
                index + 1,
                given.name(),
                expected.name()
            ),
            ArgumentError::OutOfRange { index, value } => write!(
                f,
                "argument {}: {} is negative (expected non-negative Integer)",
                index + 1,
                value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_count_message() {
        let err = ArgumentError::WrongCount {
            given: 0,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "wrong number of arguments (given 0, expected 1)"
        );
    }

    #[test]
    fn test_wrong_type_message() {
        let err = ArgumentError::WrongType {
            index: 0,
            expected: ArgKind::Integer,
            given: ArgKind::Text,
        };
        assert_eq!(err.to_string(), "argument 1: can't convert String into Integer");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ArgumentError::OutOfRange {
            index: 0,
            value: -5,
        };
        assert!(err.to_string().contains("-5 is negative"));
    }
}
