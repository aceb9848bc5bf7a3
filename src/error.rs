//! Error type shared by every fallible operation in the crate.

use std::fmt;

/// Errors raised when callers hand the core values it cannot accept.
///
/// Every variant is a local, synchronous failure: nothing is retried and
/// nothing is clamped on the caller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A constructor argument was malformed (zero capacity, mismatched list
    /// lengths, non-positive frequency or time step, ...)
    InvalidArgument(String),
    /// An amplitude index was outside `[0, len)`
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of constituents on the axis
        len: usize,
    },
    /// A phase offset was outside `[0, 360]` degrees
    OffsetOutOfRange(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(s) => write!(f, "invalid argument: {}", s),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "amplitude index {} out of range for {} constituents", index, len)
            }
            Error::OffsetOutOfRange(v) => {
                write!(f, "phase offset {} outside accepted range [0, 360] degrees", v)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
