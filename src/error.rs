use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by field, magnifier and simulation operations.
///
/// All of them are detected synchronously at the call boundary; nothing is
/// retried and a failing operation leaves the previous state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("cell ({x}, {y}) is outside the {width}x{height} field")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("pixel buffer is {got_width}x{got_height}, expected {want_width}x{want_height}")]
    DimensionMismatch {
        got_width: usize,
        got_height: usize,
        want_width: usize,
        want_height: usize,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
