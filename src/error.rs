//! Error types for matexp

use thiserror::Error;

use crate::matrix::MAX_DIM;

/// Precondition violations detected at the crate boundary.
///
/// The panicking entry points ([`expm`](crate::expm()), [`expm_into`](crate::expm_into))
/// treat every variant as fatal; the `try_` variants hand it back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpmError {
    /// Zero-sized matrix
    #[error("matrix dimension must be positive")]
    EmptyMatrix,

    /// Signed dimension from the C interface below zero
    #[error("matrix dimension {n} is negative")]
    NegativeDimension { n: isize },

    /// Dimension beyond the fixed scratch capacity
    #[error("matrix dimension {n} exceeds the supported maximum of {max}", max = MAX_DIM)]
    TooLarge { n: usize },

    /// Input and output disagree on the dimension
    #[error("dimension mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Raw buffer too short or too long for the requested dimension
    #[error("buffer of length {len} does not hold a {n}x{n} matrix")]
    BufferLength { len: usize, n: usize },

    /// The Padé denominator had a zero pivot
    #[error("Padé denominator is singular")]
    SingularDenominator,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ExpmError>;

/// Validate a requested dimension against the supported range.
pub(crate) fn check_dim(n: usize) -> Result<()> {
    if n == 0 {
        Err(ExpmError::EmptyMatrix)
    } else if n > MAX_DIM {
        Err(ExpmError::TooLarge { n })
    } else {
        Ok(())
    }
}

/// Validate a signed dimension as passed across the C boundary.
#[cfg_attr(not(feature = "ffi"), allow(dead_code))]
pub(crate) fn check_signed_dim(n: isize) -> Result<usize> {
    let n = usize::try_from(n).map_err(|_| ExpmError::NegativeDimension { n })?;
    check_dim(n)?;
    Ok(n)
}
