//! Crate-wide error taxonomy.
//!
//! Every fallible operation in this crate — decoding an octet string,
//! inverting a degenerate field element, drawing a scalar from an
//! exhausted entropy source — reports failure through this single enum
//! rather than through panics or sentinel values.

/// Failure modes surfaced by the SM9 arithmetic core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sm9CoreError {
    /// A decoded octet or hex string is malformed: wrong length, wrong
    /// leading tag byte, or non-hex characters.
    InvalidEncoding,
    /// A decoded scalar or field element is not reduced, i.e. it is
    /// greater than or equal to its modulus.
    NotCanonical,
    /// A decoded point does not satisfy its curve equation.
    NotOnCurve,
    /// An inversion was attempted on a zero value.
    DegenerateInput,
    /// The entropy source could not produce the requested number of bytes.
    InsufficientEntropy,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Sm9CoreError>;
