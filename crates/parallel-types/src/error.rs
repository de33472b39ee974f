//! Validation errors for the schema model.

/// Errors raised when constructing a schema value from unchecked input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The requested number of years is not one of the supported horizons.
    #[error("unsupported horizon: {0} years (allowed: 3, 5, 7, 10)")]
    UnsupportedHorizon(u32),

    /// A timeline slot label was not `A`, `B`, or `C`.
    #[error("unknown timeline slot: {0}")]
    UnknownSlot(String),
}
