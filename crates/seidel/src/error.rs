//! Error types for the geometric primitives and the solver.
//!
//! Degenerate geometry (parallel planes, vanishing reductions) is not an
//! error: those cases come back as `None` or `Reduced::{Free, Empty}`.
//! Infeasibility is a `ResultType`, not an error either.

use thiserror::Error;

/// Failures of the geometric primitives.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeomError {
    /// Two operands of an operation that needs equal dimensions differ.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// The operation is not defined in this dimension.
    #[error("{op} is not supported in dimension {dim}")]
    UnsupportedDimension { op: &'static str, dim: usize },
    /// A plane or half-space was given a zero (or non-finite) normal.
    #[error("normal vector is zero or coefficients are not finite")]
    DegenerateNormal,
}

/// Failures of solver construction and use.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("half-space {index} has dimension {found}, direction has {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("direction has a non-finite coefficient")]
    NonFiniteDirection,
    #[error("constraint set is empty")]
    EmptyConstraintSet,
    #[error("solver has already been run")]
    AlreadyRun,
    #[error(transparent)]
    Geometry(#[from] GeomError),
}
