//! Error types for tensor construction, validation and transformation.
//!
//! Every failure in this crate is a deterministic validation failure, so all
//! of them surface as [`TensorError`] to the immediate caller.

use thiserror::Error;

/// Top-level error type for all tensor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Shape validation errors (construction, Voigt decoding, rank checks)
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Matrix is singular: |det| = {det:e} is below {tol:e}")]
    SingularMatrix { det: f64, tol: f64 },

    #[error(
        "Matrix is not a proper rotation: max |MᵀM - I| = {deviation:e}, det = {det:.6} (tolerance {tol:e})"
    )]
    NotRotation { deviation: f64, det: f64, tol: f64 },

    #[error(
        "Tensor is not Voigt-notation compatible: collapsed components differ by {deviation:e} (tolerance {tol:e})"
    )]
    NotVoigtCompatible { deviation: f64, tol: f64 },

    #[error("Crystal system of the structure could not be classified")]
    UnclassifiableCrystalSystem,

    #[error("Lattice basis is degenerate: |det| = {det:e} is below {tol:e}")]
    DegenerateLattice { det: f64, tol: f64 },
}

/// Shape validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("every axis must have length 3, got shape {0:?}")]
    AxisLength(Vec<usize>),

    #[error("nested array is ragged at depth {depth}")]
    Ragged { depth: usize },

    #[error("a scalar is not a tensor, rank must be at least 1")]
    Scalar,

    #[error("expected rank {expected}, got rank {got}")]
    Rank { expected: usize, got: usize },

    #[error("data length {got} does not match the {expected} entries of shape {shape:?}")]
    DataLength {
        expected: usize,
        got: usize,
        shape: Vec<usize>,
    },

    #[error("Voigt input of shape {0:?} matches none of (6), (3, 6) or (6, 6)")]
    VoigtShape(Vec<usize>),

    #[error("Voigt notation is defined for ranks 2, 3 and 4, got rank {0}")]
    VoigtRank(usize),
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, TensorError>;
