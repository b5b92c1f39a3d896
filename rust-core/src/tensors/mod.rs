// Tensors module: Property tensors over 3D space and their symmetry algorithms
// This module provides the generic tensor, its rank-2 specialization, batches, Voigt notation,
// structure fitting, IEEE reorientation and symmetry reduction

// ======================== MODULE DECLARATIONS ========================
pub mod ieee;
pub mod index_algebra;
pub mod square_tensor;
pub mod symmetry_reduce;
pub mod tensor;
pub mod tensor_collection;
pub mod voigt;

// Test modules
#[cfg(test)]
mod _test_fixtures;
mod _tests_ieee;
mod _tests_square_tensor;
mod _tests_tensor_collection;

// ======================== CORE TENSOR ========================
pub use tensor::{
    NestedArray,                    // enum - nested numeric array, the serialized tensor form
    Tensor,                         // struct - rank-r tensor, every axis of length 3, row-major storage
};
// Tensor impl methods:
//   new(shape: &[usize], data: Vec<f64>) -> Result<Self>           - validates axis lengths and data length
//   zeros(rank) / from_fn(rank, f) -> Self                         - constructors
//   rank / shape / as_slice / get / to_matrix                      - accessors
//   zeroed(&self, tol: f64) -> Tensor                              - small values set to zero
//   round(&self, decimals: i32) -> Tensor                          - rounded copy
//   transform(&self, op: &O) -> Tensor                             - rotation part applied to every axis
//   rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Tensor> - transform by a validated rotation
//   transpose_axes(&self, perm: &[usize]) -> Tensor                - axis permutation
//   symmetrized(&self) -> Tensor                                   - mean over all axis permutations
//   is_symmetric(&self, tol: f64) -> bool                          - invariance under axis permutations
//   average_over_operations(&self, ops: &[O]) -> Tensor            - group average
//   fit_to_structure(&self, structure, symprec) -> Tensor          - average over the structure's point group
//   is_fit_to_structure(&self, structure, tol) -> bool             - fitting changes nothing within tol
//   project(&self, direction: &Vector3<f64>) -> f64                - contraction with a unit vector on every axis
//   max_abs_diff(&self, other: &Tensor) -> f64                     - element-wise distance

// ======================== SQUARE TENSOR ========================
pub use square_tensor::{
    PolarSide,                      // enum - Right (T = U·P) or Left (T = P·U)
    SquareTensor,                   // struct - rank-2 tensor backed by Matrix3<f64>
    validate_rotation,              // fn(matrix: &Matrix3<f64>, tol: f64) -> Result<()> - proper rotation check
};
// SquareTensor impl methods:
//   from_rows(rows: &[Vec<f64>]) -> Result<Self>                   - validated construction
//   trans / inv / det                                              - transpose, inverse (fails when singular), determinant
//   symmetrized(&self) -> SquareTensor                             - ½(T + Tᵀ)
//   principal_invariants(&self) -> [f64; 3]                        - trace, sum of principal minors, determinant
//   is_rotation(&self, tol: f64) -> bool                           - orthogonal with det +1
//   get_scaled(&self, scale_factor: f64) -> SquareTensor           - scaled copy
//   polar_decomposition(&self, side: PolarSide) -> (U, P)          - SVD based polar decomposition
//   refine_rotation(&self) -> SquareTensor                         - re-orthonormalized near-rotation

// ======================== VOIGT NOTATION ========================
pub use voigt::{
    REVERSE_VOIGT_MAP,              // const [[usize; 3]; 3] - index pair → Voigt index
    VOIGT_MAP,                      // const [(usize, usize); 6] - Voigt index → index pair
    Voigt,                          // enum - Rank2 (6), Rank3 (3×6), Rank4 (6×6)
};
// Tensor impl methods (voigt.rs):
//   voigt(&self) -> Result<Voigt>                                  - lossless compression or NotVoigtCompatible
//   from_voigt(voigt: &Voigt) -> Tensor                            - expansion without shear rescaling
//   is_voigt_symmetric(&self, tol: f64) -> bool                    - compressible without loss
//   voigt_symmetrized(&self) -> Result<Tensor>                     - pair averaged, rank 4 also major-symmetrized

// ======================== IEEE ORIENTATION ========================
pub use ieee::get_ieee_rotation;    // fn(structure: &S) -> Result<SquareTensor> - rows are the IEEE axes
// Tensor impl methods (ieee.rs):
//   convert_to_ieee(&self, structure, initial_fit: bool) -> Result<Tensor>

// ======================== COLLECTIONS & REDUCTION ========================
pub use symmetry_reduce::{
    TensorMapping,                  // struct - tolerance-keyed ordered map
    symmetry_reduce,                // fn(tensors, structure, tol, symprec) -> TensorMapping<Vec<SymmetryOperation>>
    symmetry_reduce_with_operations, // fn(tensors, operations, tol) -> TensorMapping<Vec<SymmetryOperation>>
};
pub use tensor_collection::TensorCollection; // struct - batch of tensors with element-wise operations
