// Constants

// Tolerances
pub const LATTICE_TOLERANCE: f64 = 1e-10; // Minimum |det| of a lattice basis
pub const ZERO_TOLERANCE: f64 = 1e-3; // Default threshold for Tensor::zeroed
pub const SYMMETRIC_TOLERANCE: f64 = 1e-5; // Axis-permutation invariance
pub const ROTATION_TOLERANCE: f64 = 1e-3; // Orthogonality and det = +1 checks in rotate
pub const FIT_TOLERANCE: f64 = 1e-2; // is_fit_to_structure
pub const VOIGT_TOLERANCE: f64 = 1e-6; // Agreement of entries collapsed into one Voigt cell
pub const REDUCE_TOLERANCE: f64 = 1e-8; // symmetry_reduce equivalence
pub const IEEE_ROTATION_TOLERANCE: f64 = 1e-2; // Rotation into the IEEE frame
pub const SINGULAR_TOLERANCE: f64 = 1e-12; // |det| below this is treated as singular
pub const GROUP_CLOSURE_TOLERANCE: f64 = 1e-6; // Matrix identity when closing a point group
pub const ANGLE_TOLERANCE: f64 = 1e-6; // Lattice angle comparisons (radians)
pub const UNIT_VECTOR_CUTOFF: f64 = 1e-8; // Vectors shorter than this are not normalized

// Defaults
pub const DEFAULT_SYMPREC: f64 = 0.1; // Passed through to symmetry-operation providers
