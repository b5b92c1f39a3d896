// Symmetries module: Contains symmetry operations and point-group generation
// This module provides the Cartesian operations that tensors are averaged and compared over

// ======================== MODULE DECLARATIONS ========================
pub mod symmetry_operations;
pub mod symmetry_point_groups;


// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::SymmetryOperation; // struct - Cartesian symmetry operation (rotation + translation)
// SymmetryOperation impl methods:
//   new(rotation, translation) -> Self                             - creates operation
//   identity() / inversion() -> Self                               - special operations
//   from_rotation(rotation) -> Self                                - point operation without translation
//   from_axis_angle_and_translation(axis, angle, in_radians, t)    - rotation about an axis plus translation
//   apply(&self, point: Vector3<f64>) -> Vector3<f64>              - applies symmetry operation to point
//   inverse(&self) -> Self                                         - returns inverse operation
//   compose(&self, other: &Self) -> Self                           - self ∘ other
//   order(&self, tol: f64) -> Option<usize>                        - smallest n with Rⁿ = I
//   is_identity(&self, tol: f64) -> bool                           - identity check

// ======================== POINT GROUP GENERATORS ========================
pub use symmetry_point_groups::{
    generate_point_group,            // fn(generators: &[Matrix3<f64>], tol: f64) -> Vec<SymmetryOperation> - group closure
    generate_holohedry,              // fn(system: CrystalSystem) -> Vec<SymmetryOperation> - lattice point group of a crystal system

    // === SPECIFIC CRYSTAL SYSTEM GENERATORS ===
    generate_cubic_operations,       // fn() -> Vec<SymmetryOperation> - m-3m (48)
    generate_hexagonal_operations,   // fn() -> Vec<SymmetryOperation> - 6/mmm (24)
    generate_tetragonal_operations,  // fn() -> Vec<SymmetryOperation> - 4/mmm (16)
    generate_orthorhombic_operations, // fn() -> Vec<SymmetryOperation> - mmm (8)
    generate_trigonal_operations,    // fn() -> Vec<SymmetryOperation> - -3m (12)
    generate_monoclinic_operations,  // fn() -> Vec<SymmetryOperation> - 2/m (4)
    generate_triclinic_operations,   // fn() -> Vec<SymmetryOperation> - -1 (2)

    // === GENERATOR MATRICES (standard setting) ===
    four_fold_z,                     // fn() -> Matrix3<f64> - 90° about z
    mirror_x,                        // fn() -> Matrix3<f64> - reflection x → -x
    six_fold_z,                      // fn() -> Matrix3<f64> - 60° about z
    three_fold_body_diagonal,        // fn() -> Matrix3<f64> - 120° about [111]
    three_fold_z,                    // fn() -> Matrix3<f64> - 120° about z
    two_fold_x,                      // fn() -> Matrix3<f64> - 180° about x
    two_fold_y,                      // fn() -> Matrix3<f64> - 180° about y
};
