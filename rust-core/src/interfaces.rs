// Definitions that are used throughout all modules

use nalgebra::{Matrix3, Vector3};

use crate::errors::Result;
use crate::lattice::lattice3d::Lattice3D;
use crate::lattice::lattice_types::CrystalSystem;
use crate::symmetries::symmetry_operations::SymmetryOperation;

/// Anything that acts on Cartesian space through a 3×3 linear part.
///
/// Tensors only ever see [`rotation_matrix`](CartesianOperation::rotation_matrix);
/// translations matter for points only.
pub trait CartesianOperation {
    /// The linear (rotation or rotoinversion) part in Cartesian coordinates.
    fn rotation_matrix(&self) -> Matrix3<f64>;

    /// Apply the full operation to a Cartesian point.
    fn operate(&self, point: &Vector3<f64>) -> Vector3<f64>;
}

/// A bare matrix acts as an operation without translation.
impl CartesianOperation for Matrix3<f64> {
    fn rotation_matrix(&self) -> Matrix3<f64> {
        *self
    }

    fn operate(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self * point
    }
}

/// The crystal-structure capability consumed by structure fitting, IEEE
/// conversion and symmetry reduction.
pub trait Structure {
    /// Conventional lattice, lattice vectors as columns.
    fn lattice(&self) -> &Lattice3D;

    /// Crystal system, `None` when it cannot be classified.
    fn crystal_system(&self) -> Option<CrystalSystem>;

    /// Ordered Cartesian point-group operations. `symprec` is handed to
    /// whatever symmetry search backs the structure.
    fn symmetry_operations(&self, symprec: f64) -> Vec<SymmetryOperation>;
}

/// Objects that can be carried through a change of Cartesian frame.
pub trait Transformable: Sized {
    /// Apply the rotation part of `op` to every axis.
    fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> Self;

    /// Like [`transform`](Transformable::transform), but the matrix must be a
    /// proper rotation within `tol`.
    fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Self>;
}
