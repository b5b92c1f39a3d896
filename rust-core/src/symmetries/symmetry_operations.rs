use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::interfaces::CartesianOperation;
use crate::tensors::tensor::Tensor;

/// Highest order considered when searching for R^n = I. Crystallographic
/// operations never exceed 6.
const MAX_OPERATION_ORDER: usize = 12;

/// A single symmetry operation in Cartesian coordinates: rotation + translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryOperation {
    /// Orthogonal rotation matrix with determinant ±1
    pub rotation: Matrix3<f64>,
    /// Cartesian translation shift
    pub translation: Vector3<f64>,
}

impl SymmetryOperation {
    /// Create a new symmetry operation
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create identity operation
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Create the inversion through the origin
    pub fn inversion() -> Self {
        Self {
            rotation: -Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Pure point operation (no translation)
    pub fn from_rotation(rotation: Matrix3<f64>) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Rotation by `angle` about `axis` (right-hand rule), followed by a translation.
    ///
    /// `angle_in_radians = false` reads the angle in degrees.
    pub fn from_axis_angle_and_translation(
        axis: Vector3<f64>,
        angle: f64,
        angle_in_radians: bool,
        translation: Vector3<f64>,
    ) -> Self {
        let angle = if angle_in_radians {
            angle
        } else {
            angle.to_radians()
        };
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle);
        Self::new(rotation.into_inner(), translation)
    }

    /// Apply symmetry operation to a point
    pub fn apply(&self, point: Vector3<f64>) -> Vector3<f64> {
        self.rotation * point + self.translation
    }

    /// Apply the rotation part to every axis of a tensor
    pub fn transform_tensor(&self, tensor: &Tensor) -> Tensor {
        tensor.transform(self)
    }

    /// Inverse operation: x = R⁻¹ (y - t). Orthogonality makes R⁻¹ = Rᵀ.
    pub fn inverse(&self) -> Self {
        let inverse_rotation = self.rotation.transpose();
        Self {
            rotation: inverse_rotation,
            translation: -(inverse_rotation * self.translation),
        }
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    /// Determinant of the rotation part, +1 for proper and -1 for improper operations
    pub fn determinant(&self) -> f64 {
        self.rotation.determinant()
    }

    /// Order of the point part: the smallest n with Rⁿ = I, or `None` if the
    /// rotation is not of finite crystallographic order.
    pub fn order(&self, tol: f64) -> Option<usize> {
        let mut power = self.rotation;
        for n in 1..=MAX_OPERATION_ORDER {
            if (power - Matrix3::identity()).abs().max() < tol {
                return Some(n);
            }
            power = self.rotation * power;
        }
        None
    }

    /// Check if this is the identity operation
    pub fn is_identity(&self, tol: f64) -> bool {
        (self.rotation - Matrix3::identity()).abs().max() < tol && self.translation.norm() < tol
    }
}

impl Default for SymmetryOperation {
    fn default() -> Self {
        Self::identity()
    }
}

impl CartesianOperation for SymmetryOperation {
    fn rotation_matrix(&self) -> Matrix3<f64> {
        self.rotation
    }

    fn operate(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.apply(*point)
    }
}
