use std::ops::Index;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::{SINGULAR_TOLERANCE, UNIT_VECTOR_CUTOFF};
use crate::errors::{Result, ShapeError, TensorError};
use crate::interfaces::{CartesianOperation, Transformable};
use crate::tensors::tensor::{NestedArray, Tensor};

/// Which side the stretch sits on in a polar decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarSide {
    /// T = U·P
    #[default]
    Right,
    /// T = P·U
    Left,
}

/// Rank-2 tensor with matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Tensor", into = "Tensor")]
pub struct SquareTensor {
    matrix: Matrix3<f64>,
}

/// Fails with `NotRotation` unless `matrix` is orthogonal with determinant +1
/// within `tol`.
pub fn validate_rotation(matrix: &Matrix3<f64>, tol: f64) -> Result<()> {
    let deviation = (matrix.transpose() * matrix - Matrix3::identity())
        .abs()
        .max();
    let det = matrix.determinant();
    if deviation < tol && (det - 1.0).abs() < tol {
        Ok(())
    } else {
        Err(TensorError::NotRotation { deviation, det, tol })
    }
}

/// Unit vector along `v`; vectors shorter than the cutoff come back unchanged.
fn unit_vector(v: Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm < UNIT_VECTOR_CUTOFF {
        v
    } else {
        v / norm
    }
}

impl SquareTensor {
    pub fn new(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    /// Build from row lists. Anything other than three rows of three values
    /// is a shape error.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let tensor = Tensor::try_from(NestedArray::from(rows.to_vec()))?;
        Self::try_from(tensor)
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn to_tensor(&self) -> Tensor {
        Tensor::from(self.matrix)
    }

    /// Transpose
    pub fn trans(&self) -> SquareTensor {
        Self::new(self.matrix.transpose())
    }

    /// Inverse; fails with `SingularMatrix` when |det| is numerically zero.
    pub fn inv(&self) -> Result<SquareTensor> {
        let det = self.det();
        if det.abs() < SINGULAR_TOLERANCE {
            return Err(TensorError::SingularMatrix {
                det,
                tol: SINGULAR_TOLERANCE,
            });
        }
        self.matrix
            .try_inverse()
            .map(Self::new)
            .ok_or(TensorError::SingularMatrix {
                det,
                tol: SINGULAR_TOLERANCE,
            })
    }

    pub fn det(&self) -> f64 {
        self.matrix.determinant()
    }

    /// ½(T + Tᵀ)
    pub fn symmetrized(&self) -> SquareTensor {
        Self::new((self.matrix + self.matrix.transpose()) * 0.5)
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        (self.matrix - self.matrix.transpose()).abs().max() < tol
    }

    /// Coefficients of the characteristic polynomial: [I1, I2, I3] with
    /// I1 the trace, I2 the sum of principal 2×2 minors and I3 the determinant.
    pub fn principal_invariants(&self) -> [f64; 3] {
        let m = &self.matrix;
        let i2 = m[(0, 0)] * m[(1, 1)] + m[(1, 1)] * m[(2, 2)] + m[(2, 2)] * m[(0, 0)]
            - m[(0, 1)] * m[(1, 0)]
            - m[(0, 2)] * m[(2, 0)]
            - m[(1, 2)] * m[(2, 1)];
        [m.trace(), i2, self.det()]
    }

    /// Orthogonal with determinant +1, within `tol`.
    pub fn is_rotation(&self, tol: f64) -> bool {
        validate_rotation(&self.matrix, tol).is_ok()
    }

    pub fn get_scaled(&self, scale_factor: f64) -> SquareTensor {
        Self::new(self.matrix * scale_factor)
    }

    /// Split into an orthogonal part U and a symmetric positive
    /// semi-definite stretch P from the SVD T = W·Σ·Vᵀ: U = W·Vᵀ, and
    /// P = V·Σ·Vᵀ (right) or W·Σ·Wᵀ (left). Returns (U, P).
    pub fn polar_decomposition(&self, side: PolarSide) -> (SquareTensor, SquareTensor) {
        let svd = self.matrix.svd(true, true);
        let w = svd.u.expect("SVD computed with left singular vectors");
        let v_t = svd.v_t.expect("SVD computed with right singular vectors");
        let sigma = Matrix3::from_diagonal(&svd.singular_values);

        let u = w * v_t;
        let p = match side {
            PolarSide::Right => v_t.transpose() * sigma * v_t,
            PolarSide::Left => w * sigma * w.transpose(),
        };
        (Self::new(u), Self::new(p))
    }

    /// Re-orthonormalize a near-rotation from its first two rows: x along
    /// row 0, y from row 1 with its x component removed, z = x × y.
    pub fn refine_rotation(&self) -> SquareTensor {
        let x = unit_vector(self.matrix.row(0).transpose());
        let row1 = unit_vector(self.matrix.row(1).transpose());
        let y = unit_vector(row1 - x.dot(&row1) * x);
        let z = x.cross(&y);
        Self::new(Matrix3::from_rows(&[
            x.transpose(),
            y.transpose(),
            z.transpose(),
        ]))
    }

    /// R·T·Rᵀ with the rotation part of `op`
    pub fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> SquareTensor {
        let r = op.rotation_matrix();
        Self::new(r * self.matrix * r.transpose())
    }

    pub fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<SquareTensor> {
        validate_rotation(matrix, tol)?;
        Ok(self.transform(matrix))
    }
}

impl Default for SquareTensor {
    fn default() -> Self {
        Self::new(Matrix3::zeros())
    }
}

impl Transformable for SquareTensor {
    fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> Self {
        SquareTensor::transform(self, op)
    }

    fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Self> {
        SquareTensor::rotate(self, matrix, tol)
    }
}

impl Index<(usize, usize)> for SquareTensor {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.matrix[index]
    }
}

impl TryFrom<Tensor> for SquareTensor {
    type Error = TensorError;

    fn try_from(tensor: Tensor) -> Result<Self> {
        tensor
            .to_matrix()
            .map(Self::new)
            .ok_or_else(|| {
                ShapeError::Rank {
                    expected: 2,
                    got: tensor.rank(),
                }
                .into()
            })
    }
}

impl From<SquareTensor> for Tensor {
    fn from(square: SquareTensor) -> Self {
        square.to_tensor()
    }
}

impl From<Matrix3<f64>> for SquareTensor {
    fn from(matrix: Matrix3<f64>) -> Self {
        Self::new(matrix)
    }
}

impl From<[[f64; 3]; 3]> for SquareTensor {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_fn(|i, j| rows[i][j]))
    }
}

impl From<SquareTensor> for Matrix3<f64> {
    fn from(square: SquareTensor) -> Self {
        square.matrix
    }
}
