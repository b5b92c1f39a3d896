use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SYMPREC;
use crate::errors::{Result, ShapeError, TensorError};
use crate::interfaces::{CartesianOperation, Structure, Transformable};
use crate::tensors::index_algebra::{
    axis_permutations, contract_all_axes, flat_index, indices, num_elements, permute_axes,
    transform_axes, DIM,
};
use crate::tensors::square_tensor::validate_rotation;

/// A tensor over three-dimensional space.
///
/// Rank is fixed at construction and every axis has length 3. Values are
/// stored row-major (last axis fastest) and may be updated in place through
/// [`IndexMut`], but rank and shape never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NestedArray", into = "NestedArray")]
pub struct Tensor {
    rank: usize,
    data: Vec<f64>,
}

/// Arbitrarily nested numeric array, the serialized form of a [`Tensor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedArray {
    Value(f64),
    Array(Vec<NestedArray>),
}

impl NestedArray {
    /// Shape read along the first elements, then checked everywhere.
    pub fn shape(&self) -> std::result::Result<Vec<usize>, ShapeError> {
        let mut shape = Vec::new();
        let mut node = self;
        while let NestedArray::Array(items) = node {
            shape.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        self.check_shape(&shape, 0)?;
        Ok(shape)
    }

    fn check_shape(&self, shape: &[usize], depth: usize) -> std::result::Result<(), ShapeError> {
        match self {
            NestedArray::Value(_) if depth == shape.len() => Ok(()),
            NestedArray::Array(items) if depth < shape.len() && items.len() == shape[depth] => items
                .iter()
                .try_for_each(|item| item.check_shape(shape, depth + 1)),
            _ => Err(ShapeError::Ragged { depth }),
        }
    }

    /// Leaf values in row-major order
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            NestedArray::Value(v) => out.push(*v),
            NestedArray::Array(items) => items.iter().for_each(|item| item.flatten_into(out)),
        }
    }

    fn nest(data: &[f64], rank: usize) -> Self {
        if rank == 0 {
            return NestedArray::Value(data[0]);
        }
        let chunk = num_elements(rank - 1);
        NestedArray::Array(
            data.chunks(chunk)
                .map(|part| Self::nest(part, rank - 1))
                .collect(),
        )
    }
}

impl From<Vec<f64>> for NestedArray {
    fn from(values: Vec<f64>) -> Self {
        NestedArray::Array(values.into_iter().map(NestedArray::Value).collect())
    }
}

impl From<Vec<Vec<f64>>> for NestedArray {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        NestedArray::Array(rows.into_iter().map(NestedArray::from).collect())
    }
}

impl TryFrom<NestedArray> for Tensor {
    type Error = TensorError;

    fn try_from(nested: NestedArray) -> Result<Self> {
        let shape = nested.shape()?;
        let mut data = Vec::with_capacity(shape.iter().product());
        nested.flatten_into(&mut data);
        Tensor::new(&shape, data)
    }
}

impl From<Tensor> for NestedArray {
    fn from(tensor: Tensor) -> Self {
        NestedArray::nest(&tensor.data, tensor.rank)
    }
}

impl Tensor {
    /// Create a tensor from its shape and row-major values.
    pub fn new(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        if shape.is_empty() {
            return Err(ShapeError::Scalar.into());
        }
        if shape.iter().any(|&len| len != DIM) {
            return Err(ShapeError::AxisLength(shape.to_vec()).into());
        }
        let expected = num_elements(shape.len());
        if data.len() != expected {
            return Err(ShapeError::DataLength {
                expected,
                got: data.len(),
                shape: shape.to_vec(),
            }
            .into());
        }
        Ok(Tensor {
            rank: shape.len(),
            data,
        })
    }

    /// All-zero tensor. Panics if `rank` is 0.
    pub fn zeros(rank: usize) -> Self {
        assert!(rank >= 1, "a tensor needs at least one axis");
        Tensor {
            rank,
            data: vec![0.0; num_elements(rank)],
        }
    }

    /// Tensor whose value at every multi-index is `f(index)`. Panics if `rank` is 0.
    pub fn from_fn<F: FnMut(&[usize]) -> f64>(rank: usize, mut f: F) -> Self {
        assert!(rank >= 1, "a tensor needs at least one axis");
        Tensor {
            rank,
            data: indices(rank).map(|index| f(&index)).collect(),
        }
    }

    pub fn from_nested(nested: NestedArray) -> Result<Self> {
        Self::try_from(nested)
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn shape(&self) -> Vec<usize> {
        vec![DIM; self.rank]
    }

    /// Row-major values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.rank || index.iter().any(|&i| i >= DIM) {
            return None;
        }
        Some(self.data[flat_index(index)])
    }

    pub fn to_nested(&self) -> NestedArray {
        NestedArray::nest(&self.data, self.rank)
    }

    /// Rank-2 tensors as a matrix
    pub fn to_matrix(&self) -> Option<Matrix3<f64>> {
        (self.rank == 2).then(|| Matrix3::from_row_slice(&self.data))
    }

    /// Largest element-wise absolute difference; infinite if ranks differ.
    pub fn max_abs_diff(&self, other: &Tensor) -> f64 {
        if self.rank != other.rank {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub(crate) fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor {
            rank: self.rank,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Tensor, f: F) -> Tensor {
        assert_eq!(
            self.rank, other.rank,
            "element-wise operation on tensors of rank {} and {}",
            self.rank, other.rank
        );
        Tensor {
            rank: self.rank,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Copy with every |value| < `tol` set to zero
    pub fn zeroed(&self, tol: f64) -> Tensor {
        self.map_values(|v| if v.abs() < tol { 0.0 } else { v })
    }

    /// Copy rounded to `decimals` decimal places
    pub fn round(&self, decimals: i32) -> Tensor {
        let scale = 10f64.powi(decimals);
        self.map_values(|v| (v * scale).round() / scale)
    }

    /// Apply the rotation part of `op` to every axis.
    pub fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> Tensor {
        Tensor {
            rank: self.rank,
            data: transform_axes(&self.data, self.rank, &op.rotation_matrix()),
        }
    }

    /// Transform by a caller-supplied matrix that must be a proper rotation
    /// within `tol`.
    pub fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Tensor> {
        validate_rotation(matrix, tol)?;
        Ok(self.transform(matrix))
    }

    /// Reorder axes: axis `k` of the result is axis `perm[k]` of `self`.
    /// Panics unless `perm` is a permutation of `0..rank`.
    pub fn transpose_axes(&self, perm: &[usize]) -> Tensor {
        let mut seen = vec![false; self.rank];
        assert!(
            perm.len() == self.rank
                && perm
                    .iter()
                    .all(|&axis| axis < self.rank && !std::mem::replace(&mut seen[axis], true)),
            "{:?} is not a permutation of the axes of a rank-{} tensor",
            perm,
            self.rank
        );
        Tensor {
            rank: self.rank,
            data: permute_axes(&self.data, self.rank, perm),
        }
    }

    /// Mean over all permutations of the axes
    pub fn symmetrized(&self) -> Tensor {
        let perms = axis_permutations(self.rank);
        let count = perms.len() as f64;
        let sum = perms
            .iter()
            .map(|perm| permute_axes(&self.data, self.rank, perm))
            .fold(vec![0.0; self.data.len()], |mut acc, permuted| {
                acc.iter_mut().zip(permuted).for_each(|(a, p)| *a += p);
                acc
            });
        Tensor {
            rank: self.rank,
            data: sum.into_iter().map(|v| v / count).collect(),
        }
    }

    /// True if every permutation of the axes leaves the tensor unchanged
    /// within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        axis_permutations(self.rank).iter().skip(1).all(|perm| {
            permute_axes(&self.data, self.rank, perm)
                .iter()
                .zip(&self.data)
                .all(|(p, v)| (p - v).abs() < tol)
        })
    }

    /// Mean of the tensor transformed by each operation; the projection onto
    /// the subspace invariant under the group the operations form.
    pub fn average_over_operations<O: CartesianOperation>(&self, operations: &[O]) -> Tensor {
        if operations.is_empty() {
            return self.clone();
        }
        let mut sum = Tensor::zeros(self.rank);
        for op in operations {
            sum += &self.transform(op);
        }
        sum / operations.len() as f64
    }

    /// Average over the point group of `structure`.
    pub fn fit_to_structure<S: Structure + ?Sized>(&self, structure: &S, symprec: f64) -> Tensor {
        let operations = structure.symmetry_operations(symprec);
        debug!(
            "fitting rank-{} tensor over {} symmetry operations",
            self.rank,
            operations.len()
        );
        self.average_over_operations(&operations)
    }

    /// True if fitting to `structure` moves no element by `tol` or more.
    pub fn is_fit_to_structure<S: Structure + ?Sized>(&self, structure: &S, tol: f64) -> bool {
        self.max_abs_diff(&self.fit_to_structure(structure, DEFAULT_SYMPREC)) < tol
    }

    /// Contract every axis with the unit vector along `direction`, e.g. the
    /// directional stiffness nᵢnⱼnₖnₗCᵢⱼₖₗ of an elastic tensor.
    pub fn project(&self, direction: &Vector3<f64>) -> f64 {
        let n = direction.normalize();
        contract_all_axes(&self.data, self.rank, &[n.x, n.y, n.z])
    }
}

impl Default for Tensor {
    /// A zero vector
    fn default() -> Self {
        Tensor::zeros(1)
    }
}

impl Transformable for Tensor {
    fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> Self {
        Tensor::transform(self, op)
    }

    fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Self> {
        Tensor::rotate(self, matrix, tol)
    }
}

// ======================== CONVERSIONS ========================

impl From<[f64; 3]> for Tensor {
    fn from(values: [f64; 3]) -> Self {
        Tensor {
            rank: 1,
            data: values.to_vec(),
        }
    }
}

impl From<[[f64; 3]; 3]> for Tensor {
    fn from(values: [[f64; 3]; 3]) -> Self {
        Tensor {
            rank: 2,
            data: values.iter().flatten().copied().collect(),
        }
    }
}

impl From<[[[f64; 3]; 3]; 3]> for Tensor {
    fn from(values: [[[f64; 3]; 3]; 3]) -> Self {
        Tensor {
            rank: 3,
            data: values.iter().flatten().flatten().copied().collect(),
        }
    }
}

impl From<[[[[f64; 3]; 3]; 3]; 3]> for Tensor {
    fn from(values: [[[[f64; 3]; 3]; 3]; 3]) -> Self {
        Tensor {
            rank: 4,
            data: values.iter().flatten().flatten().flatten().copied().collect(),
        }
    }
}

impl From<Vector3<f64>> for Tensor {
    fn from(v: Vector3<f64>) -> Self {
        Tensor::from([v.x, v.y, v.z])
    }
}

impl From<Matrix3<f64>> for Tensor {
    fn from(m: Matrix3<f64>) -> Self {
        Tensor {
            rank: 2,
            // nalgebra stores column-major
            data: m.transpose().iter().copied().collect(),
        }
    }
}

// ======================== INDEXING ========================

impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f64;

    fn index(&self, index: [usize; N]) -> &f64 {
        assert!(
            N == self.rank && index.iter().all(|&i| i < DIM),
            "index {:?} out of bounds for a rank-{} tensor",
            index,
            self.rank
        );
        &self.data[flat_index(&index)]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut f64 {
        assert!(
            N == self.rank && index.iter().all(|&i| i < DIM),
            "index {:?} out of bounds for a rank-{} tensor",
            index,
            self.rank
        );
        &mut self.data[flat_index(&index)]
    }
}

// ======================== ARITHMETIC ========================

impl Add<&Tensor> for &Tensor {
    type Output = Tensor;

    fn add(self, rhs: &Tensor) -> Tensor {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add for Tensor {
    type Output = Tensor;

    fn add(self, rhs: Tensor) -> Tensor {
        &self + &rhs
    }
}

impl AddAssign<&Tensor> for Tensor {
    fn add_assign(&mut self, rhs: &Tensor) {
        *self = &*self + rhs;
    }
}

impl Sub<&Tensor> for &Tensor {
    type Output = Tensor;

    fn sub(self, rhs: &Tensor) -> Tensor {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub for Tensor {
    type Output = Tensor;

    fn sub(self, rhs: Tensor) -> Tensor {
        &self - &rhs
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map_values(|v| -v)
    }
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f64) -> Tensor {
        self.map_values(|v| v * rhs)
    }
}

impl Mul<f64> for Tensor {
    type Output = Tensor;

    fn mul(self, rhs: f64) -> Tensor {
        &self * rhs
    }
}

impl Div<f64> for Tensor {
    type Output = Tensor;

    fn div(self, rhs: f64) -> Tensor {
        self.map_values(|v| v / rhs)
    }
}

// ======================== APPROXIMATE EQUALITY ========================

impl AbsDiffEq for Tensor {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rank == other.rank
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Tensor {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.rank == other.rank
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
