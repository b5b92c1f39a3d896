use std::ops::Index;

use log::debug;
use nalgebra::{Matrix3, Vector3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_SYMPREC, IEEE_ROTATION_TOLERANCE};
use crate::errors::Result;
use crate::interfaces::{CartesianOperation, Structure, Transformable};
use crate::tensors::ieee::get_ieee_rotation;
use crate::tensors::square_tensor::validate_rotation;
use crate::tensors::tensor::Tensor;
use crate::tensors::voigt::Voigt;

/// Ordered batch of tensors, ranks may differ.
///
/// Tensor-valued operations return a new collection; predicates hold only if
/// they hold for every element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TensorCollection {
    tensors: Vec<Tensor>,
}

impl TensorCollection {
    pub fn new(tensors: Vec<Tensor>) -> Self {
        Self { tensors }
    }

    /// Decode every Voigt form independently
    pub fn from_voigt(voigts: &[Voigt]) -> Self {
        voigts.iter().map(Tensor::from_voigt).collect()
    }

    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tensor> {
        self.tensors.iter()
    }

    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }

    pub fn into_inner(self) -> Vec<Tensor> {
        self.tensors
    }

    pub fn push(&mut self, tensor: Tensor) {
        self.tensors.push(tensor);
    }

    pub fn ranks(&self) -> Vec<usize> {
        self.tensors.iter().map(Tensor::rank).collect()
    }

    #[cfg(feature = "parallel")]
    fn map_tensors<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Tensor) -> T + Sync + Send,
    {
        self.tensors.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn map_tensors<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Tensor) -> T + Sync + Send,
    {
        self.tensors.iter().map(f).collect()
    }

    fn map_collection<F>(&self, f: F) -> TensorCollection
    where
        F: Fn(&Tensor) -> Tensor + Sync + Send,
    {
        TensorCollection::new(self.map_tensors(f))
    }

    pub fn zeroed(&self, tol: f64) -> TensorCollection {
        self.map_collection(|t| t.zeroed(tol))
    }

    pub fn round(&self, decimals: i32) -> TensorCollection {
        self.map_collection(|t| t.round(decimals))
    }

    pub fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> TensorCollection {
        let rotation = op.rotation_matrix();
        self.map_collection(|t| t.transform(&rotation))
    }

    pub fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<TensorCollection> {
        validate_rotation(matrix, tol)?;
        Ok(self.transform(matrix))
    }

    pub fn symmetrized(&self) -> TensorCollection {
        self.map_collection(Tensor::symmetrized)
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.map_tensors(|t| t.is_symmetric(tol)).into_iter().all(|b| b)
    }

    pub fn fit_to_structure<S: Structure + ?Sized>(
        &self,
        structure: &S,
        symprec: f64,
    ) -> TensorCollection {
        let operations = structure.symmetry_operations(symprec);
        debug!(
            "fitting {} tensors over {} symmetry operations",
            self.len(),
            operations.len()
        );
        self.map_collection(|t| t.average_over_operations(&operations))
    }

    pub fn is_fit_to_structure<S: Structure + ?Sized>(&self, structure: &S, tol: f64) -> bool {
        let operations = structure.symmetry_operations(DEFAULT_SYMPREC);
        self.map_tensors(|t| t.max_abs_diff(&t.average_over_operations(&operations)) < tol)
            .into_iter()
            .all(|b| b)
    }

    /// Voigt forms in order; the first incompatible tensor fails the batch.
    pub fn voigt(&self) -> Result<Vec<Voigt>> {
        self.map_tensors(Tensor::voigt).into_iter().collect()
    }

    pub fn is_voigt_symmetric(&self, tol: f64) -> bool {
        self.map_tensors(|t| t.is_voigt_symmetric(tol))
            .into_iter()
            .all(|b| b)
    }

    pub fn voigt_symmetrized(&self) -> Result<TensorCollection> {
        self.map_tensors(Tensor::voigt_symmetrized)
            .into_iter()
            .collect()
    }

    pub fn convert_to_ieee<S: Structure + ?Sized>(
        &self,
        structure: &S,
        initial_fit: bool,
    ) -> Result<TensorCollection> {
        let rotation = *get_ieee_rotation(structure)?.matrix();
        let fitted = if initial_fit {
            self.fit_to_structure(structure, DEFAULT_SYMPREC)
        } else {
            self.clone()
        };
        fitted.rotate(&rotation, IEEE_ROTATION_TOLERANCE)
    }

    /// Directional projection of every tensor
    pub fn project(&self, direction: &Vector3<f64>) -> Vec<f64> {
        self.map_tensors(|t| t.project(direction))
    }
}

impl Transformable for TensorCollection {
    fn transform<O: CartesianOperation + ?Sized>(&self, op: &O) -> Self {
        TensorCollection::transform(self, op)
    }

    fn rotate(&self, matrix: &Matrix3<f64>, tol: f64) -> Result<Self> {
        TensorCollection::rotate(self, matrix, tol)
    }
}

impl Index<usize> for TensorCollection {
    type Output = Tensor;

    fn index(&self, index: usize) -> &Tensor {
        &self.tensors[index]
    }
}

impl From<Vec<Tensor>> for TensorCollection {
    fn from(tensors: Vec<Tensor>) -> Self {
        Self::new(tensors)
    }
}

impl FromIterator<Tensor> for TensorCollection {
    fn from_iter<I: IntoIterator<Item = Tensor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TensorCollection {
    type Item = Tensor;
    type IntoIter = std::vec::IntoIter<Tensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tensors.into_iter()
    }
}

impl<'a> IntoIterator for &'a TensorCollection {
    type Item = &'a Tensor;
    type IntoIter = std::slice::Iter<'a, Tensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tensors.iter()
    }
}
