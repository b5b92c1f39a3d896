use log::debug;
use serde::{Deserialize, Serialize};

use crate::interfaces::Structure;
use crate::symmetries::symmetry_operations::SymmetryOperation;
use crate::tensors::tensor::Tensor;

/// Insertion-ordered map keyed by tensors.
///
/// Floating-point tensors have no usable hash, so lookups compare keys
/// element-wise: a key matches when its max absolute difference from the
/// query is below the map's tolerance. The first matching key wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorMapping<V> {
    tol: f64,
    entries: Vec<(Tensor, V)>,
}

impl<V> TensorMapping<V> {
    pub fn new(tol: f64) -> Self {
        Self {
            tol,
            entries: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &Tensor) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.max_abs_diff(key) < self.tol)
    }

    pub fn get(&self, key: &Tensor) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &Tensor) -> Option<&mut V> {
        self.position(key).map(move |i| &mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Tensor) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace; a replaced entry keeps its original key and
    /// position and the old value is returned.
    pub fn insert(&mut self, key: Tensor, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Tensor> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tensor, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<V> IntoIterator for TensorMapping<V> {
    type Item = (Tensor, V);
    type IntoIter = std::vec::IntoIter<(Tensor, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Partition `tensors` into classes related by the point group of
/// `structure`; see [`symmetry_reduce_with_operations`].
pub fn symmetry_reduce<S: Structure + ?Sized>(
    tensors: &[Tensor],
    structure: &S,
    tol: f64,
    symprec: f64,
) -> TensorMapping<Vec<SymmetryOperation>> {
    let operations = structure.symmetry_operations(symprec);
    symmetry_reduce_with_operations(tensors, &operations, tol)
}

/// Partition `tensors` into symmetry-equivalence classes.
///
/// Tensors are visited in input order. Each is compared against the
/// representatives found so far, and for each representative against every
/// operation in order; the first operation that carries a representative onto
/// the tensor within `tol` is recorded under that representative. A tensor
/// nothing maps onto becomes a new representative with no operations.
///
/// Each class holds its representative plus one member per recorded
/// operation, recoverable as `representative.transform(op)`.
pub fn symmetry_reduce_with_operations(
    tensors: &[Tensor],
    operations: &[SymmetryOperation],
    tol: f64,
) -> TensorMapping<Vec<SymmetryOperation>> {
    let mut mapping: TensorMapping<Vec<SymmetryOperation>> = TensorMapping::new(tol);

    for tensor in tensors {
        let found = mapping.entries.iter().enumerate().find_map(|(i, (rep, _))| {
            operations
                .iter()
                .find(|op| rep.transform(*op).max_abs_diff(tensor) < tol)
                .map(|op| (i, op.clone()))
        });

        match found {
            Some((i, op)) => mapping.entries[i].1.push(op),
            None => {
                debug!(
                    "new symmetry class {} from rank-{} tensor",
                    mapping.len(),
                    tensor.rank()
                );
                mapping.entries.push((tensor.clone(), Vec::new()));
            }
        }
    }

    mapping
}
