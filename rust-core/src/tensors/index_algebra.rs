//! Multi-index bookkeeping for row-major tensors over 3D space.
//!
//! A rank-r tensor is stored as 3^r values; the last axis varies fastest.

use itertools::Itertools;
use nalgebra::Matrix3;

/// Length of every tensor axis.
pub const DIM: usize = 3;

/// Number of stored values of a rank-`rank` tensor, saturating at
/// `usize::MAX` for ranks whose 3^rank does not fit.
pub fn num_elements(rank: usize) -> usize {
    u32::try_from(rank).map_or(usize::MAX, |rank| DIM.saturating_pow(rank))
}

/// Distance in the flat buffer between consecutive values of `axis`.
pub fn stride(rank: usize, axis: usize) -> usize {
    DIM.pow((rank - axis - 1) as u32)
}

/// Row-major flat offset of a multi-index.
pub fn flat_index(index: &[usize]) -> usize {
    index.iter().fold(0, |acc, &i| acc * DIM + i)
}

/// Inverse of [`flat_index`].
pub fn multi_index(mut flat: usize, rank: usize) -> Vec<usize> {
    let mut index = vec![0; rank];
    for axis in (0..rank).rev() {
        index[axis] = flat % DIM;
        flat /= DIM;
    }
    index
}

/// All multi-indices of a rank-`rank` tensor in storage order.
pub fn indices(rank: usize) -> impl Iterator<Item = Vec<usize>> {
    (0..num_elements(rank)).map(move |flat| multi_index(flat, rank))
}

/// Every ordering of `0..rank`, identity first.
pub fn axis_permutations(rank: usize) -> Vec<Vec<usize>> {
    (0..rank).permutations(rank).collect()
}

/// Reorder axes: output axis `k` is input axis `perm[k]`.
pub fn permute_axes(data: &[f64], rank: usize, perm: &[usize]) -> Vec<f64> {
    debug_assert_eq!(perm.len(), rank);
    let mut out = vec![0.0; data.len()];
    let mut source = vec![0; rank];
    for (flat, value) in out.iter_mut().enumerate() {
        let index = multi_index(flat, rank);
        for (k, &axis) in perm.iter().enumerate() {
            source[axis] = index[k];
        }
        *value = data[flat_index(&source)];
    }
    out
}

/// Multilinear transform with the same matrix on every axis:
/// out[i₁..i_r] = Σ_j m[i₁,j₁]···m[i_r,j_r] · t[j₁..j_r].
///
/// Done as r successive single-axis products, which costs r·3^(r+1)
/// multiplications instead of 3^(2r).
pub fn transform_axes(data: &[f64], rank: usize, matrix: &Matrix3<f64>) -> Vec<f64> {
    let mut current = data.to_vec();
    let mut next = vec![0.0; data.len()];
    for axis in 0..rank {
        let step = stride(rank, axis);
        for (flat, out) in next.iter_mut().enumerate() {
            let i = (flat / step) % DIM;
            let base = flat - i * step;
            *out = (0..DIM)
                .map(|j| matrix[(i, j)] * current[base + j * step])
                .sum();
        }
        std::mem::swap(&mut current, &mut next);
    }
    current
}

/// Contract every axis with the same vector: Σ_j n[j₁]···n[j_r] · t[j₁..j_r].
pub fn contract_all_axes(data: &[f64], rank: usize, vector: &[f64; DIM]) -> f64 {
    data.iter()
        .enumerate()
        .map(|(flat, value)| {
            multi_index(flat, rank)
                .iter()
                .fold(*value, |acc, &i| acc * vector[i])
        })
        .sum()
}
