// Shared tensors for the tensors test modules. BaNiO3 values are its
// piezoelectric (rank 3) and elastic (rank 4) tensors.

use super::tensor::Tensor;
use super::voigt::Voigt;

/// BaNiO3 piezoelectric tensor, consistent with point group 6mm
pub fn banio3_fit_r3() -> Tensor {
    Tensor::from_voigt(&Voigt::from([
        [0.0, 0.0, 0.0, 0.0, 0.03839, 0.0],
        [0.0, 0.0, 0.0, 0.03839, 0.0, 0.0],
        [6.89822, 6.89822, 27.4628, 0.0, 0.0, 0.0],
    ]))
}

/// BaNiO3 elastic tensor, transversely isotropic about z
pub fn banio3_fit_r4() -> Tensor {
    Tensor::from_voigt(&Voigt::from([
        [157.9, 63.1, 29.4, 0.0, 0.0, 0.0],
        [63.1, 157.9, 29.4, 0.0, 0.0, 0.0],
        [29.4, 29.4, 207.6, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 4.3, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 4.3, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 47.4],
    ]))
}

/// BaNiO3 elastic tensor as computed, before symmetrization
pub fn banio3_unfit_r4() -> Tensor {
    Tensor::from_voigt(&Voigt::from([
        [161.26, 62.76, 30.18, 0.0, 0.0, 0.0],
        [62.76, 155.28, 28.53, -0.06, 0.0, 0.0],
        [30.18, 28.53, 207.57, 0.0, 0.0, 0.0],
        [0.0, -0.06, 0.0, 4.44, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 4.23, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 47.08],
    ]))
}

pub fn symm_rank2() -> Tensor {
    Tensor::from([[1.0, 2.0, 3.0], [2.0, 4.0, 5.0], [3.0, 5.0, 6.0]])
}

pub fn symm_rank3() -> Tensor {
    Tensor::from([
        [[1.0, 2.0, 3.0], [2.0, 4.0, 5.0], [3.0, 5.0, 6.0]],
        [[2.0, 4.0, 5.0], [4.0, 7.0, 8.0], [5.0, 8.0, 9.0]],
        [[3.0, 5.0, 6.0], [5.0, 8.0, 9.0], [6.0, 9.0, 10.0]],
    ])
}

/// Fully symmetric rank-4 tensor: the value depends only on the sorted index
pub fn symm_rank4() -> Tensor {
    let values = [
        ([0, 0, 0, 0], 1.2),
        ([0, 0, 0, 1], 0.4),
        ([0, 0, 0, 2], -0.92),
        ([0, 0, 1, 1], 0.05),
        ([0, 0, 1, 2], 0.11),
        ([0, 0, 2, 2], -0.02),
        ([0, 1, 1, 1], -0.47),
        ([0, 1, 1, 2], 0.09),
        ([0, 1, 2, 2], 0.0),
        ([0, 2, 2, 2], -0.3),
        ([1, 1, 1, 1], 0.17),
        ([1, 1, 1, 2], 0.62),
        ([1, 1, 2, 2], 0.3),
        ([1, 2, 2, 2], -0.18),
        ([2, 2, 2, 2], -0.51),
    ];
    Tensor::from_fn(4, |index| {
        let mut sorted = index.to_vec();
        sorted.sort_unstable();
        values
            .iter()
            .find(|(key, _)| key[..] == sorted[..])
            .map(|(_, v)| *v)
            .unwrap()
    })
}

/// Non-symmetric matrix with determinant 0.009
pub fn non_symm() -> Tensor {
    Tensor::from([[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [0.2, 0.5, 0.5]])
}

/// Rotation by 3.14 · 42.5 / 180 rad about y
pub fn y_rotation() -> nalgebra::Matrix3<f64> {
    let a: f64 = 3.14 * 42.5 / 180.0;
    nalgebra::Matrix3::new(a.cos(), 0.0, a.sin(), 0.0, 1.0, 0.0, -a.sin(), 0.0, a.cos())
}
