//! Voigt notation: symmetric index pairs (11, 22, 33, 23, 13, 12) collapsed
//! into one index running over 0..6.
//!
//! | rank | full shape | Voigt form |
//! |------|------------|------------|
//! | 2    | 3×3        | 6-vector   |
//! | 3    | 3×3×3      | 3×6        |
//! | 4    | 3×3×3×3    | 6×6        |
//!
//! Decoding writes each Voigt value into every full-tensor entry of its cell
//! without any engineering-shear factor; callers holding engineering strains
//! or compliances must rescale the shear components themselves.

use nalgebra::{Matrix6, SMatrix, SVector};
use serde::{Deserialize, Serialize};

use crate::config::VOIGT_TOLERANCE;
use crate::errors::{Result, ShapeError, TensorError};
use crate::tensors::index_algebra::indices;
use crate::tensors::tensor::{NestedArray, Tensor};

/// Voigt index → full index pair
pub const VOIGT_MAP: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

/// Full index pair → Voigt index
pub const REVERSE_VOIGT_MAP: [[usize; 3]; 3] = [[0, 5, 4], [5, 1, 3], [4, 3, 2]];

const VOIGT_COLUMNS: usize = 6;

/// A tensor in Voigt form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NestedArray", into = "NestedArray")]
pub enum Voigt {
    Rank2(SVector<f64, 6>),
    Rank3(SMatrix<f64, 3, 6>),
    Rank4(Matrix6<f64>),
}

impl Voigt {
    /// Accepts 3 rows of 6 or 6 rows of 6; see [`Voigt::from_slice`] for
    /// the flat rank-2 form.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::try_from(NestedArray::from(rows.to_vec()))
    }

    /// Flat length-6 input
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != VOIGT_COLUMNS {
            return Err(ShapeError::VoigtShape(vec![values.len()]).into());
        }
        Ok(Voigt::Rank2(SVector::from_row_slice(values)))
    }

    fn from_cells(rank: usize, cells: &[f64]) -> Result<Self> {
        match rank {
            2 => Ok(Voigt::Rank2(SVector::from_row_slice(cells))),
            3 => Ok(Voigt::Rank3(SMatrix::from_row_slice(cells))),
            4 => Ok(Voigt::Rank4(Matrix6::from_row_slice(cells))),
            other => Err(ShapeError::VoigtRank(other).into()),
        }
    }

    /// Rank of the full tensor
    pub fn rank(&self) -> usize {
        match self {
            Voigt::Rank2(_) => 2,
            Voigt::Rank3(_) => 3,
            Voigt::Rank4(_) => 4,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Voigt::Rank2(_) => vec![6],
            Voigt::Rank3(_) => vec![3, 6],
            Voigt::Rank4(_) => vec![6, 6],
        }
    }

    /// Value at (row, column); rank-2 forms have the single row 0.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            Voigt::Rank2(v) => v[col],
            Voigt::Rank3(m) => m[(row, col)],
            Voigt::Rank4(m) => m[(row, col)],
        }
    }

    /// Rows as nested lists; the rank-2 form is one row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let rows = match self {
            Voigt::Rank2(_) => 1,
            Voigt::Rank3(_) => 3,
            Voigt::Rank4(_) => 6,
        };
        (0..rows)
            .map(|row| (0..VOIGT_COLUMNS).map(|col| self.get(row, col)).collect())
            .collect()
    }

    pub fn max_abs_diff(&self, other: &Voigt) -> f64 {
        if self.rank() != other.rank() {
            return f64::INFINITY;
        }
        self.to_rows()
            .iter()
            .flatten()
            .zip(other.to_rows().iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl TryFrom<NestedArray> for Voigt {
    type Error = TensorError;

    fn try_from(nested: NestedArray) -> Result<Self> {
        let shape = nested.shape()?;
        let flat = nested.flatten();
        match shape.as_slice() {
            [6] => Voigt::from_cells(2, &flat),
            [3, 6] => Voigt::from_cells(3, &flat),
            [6, 6] => Voigt::from_cells(4, &flat),
            _ => Err(ShapeError::VoigtShape(shape).into()),
        }
    }
}

impl From<Voigt> for NestedArray {
    fn from(voigt: Voigt) -> Self {
        match voigt {
            Voigt::Rank2(v) => NestedArray::from(v.iter().copied().collect::<Vec<f64>>()),
            other => NestedArray::from(other.to_rows()),
        }
    }
}

impl From<[f64; 6]> for Voigt {
    fn from(values: [f64; 6]) -> Self {
        Voigt::Rank2(SVector::from(values))
    }
}

impl From<[[f64; 6]; 3]> for Voigt {
    fn from(rows: [[f64; 6]; 3]) -> Self {
        Voigt::Rank3(SMatrix::from_fn(|i, j| rows[i][j]))
    }
}

impl From<[[f64; 6]; 6]> for Voigt {
    fn from(rows: [[f64; 6]; 6]) -> Self {
        Voigt::Rank4(Matrix6::from_fn(|i, j| rows[i][j]))
    }
}

impl From<Matrix6<f64>> for Voigt {
    fn from(matrix: Matrix6<f64>) -> Self {
        Voigt::Rank4(matrix)
    }
}

/// Voigt (row, column) of a full multi-index of rank 2, 3 or 4.
fn voigt_cell(index: &[usize]) -> (usize, usize) {
    match *index {
        [i, j] => (0, REVERSE_VOIGT_MAP[i][j]),
        [i, j, k] => (i, REVERSE_VOIGT_MAP[j][k]),
        [i, j, k, l] => (REVERSE_VOIGT_MAP[i][j], REVERSE_VOIGT_MAP[k][l]),
        _ => unreachable!("Voigt cells exist for ranks 2 to 4 only"),
    }
}

fn voigt_rows(rank: usize) -> Result<usize> {
    match rank {
        2 => Ok(1),
        3 => Ok(3),
        4 => Ok(6),
        other => Err(ShapeError::VoigtRank(other).into()),
    }
}

/// Per-cell means and the largest spread of entries within one cell.
struct Collapsed {
    cells: Vec<f64>,
    deviation: f64,
}

impl Tensor {
    fn collapse(&self) -> Result<Collapsed> {
        let size = voigt_rows(self.rank())? * VOIGT_COLUMNS;
        let mut sum = vec![0.0; size];
        let mut count = vec![0usize; size];
        let mut lo = vec![f64::INFINITY; size];
        let mut hi = vec![f64::NEG_INFINITY; size];

        for (index, &value) in indices(self.rank()).zip(self.as_slice()) {
            let (row, col) = voigt_cell(&index);
            let cell = row * VOIGT_COLUMNS + col;
            sum[cell] += value;
            count[cell] += 1;
            lo[cell] = lo[cell].min(value);
            hi[cell] = hi[cell].max(value);
        }

        let deviation = hi.iter().zip(&lo).map(|(h, l)| h - l).fold(0.0, f64::max);
        let cells = sum.iter().zip(&count).map(|(s, &n)| s / n as f64).collect();
        Ok(Collapsed { cells, deviation })
    }

    /// Encode into Voigt form. Every cell's contributing entries must agree
    /// within 1e-6, otherwise `NotVoigtCompatible`; ranks other than 2, 3
    /// and 4 are a shape error.
    pub fn voigt(&self) -> Result<Voigt> {
        let collapsed = self.collapse()?;
        if collapsed.deviation >= VOIGT_TOLERANCE {
            return Err(TensorError::NotVoigtCompatible {
                deviation: collapsed.deviation,
                tol: VOIGT_TOLERANCE,
            });
        }
        Voigt::from_cells(self.rank(), &collapsed.cells)
    }

    /// Expand a Voigt form into the full tensor; no shear rescaling.
    pub fn from_voigt(voigt: &Voigt) -> Tensor {
        Tensor::from_fn(voigt.rank(), |index| {
            let (row, col) = voigt_cell(index);
            voigt.get(row, col)
        })
    }

    /// True if Voigt encoding loses nothing at tolerance `tol`. Always false
    /// for ranks without a Voigt form.
    pub fn is_voigt_symmetric(&self, tol: f64) -> bool {
        self.collapse()
            .map(|collapsed| collapsed.deviation < tol)
            .unwrap_or(false)
    }

    /// Rank 2: the tensor with its Voigt-collapsed pairs averaged.
    /// Rank 4: additionally symmetrize the 6×6 Voigt matrix (major symmetry).
    /// Other ranks fail.
    pub fn voigt_symmetrized(&self) -> Result<Tensor> {
        if self.rank() != 2 && self.rank() != 4 {
            return Err(ShapeError::VoigtRank(self.rank()).into());
        }
        let collapsed = self.collapse()?;
        let voigt = match Voigt::from_cells(self.rank(), &collapsed.cells)? {
            Voigt::Rank4(m) => Voigt::Rank4((m + m.transpose()) * 0.5),
            other => other,
        };
        Ok(Tensor::from_voigt(&voigt))
    }
}
