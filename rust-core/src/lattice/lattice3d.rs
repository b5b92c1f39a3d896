use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use crate::config::LATTICE_TOLERANCE;
use crate::errors::{Result, TensorError};
use crate::lattice::lattice_types::{identify_crystal_system, CellParameters, CrystalSystem};

/// A 3D lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatticeRows", into = "LatticeRows")]
pub struct Lattice3D {
    /// Real‐space basis vectors (columns).
    direct: Matrix3<f64>,
    /// Inverse of the direct basis, cartesian → fractional.
    inverse: Matrix3<f64>,
    /// Metric tensor G = A^T * A.
    metric: Matrix3<f64>,
}

impl Lattice3D {
    /// Construct a new 3D lattice from real‐space basis (vectors as columns).
    pub fn new(direct: Matrix3<f64>) -> Result<Self> {
        let det = direct.determinant();
        if det.abs() < LATTICE_TOLERANCE {
            return Err(TensorError::DegenerateLattice {
                det,
                tol: LATTICE_TOLERANCE,
            });
        }
        let inverse = direct.try_inverse().ok_or(TensorError::DegenerateLattice {
            det,
            tol: LATTICE_TOLERANCE,
        })?;

        Ok(Lattice3D {
            direct,
            inverse,
            metric: direct.transpose() * direct,
        })
    }

    /// Construct from three lattice vectors.
    pub fn from_vectors(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Result<Self> {
        Self::new(Matrix3::from_columns(&[a, b, c]))
    }

    /// Construct from lengths and angles (radians) in the standard orientation:
    /// a along x, b in the xy-plane, c completing a right-handed cell.
    pub fn from_parameters(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self> {
        let (cos_a, cos_b, cos_g) = (alpha.cos(), beta.cos(), gamma.cos());
        let sin_g = gamma.sin();

        let cx = c * cos_b;
        let cy = c * (cos_a - cos_b * cos_g) / sin_g;
        let cz_sq = c * c - cx * cx - cy * cy;
        if cz_sq <= 0.0 {
            return Err(TensorError::DegenerateLattice {
                det: 0.0,
                tol: LATTICE_TOLERANCE,
            });
        }

        Self::from_vectors(
            Vector3::new(a, 0.0, 0.0),
            Vector3::new(b * cos_g, b * sin_g, 0.0),
            Vector3::new(cx, cy, cz_sq.sqrt()),
        )
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: Vector3<f64>) -> Vector3<f64> {
        self.direct * v_frac
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: Vector3<f64>) -> Vector3<f64> {
        self.inverse * v_cart
    }

    /// Lengths and angles of the cell
    pub fn cell_parameters(&self) -> CellParameters {
        CellParameters::from_metric(&self.metric)
    }

    /// Lengths |a|, |b|, |c|
    pub fn lattice_parameters(&self) -> (f64, f64, f64) {
        let [a, b, c] = self.cell_parameters().lengths;
        (a, b, c)
    }

    /// Angles α, β, γ in radians
    pub fn lattice_angles(&self) -> (f64, f64, f64) {
        let [alpha, beta, gamma] = self.cell_parameters().angles;
        (alpha, beta, gamma)
    }

    /// Lattice vectors a, b, c
    pub fn basis_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.direct.column(0).into(),
            self.direct.column(1).into(),
            self.direct.column(2).into(),
        ]
    }

    /// Rigidly rotate (or otherwise transform) every lattice vector: A → Q·A
    pub fn transformed(&self, q: &Matrix3<f64>) -> Result<Self> {
        Self::new(q * self.direct)
    }

    /// Orthogonal matrix Q mapping the standard orientation of this lattice's
    /// parameters (see [`from_parameters`](Self::from_parameters)) onto its
    /// actual orientation: A = Q · A_std.
    pub fn standard_orientation_rotation(&self) -> Result<Matrix3<f64>> {
        let (a, b, c) = self.lattice_parameters();
        let (alpha, beta, gamma) = self.lattice_angles();
        let standard = Self::from_parameters(a, b, c, alpha, beta, gamma)?;
        Ok(self.direct * standard.inverse)
    }

    /// Unit vectors (x, z) of the hexagonal family: z along the 3- or 6-fold
    /// axis, x along a 2-fold axis of the lattice perpendicular to it.
    ///
    /// A cell with one angle near 120° and the others near 90° is in the
    /// hexagonal setting: z follows the vector opposite the 120° angle, x the
    /// first remaining vector. A cell with three equal angles is rhombohedral:
    /// z follows a + b + c and x follows a - b.
    pub fn hexagonal_axes(&self) -> (Vector3<f64>, Vector3<f64>) {
        let vecs = self.basis_vectors();
        let angles = self.cell_parameters().angles;
        let off_120 = angles.map(|angle| (angle - 2.0 * FRAC_PI_3).abs());
        let unique = (0..3)
            .min_by(|&i, &j| off_120[i].total_cmp(&off_120[j]))
            .unwrap_or(2);
        let spread = angles.iter().copied().fold(f64::MIN, f64::max)
            - angles.iter().copied().fold(f64::MAX, f64::min);

        let (x, z) = if off_120[unique] < spread {
            let first_other = (0..3).find(|&i| i != unique).unwrap_or(0);
            (vecs[first_other], vecs[unique])
        } else {
            (vecs[0] - vecs[1], vecs[0] + vecs[1] + vecs[2])
        };
        orthonormal_pair(&x, &z)
    }

    /// Orthonormal frame, columns x, y, z, in which the holohedry of `system`
    /// has the standard form of
    /// [`generate_holohedry`](crate::symmetries::generate_holohedry):
    ///
    /// * cubic, orthorhombic, triclinic: x along a, z along c
    /// * tetragonal: z along the vector whose length differs from the other two
    /// * trigonal, hexagonal: see [`hexagonal_axes`](Self::hexagonal_axes)
    /// * monoclinic: y along the vector opposite the angle farthest from 90°
    ///
    /// Conjugating the standard holohedry by this frame gives operations that
    /// map the lattice onto itself whatever its setting or orientation.
    pub fn holohedry_frame(&self, system: CrystalSystem) -> Matrix3<f64> {
        let vecs = self.basis_vectors();
        let CellParameters { lengths, angles } = self.cell_parameters();

        let (x, z) = match system {
            CrystalSystem::Tetragonal => {
                // the other two lengths agree best
                let spread = |k: usize| (lengths[(k + 1) % 3] - lengths[(k + 2) % 3]).abs();
                let unique = (0..3)
                    .min_by(|&i, &j| spread(i).total_cmp(&spread(j)))
                    .unwrap_or(2);
                (vecs[(unique + 1) % 3], vecs[unique])
            }
            CrystalSystem::Trigonal | CrystalSystem::Hexagonal => self.hexagonal_axes(),
            CrystalSystem::Monoclinic => {
                let unique = (0..3)
                    .max_by(|&i, &j| {
                        let di = (angles[i] - FRAC_PI_2).abs();
                        let dj = (angles[j] - FRAC_PI_2).abs();
                        di.total_cmp(&dj)
                    })
                    .unwrap_or(1);
                let (z, y) = orthonormal_pair(&vecs[(unique + 1) % 3], &vecs[unique]);
                (y.cross(&z), z)
            }
            CrystalSystem::Cubic | CrystalSystem::Orthorhombic | CrystalSystem::Triclinic => {
                (vecs[0], vecs[2])
            }
        };

        let (x, z) = orthonormal_pair(&x, &z);
        Matrix3::from_columns(&[x, z.cross(&x), z])
    }

    /// Crystal system read off the metric, see [`identify_crystal_system`]
    pub fn crystal_system(&self, tol: f64) -> CrystalSystem {
        identify_crystal_system(&self.metric, tol)
    }

    /// Get the unit cell volume (signed, negative for a left-handed basis)
    pub fn cell_volume(&self) -> f64 {
        self.direct.determinant()
    }

    /// Get the metric tensor
    pub fn metric_tensor(&self) -> &Matrix3<f64> {
        &self.metric
    }

    /// Get direct lattice basis vectors
    pub fn direct_basis(&self) -> &Matrix3<f64> {
        &self.direct
    }
}

/// Normalize `z`, then the part of `x` perpendicular to it. Returns (x, z).
fn orthonormal_pair(x: &Vector3<f64>, z: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let z = z.normalize();
    let x = (x - z * x.dot(&z)).normalize();
    (x, z)
}

/// Serialized form: one row per lattice vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LatticeRows([[f64; 3]; 3]);

impl TryFrom<LatticeRows> for Lattice3D {
    type Error = TensorError;

    fn try_from(rows: LatticeRows) -> Result<Self> {
        let [a, b, c] = rows.0.map(Vector3::from);
        Lattice3D::from_vectors(a, b, c)
    }
}

impl From<Lattice3D> for LatticeRows {
    fn from(lattice: Lattice3D) -> Self {
        LatticeRows(lattice.basis_vectors().map(|v| [v.x, v.y, v.z]))
    }
}
