//! Reorientation of tensors into the IEEE standard crystallographic frame.

use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::config::{DEFAULT_SYMPREC, IEEE_ROTATION_TOLERANCE, UNIT_VECTOR_CUTOFF};
use crate::errors::{Result, TensorError};
use crate::interfaces::Structure;
use crate::lattice::lattice_types::CrystalSystem;
use crate::tensors::square_tensor::SquareTensor;
use crate::tensors::tensor::Tensor;

fn unit(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm < UNIT_VECTOR_CUTOFF {
        *v
    } else {
        v / norm
    }
}

/// Indices of the lattice vectors ordered by length, shortest first.
/// Equal lengths keep their lattice order.
fn by_length(lengths: &[f64; 3]) -> [usize; 3] {
    let mut order = [0, 1, 2];
    order.sort_by(|&i, &j| lengths[i].total_cmp(&lengths[j]));
    order
}

/// Rotation whose rows are the IEEE x, y and z axes expressed in the
/// structure's Cartesian frame.
///
/// The axes come from the conventional lattice vectors a, b, c (lengths
/// |a|, |b|, |c|, angle α opposite a, β opposite b, γ opposite c):
///
/// * cubic: x, y, z along a, b, c
/// * tetragonal: z along the unique vector, x along the first of the other two
/// * orthorhombic: z along the shortest, x along the middle vector
/// * trigonal, hexagonal: z along the vector opposite the 120° angle, x along
///   the first remaining vector; for a rhombohedral cell z along a + b + c and
///   x along a - b, the axes of the conventional hexagonal cell
/// * monoclinic: y along the vector opposite the angle farthest from 90°,
///   z along the shorter remaining vector
/// * triclinic: z along the shortest, y normal to the shortest and longest
///
/// The missing axis always completes a right-handed frame and the result is
/// re-orthonormalized with [`SquareTensor::refine_rotation`].
pub fn get_ieee_rotation<S: Structure + ?Sized>(structure: &S) -> Result<SquareTensor> {
    let system = structure
        .crystal_system()
        .ok_or(TensorError::UnclassifiableCrystalSystem)?;
    let lattice = structure.lattice();
    let vecs = lattice.basis_vectors();
    let (a, b, c) = lattice.lattice_parameters();
    let lengths = [a, b, c];
    let (alpha, beta, gamma) = lattice.lattice_angles();
    let angles = [alpha, beta, gamma];
    let unit_vecs = [unit(&vecs[0]), unit(&vecs[1]), unit(&vecs[2])];

    let (x, y, z) = match system {
        CrystalSystem::Cubic => (unit_vecs[0], unit_vecs[1], unit_vecs[2]),
        CrystalSystem::Tetragonal => {
            let [short, mid, long] = by_length(&lengths);
            let (x, z) = if (lengths[long] - lengths[mid]).abs()
                < (lengths[mid] - lengths[short]).abs()
            {
                (unit_vecs[long], unit_vecs[short])
            } else {
                (unit_vecs[short], unit_vecs[long])
            };
            (x, unit(&z.cross(&x)), z)
        }
        CrystalSystem::Orthorhombic => {
            let [short, mid, _] = by_length(&lengths);
            let (x, z) = (unit_vecs[mid], unit_vecs[short]);
            (x, unit(&z.cross(&x)), z)
        }
        CrystalSystem::Trigonal | CrystalSystem::Hexagonal => {
            let (x, z) = lattice.hexagonal_axes();
            (x, unit(&z.cross(&x)), z)
        }
        CrystalSystem::Monoclinic => {
            let unique = (0..3)
                .max_by(|&i, &j| {
                    let di = (angles[i] - 90f64.to_radians()).abs();
                    let dj = (angles[j] - 90f64.to_radians()).abs();
                    di.total_cmp(&dj)
                })
                .unwrap_or(1);
            let shorter = by_length(&lengths)
                .into_iter()
                .find(|&i| i != unique)
                .unwrap_or(0);
            let (y, z) = (unit_vecs[unique], unit_vecs[shorter]);
            (unit(&y.cross(&z)), y, z)
        }
        CrystalSystem::Triclinic => {
            let [short, _, long] = by_length(&lengths);
            let z = unit_vecs[short];
            let y = unit(&z.cross(&unit_vecs[long]));
            (y.cross(&z), y, z)
        }
    };

    let rotation =
        SquareTensor::new(Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]))
            .refine_rotation();
    debug!("IEEE frame for {} structure: {:?}", system, rotation.matrix());
    Ok(rotation)
}

impl Tensor {
    /// Rotation into the IEEE frame of `structure`, see [`get_ieee_rotation`].
    pub fn get_ieee_rotation<S: Structure + ?Sized>(structure: &S) -> Result<SquareTensor> {
        get_ieee_rotation(structure)
    }

    /// Express the tensor in the IEEE standard frame of `structure`,
    /// optionally fitting it to the structure's point group first.
    pub fn convert_to_ieee<S: Structure + ?Sized>(
        &self,
        structure: &S,
        initial_fit: bool,
    ) -> Result<Tensor> {
        let rotation = get_ieee_rotation(structure)?;
        let tensor = if initial_fit {
            self.fit_to_structure(structure, DEFAULT_SYMPREC)
        } else {
            self.clone()
        };
        tensor.rotate(rotation.matrix(), IEEE_ROTATION_TOLERANCE)
    }
}
