use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};
use std::fmt;

/// The seven crystal systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CrystalSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

impl CrystalSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrystalSystem::Triclinic => "triclinic",
            CrystalSystem::Monoclinic => "monoclinic",
            CrystalSystem::Orthorhombic => "orthorhombic",
            CrystalSystem::Tetragonal => "tetragonal",
            CrystalSystem::Trigonal => "trigonal",
            CrystalSystem::Hexagonal => "hexagonal",
            CrystalSystem::Cubic => "cubic",
        }
    }
}

impl fmt::Display for CrystalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell lengths |a|, |b|, |c| and angles α, β, γ (radians) read off a
/// metric tensor G = AᵀA. α lies between b and c, β between a and c,
/// γ between a and b.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParameters {
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
}

impl CellParameters {
    pub fn from_metric(metric: &Matrix3<f64>) -> Self {
        let lengths = [0, 1, 2].map(|i| metric[(i, i)].sqrt());
        // angle opposite vector k is between the other two
        let angles = [(1, 2), (0, 2), (0, 1)]
            .map(|(i, j)| (metric[(i, j)] / (lengths[i] * lengths[j])).clamp(-1.0, 1.0).acos());
        Self { lengths, angles }
    }
}

/// Crystal system implied by the metric of a conventional cell.
///
/// Lengths and angles are compared with the same absolute `tol`. The metric
/// cannot tell a trigonal lattice in the hexagonal setting from a hexagonal
/// one, so only the rhombohedral setting is reported as trigonal.
pub fn identify_crystal_system(metric: &Matrix3<f64>, tol: f64) -> CrystalSystem {
    let CellParameters {
        lengths: [a, b, c],
        angles: [alpha, beta, gamma],
    } = CellParameters::from_metric(metric);
    let close = |x: f64, y: f64| (x - y).abs() < tol;

    let right = [alpha, beta, gamma].map(|angle| close(angle, FRAC_PI_2));
    let right_count = right.iter().filter(|&&r| r).count();
    let all_lengths_equal = close(a, b) && close(b, c);
    let any_lengths_equal = close(a, b) || close(b, c) || close(a, c);

    match right_count {
        3 if all_lengths_equal => CrystalSystem::Cubic,
        3 if any_lengths_equal => CrystalSystem::Tetragonal,
        3 => CrystalSystem::Orthorhombic,
        2 if close(a, b) && right[0] && right[1] && close(gamma, 2.0 * FRAC_PI_3) => {
            CrystalSystem::Hexagonal
        }
        2 => CrystalSystem::Monoclinic,
        0 if all_lengths_equal && close(alpha, beta) && close(beta, gamma) => CrystalSystem::Trigonal,
        _ => CrystalSystem::Triclinic,
    }
}
