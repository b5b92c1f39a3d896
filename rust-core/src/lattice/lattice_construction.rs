use crate::errors::Result;
use crate::lattice::lattice3d::Lattice3D;
use nalgebra::Matrix3;
use std::f64::consts::PI;

/// Standard lattice construction utilities for conventional 3D cells.
/// All lattice vectors are columns; c is along z wherever the system has a
/// unique axis.

/// Create a cubic lattice with given lattice parameter
pub fn cubic_lattice(a: f64) -> Result<Lattice3D> {
    let direct = Matrix3::new(a, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, a);
    Lattice3D::new(direct)
}

/// Create a tetragonal lattice with given lattice parameters
pub fn tetragonal_lattice(a: f64, c: f64) -> Result<Lattice3D> {
    let direct = Matrix3::new(a, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, c);
    Lattice3D::new(direct)
}

/// Create an orthorhombic lattice with given lattice parameters
pub fn orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<Lattice3D> {
    let direct = Matrix3::new(a, 0.0, 0.0, 0.0, b, 0.0, 0.0, 0.0, c);
    Lattice3D::new(direct)
}

/// Create a hexagonal lattice (γ = 120°) with given lattice parameters
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<Lattice3D> {
    let direct = Matrix3::new(
        a,
        -a / 2.0,
        0.0,
        0.0,
        a * 3.0_f64.sqrt() / 2.0,
        0.0,
        0.0,
        0.0,
        c,
    );
    Lattice3D::new(direct)
}

/// Create a rhombohedral lattice (a = b = c, α = β = γ, angle in radians)
pub fn rhombohedral_lattice(a: f64, alpha: f64) -> Result<Lattice3D> {
    Lattice3D::from_parameters(a, a, a, alpha, alpha, alpha)
}

/// Create a monoclinic lattice with unique axis b (β in radians)
pub fn monoclinic_lattice(a: f64, b: f64, c: f64, beta: f64) -> Result<Lattice3D> {
    Lattice3D::from_parameters(a, b, c, PI / 2.0, beta, PI / 2.0)
}

/// Create a triclinic lattice (angles in radians)
pub fn triclinic_lattice(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Lattice3D> {
    Lattice3D::from_parameters(a, b, c, alpha, beta, gamma)
}
