//! Physical property tensors for crystals
//!
//! This library provides rank-r Cartesian tensors over 3D space together with the
//! crystallographic algorithms that act on them: Voigt notation, fitting to a crystal's
//! point group, rotation into the IEEE standard frame and symmetry reduction of tensor sets.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod lattice;
pub mod materials;
pub mod symmetries;
pub mod tensors;

pub use errors::{Result, ShapeError, TensorError};
pub use interfaces::{CartesianOperation, Structure, Transformable};
pub use materials::{CommonCrystals, Crystal};
pub use symmetries::SymmetryOperation;
pub use tensors::{
    get_ieee_rotation, symmetry_reduce, NestedArray, PolarSide, SquareTensor, Tensor,
    TensorCollection, TensorMapping, Voigt,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
