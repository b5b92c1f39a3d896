// Materials module: Contains crystal definitions consumed by the tensor pipeline
// This module provides a concrete structure (lattice + crystal system + point group) for fitting and IEEE conversion

// ======================== MODULE DECLARATIONS ========================
pub mod crystal;

// ======================== CRYSTAL TYPES ========================
pub use crystal::{
    CommonCrystals, // struct - collection of predefined crystals (Si, α-Sn, BaNiO3)
    Crystal,        // struct - conventional lattice with crystal system and Cartesian point-group operations
};
