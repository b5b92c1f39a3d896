// Crystal module: Contains the crystal structure definition used for symmetry fitting
// This module provides a lattice together with its crystal system and point-group operations

use serde::{Deserialize, Serialize};

use crate::config::GROUP_CLOSURE_TOLERANCE;
use crate::errors::Result;
use crate::interfaces::Structure;
use crate::lattice::lattice3d::Lattice3D;
use crate::lattice::lattice_construction::{cubic_lattice, hexagonal_lattice};
use crate::lattice::lattice_types::CrystalSystem;
use crate::symmetries::symmetry_operations::SymmetryOperation;
use crate::symmetries::symmetry_point_groups::{
    generate_cubic_operations, generate_holohedry, generate_point_group, mirror_x, six_fold_z,
};

/// Crystal structure as seen by the tensor pipeline
///
/// Atomic positions are not needed: tensors only care about the conventional
/// lattice (for the IEEE frame), the crystal system and the point group.
///
/// # Fields
/// * `name` - Optional identifier for logging and fixtures
/// * `lattice` - Conventional lattice, vectors as columns
/// * `crystal_system` - `None` if the structure could not be classified
/// * `operations` - Point-group operations in the lattice's Cartesian frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    pub name: Option<String>,
    lattice: Lattice3D,
    crystal_system: Option<CrystalSystem>,
    operations: Vec<SymmetryOperation>,
}

impl Crystal {
    /// Create a crystal from operations that are already expressed in the
    /// Cartesian frame of `lattice`.
    pub fn new(
        lattice: Lattice3D,
        crystal_system: Option<CrystalSystem>,
        operations: Vec<SymmetryOperation>,
    ) -> Self {
        Self {
            name: None,
            lattice,
            crystal_system,
            operations,
        }
    }

    /// Create a crystal from point-group operations written in the standard
    /// setting (a ∥ x, b in the xy-plane).
    ///
    /// The operations are conjugated by the rotation that carries the
    /// standard orientation onto the lattice's actual orientation, so a
    /// rigidly rotated lattice gets rigidly rotated operations. Trigonal
    /// lattices must be given in the hexagonal setting.
    pub fn from_point_group(
        lattice: Lattice3D,
        crystal_system: CrystalSystem,
        standard_operations: Vec<SymmetryOperation>,
    ) -> Result<Self> {
        let q = lattice.standard_orientation_rotation()?;
        let q_t = q.transpose();
        let operations = standard_operations
            .into_iter()
            .map(|op| SymmetryOperation::new(q * op.rotation * q_t, q * op.translation))
            .collect();

        Ok(Self::new(lattice, Some(crystal_system), operations))
    }

    /// Create a crystal whose point group is the holohedry of `crystal_system`,
    /// placed along the lattice's own axes (see [`Lattice3D::holohedry_frame`]).
    /// Rhombohedral cells and any choice of unique axis are accepted.
    pub fn from_holohedry(lattice: Lattice3D, crystal_system: CrystalSystem) -> Self {
        let frame = lattice.holohedry_frame(crystal_system);
        let frame_t = frame.transpose();
        let operations = generate_holohedry(crystal_system)
            .into_iter()
            .map(|op| SymmetryOperation::from_rotation(frame * op.rotation * frame_t))
            .collect();

        Self::new(lattice, Some(crystal_system), operations)
    }

    /// Create a crystal whose point group is the full holohedry of its lattice.
    /// The crystal system is identified from the lattice metric.
    pub fn holohedral(lattice: Lattice3D, tol: f64) -> Self {
        let system = lattice.crystal_system(tol);
        Self::from_holohedry(lattice, system)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn operations(&self) -> &[SymmetryOperation] {
        &self.operations
    }
}

impl Structure for Crystal {
    fn lattice(&self) -> &Lattice3D {
        &self.lattice
    }

    fn crystal_system(&self) -> Option<CrystalSystem> {
        self.crystal_system
    }

    fn symmetry_operations(&self, _symprec: f64) -> Vec<SymmetryOperation> {
        self.operations.clone()
    }
}

/// Collection of commonly used crystals
pub struct CommonCrystals;

impl CommonCrystals {
    /// Silicon, diamond structure (Fd-3m, point group m-3m), a = 5.431 Å
    pub fn silicon() -> Result<Crystal> {
        Ok(Crystal::from_point_group(
            cubic_lattice(5.431)?,
            CrystalSystem::Cubic,
            generate_cubic_operations(),
        )?
        .with_name("Si"))
    }

    /// α-Sn, diamond structure (Fd-3m, point group m-3m), a = 6.489 Å
    pub fn alpha_tin() -> Result<Crystal> {
        Ok(Crystal::from_point_group(
            cubic_lattice(6.489)?,
            CrystalSystem::Cubic,
            generate_cubic_operations(),
        )?
        .with_name("Sn"))
    }

    /// BaNiO3 (P6_3mc, point group 6mm), a = 5.58 Å, c = 4.83 Å
    pub fn barium_nickelate() -> Result<Crystal> {
        let operations = generate_point_group(&[six_fold_z(), mirror_x()], GROUP_CLOSURE_TOLERANCE);
        Ok(Crystal::from_point_group(
            hexagonal_lattice(5.58, 4.83)?,
            CrystalSystem::Hexagonal,
            operations,
        )?
        .with_name("BaNiO3"))
    }
}
