// Lattice module: conventional 3D cells, their parameters and crystal-system classification
// This module provides the lattice side of the structure contract used by the tensor pipeline

// ======================== MODULE DECLARATIONS ========================
pub mod lattice3d;
pub mod lattice_construction;
pub mod lattice_types;


// ======================== LATTICE TYPES & CLASSIFICATION ========================
pub use lattice_types::{
    CellParameters,                 // struct - lengths and angles read off a metric tensor
    CrystalSystem,                  // enum - the seven crystal systems
    identify_crystal_system,        // fn(metric: &Matrix3<f64>, tol: f64) -> CrystalSystem - classifies a conventional cell
};

// ======================== 3D LATTICE STRUCTURE ========================
pub use lattice3d::Lattice3D;      // struct - 3D lattice, vectors as columns
// Lattice3D impl methods:
//   new(direct: Matrix3<f64>) -> Result<Self>                      - constructs lattice, rejects singular bases
//   from_vectors(a, b, c) -> Result<Self>                          - constructs lattice from three vectors
//   from_parameters(a, b, c, alpha, beta, gamma) -> Result<Self>   - standard orientation (a ∥ x, b in xy-plane)
//   frac_to_cart / cart_to_frac                                    - coordinate conversions
//   lattice_parameters(&self) -> (f64, f64, f64)                  - returns lattice constants a, b, c
//   lattice_angles(&self) -> (f64, f64, f64)                      - returns lattice angles α, β, γ in radians
//   basis_vectors(&self) -> [Vector3<f64>; 3]                     - returns lattice vectors a, b, c
//   transformed(&self, q: &Matrix3<f64>) -> Result<Self>          - maps every lattice vector through q
//   standard_orientation_rotation(&self) -> Result<Matrix3<f64>>  - Q with A = Q · A_std
//   hexagonal_axes(&self) -> (Vector3<f64>, Vector3<f64>)         - x, z of the hexagonal family in either setting
//   holohedry_frame(&self, system) -> Matrix3<f64>                 - frame placing the standard holohedry on the lattice axes
//   cell_parameters(&self) -> CellParameters                      - lengths and angles together
//   crystal_system(&self, tol: f64) -> CrystalSystem              - classifies the metric
//   cell_volume / metric_tensor / direct_basis                     - accessors

// ======================== LATTICE CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    cubic_lattice,                  // fn(a: f64) -> Result<Lattice3D>
    tetragonal_lattice,             // fn(a: f64, c: f64) -> Result<Lattice3D>
    orthorhombic_lattice,           // fn(a: f64, b: f64, c: f64) -> Result<Lattice3D>
    hexagonal_lattice,              // fn(a: f64, c: f64) -> Result<Lattice3D>
    rhombohedral_lattice,           // fn(a: f64, alpha: f64) -> Result<Lattice3D>
    monoclinic_lattice,             // fn(a: f64, b: f64, c: f64, beta: f64) -> Result<Lattice3D>
    triclinic_lattice,              // fn(a, b, c, alpha, beta, gamma) -> Result<Lattice3D>
};
