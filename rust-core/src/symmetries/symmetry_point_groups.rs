use crate::config::GROUP_CLOSURE_TOLERANCE;
use crate::lattice::lattice_types::CrystalSystem;
use crate::symmetries::symmetry_operations::SymmetryOperation;
use nalgebra::Matrix3;

/// Close a set of Cartesian generators into a finite point group.
///
/// The identity comes first; the remaining elements appear in the order they
/// are first reached by left-multiplying known elements with each generator,
/// so the output order depends only on the generator order.
pub fn generate_point_group(generators: &[Matrix3<f64>], tol: f64) -> Vec<SymmetryOperation> {
    let mut group: Vec<Matrix3<f64>> = vec![Matrix3::identity()];

    let mut next = 0;
    while next < group.len() {
        let element = group[next];
        for generator in generators {
            let candidate = generator * element;
            if !group.iter().any(|g| (g - candidate).abs().max() < tol) {
                group.push(candidate);
            }
        }
        next += 1;
    }

    group.into_iter().map(SymmetryOperation::from_rotation).collect()
}

/// Holohedry (lattice point group) of a crystal system in its standard
/// Cartesian setting: c ∥ z, a ∥ x, monoclinic unique axis ∥ y, trigonal in
/// the hexagonal setting.
pub fn generate_holohedry(system: CrystalSystem) -> Vec<SymmetryOperation> {
    match system {
        CrystalSystem::Cubic => generate_cubic_operations(),
        CrystalSystem::Hexagonal => generate_hexagonal_operations(),
        CrystalSystem::Trigonal => generate_trigonal_operations(),
        CrystalSystem::Tetragonal => generate_tetragonal_operations(),
        CrystalSystem::Orthorhombic => generate_orthorhombic_operations(),
        CrystalSystem::Monoclinic => generate_monoclinic_operations(),
        CrystalSystem::Triclinic => generate_triclinic_operations(),
    }
}

// ======================== GENERATORS ========================

/// Inversion through the origin
pub fn inversion() -> Matrix3<f64> {
    -Matrix3::identity()
}

/// 4-fold rotation about z (90°)
pub fn four_fold_z() -> Matrix3<f64> {
    Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0)
}

/// 3-fold rotation about [111], cyclic x → y → z
pub fn three_fold_body_diagonal() -> Matrix3<f64> {
    Matrix3::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
}

/// 6-fold rotation about z (60°)
pub fn six_fold_z() -> Matrix3<f64> {
    let s = 3.0_f64.sqrt() / 2.0;
    Matrix3::new(0.5, -s, 0.0, s, 0.5, 0.0, 0.0, 0.0, 1.0)
}

/// 3-fold rotation about z (120°)
pub fn three_fold_z() -> Matrix3<f64> {
    let s = 3.0_f64.sqrt() / 2.0;
    Matrix3::new(-0.5, -s, 0.0, s, -0.5, 0.0, 0.0, 0.0, 1.0)
}

/// 2-fold rotation about x
pub fn two_fold_x() -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0)
}

/// 2-fold rotation about y
pub fn two_fold_y() -> Matrix3<f64> {
    Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0)
}

/// Mirror plane perpendicular to x
pub fn mirror_x() -> Matrix3<f64> {
    Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
}

// ======================== HOLOHEDRIES ========================

/// Cubic m-3m (48 operations)
pub fn generate_cubic_operations() -> Vec<SymmetryOperation> {
    generate_point_group(
        &[four_fold_z(), three_fold_body_diagonal(), inversion()],
        GROUP_CLOSURE_TOLERANCE,
    )
}

/// Hexagonal 6/mmm (24 operations)
pub fn generate_hexagonal_operations() -> Vec<SymmetryOperation> {
    generate_point_group(
        &[six_fold_z(), two_fold_x(), inversion()],
        GROUP_CLOSURE_TOLERANCE,
    )
}

/// Tetragonal 4/mmm (16 operations)
pub fn generate_tetragonal_operations() -> Vec<SymmetryOperation> {
    generate_point_group(
        &[four_fold_z(), two_fold_x(), inversion()],
        GROUP_CLOSURE_TOLERANCE,
    )
}

/// Orthorhombic mmm (8 operations)
pub fn generate_orthorhombic_operations() -> Vec<SymmetryOperation> {
    generate_point_group(
        &[two_fold_x(), two_fold_y(), inversion()],
        GROUP_CLOSURE_TOLERANCE,
    )
}

/// Trigonal -3m, hexagonal setting (12 operations)
pub fn generate_trigonal_operations() -> Vec<SymmetryOperation> {
    generate_point_group(
        &[three_fold_z(), two_fold_x(), inversion()],
        GROUP_CLOSURE_TOLERANCE,
    )
}

/// Monoclinic 2/m, unique axis b (4 operations)
pub fn generate_monoclinic_operations() -> Vec<SymmetryOperation> {
    generate_point_group(&[two_fold_y(), inversion()], GROUP_CLOSURE_TOLERANCE)
}

/// Triclinic -1 (2 operations)
pub fn generate_triclinic_operations() -> Vec<SymmetryOperation> {
    generate_point_group(&[inversion()], GROUP_CLOSURE_TOLERANCE)
}
