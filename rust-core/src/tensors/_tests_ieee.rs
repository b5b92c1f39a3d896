#[cfg(test)]
mod _tests_ieee {
    use super::super::_test_fixtures::{banio3_fit_r3, banio3_fit_r4, banio3_unfit_r4};
    use super::super::ieee::get_ieee_rotation;
    use super::super::tensor::Tensor;
    use crate::config::GROUP_CLOSURE_TOLERANCE;
    use crate::errors::TensorError;
    use crate::interfaces::Structure;
    use crate::lattice::lattice3d::Lattice3D;
    use crate::lattice::lattice_construction::*;
    use crate::lattice::lattice_types::CrystalSystem;
    use crate::materials::crystal::{CommonCrystals, Crystal};
    use crate::symmetries::symmetry_point_groups::{generate_point_group, mirror_x, six_fold_z};
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
    use std::f64::consts::PI;

    fn arbitrary_rotation() -> Matrix3<f64> {
        Rotation3::from_axis_angle(&Unit::new_normalize(Vector3::new(1.0, -2.0, 0.5)), 0.7)
            .into_inner()
    }

    fn assert_proper_rotation(r: &Matrix3<f64>) {
        assert_abs_diff_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-10);
        assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_standard_hexagonal_frame_is_identity() {
        let banio3 = CommonCrystals::barium_nickelate().unwrap();
        let rotation = get_ieee_rotation(&banio3).unwrap();
        assert_abs_diff_eq!(*rotation.matrix(), Matrix3::identity(), epsilon = 1e-12);

        let converted = banio3_fit_r4().convert_to_ieee(&banio3, true).unwrap();
        assert_abs_diff_eq!(converted, banio3_fit_r4(), epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_hexagonal_crystal_is_restored() {
        let q = arbitrary_rotation();
        let lattice = hexagonal_lattice(5.58, 4.83).unwrap().transformed(&q).unwrap();
        let operations = generate_point_group(&[six_fold_z(), mirror_x()], GROUP_CLOSURE_TOLERANCE);
        let rotated_crystal =
            Crystal::from_point_group(lattice, CrystalSystem::Hexagonal, operations).unwrap();

        let rotation = get_ieee_rotation(&rotated_crystal).unwrap();
        assert_abs_diff_eq!(*rotation.matrix(), q.transpose(), epsilon = 1e-10);

        for tensor in [banio3_fit_r3(), banio3_fit_r4()] {
            let rotated = tensor.transform(&q);
            assert!(rotated.is_fit_to_structure(&rotated_crystal, 1e-6));
            let converted = rotated.convert_to_ieee(&rotated_crystal, true).unwrap();
            assert_abs_diff_eq!(converted, tensor, epsilon = 1e-3);
        }

        // The initial fit turns the computed tensor into its symmetric counterpart
        let converted = banio3_unfit_r4()
            .transform(&q)
            .convert_to_ieee(&rotated_crystal, true)
            .unwrap();
        assert_abs_diff_eq!(converted, banio3_fit_r4(), epsilon = 0.15);
    }

    #[test]
    fn test_tetragonal_unique_axis_goes_to_z() {
        // c along x, a along y, b along z
        let lattice = Lattice3D::from_vectors(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(7.0, 0.0, 0.0),
        )
        .unwrap();
        let crystal = Crystal::holohedral(lattice, 1e-6);
        assert_eq!(crystal.crystal_system(), Some(CrystalSystem::Tetragonal));

        let tensor = Tensor::from([[7.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let converted = tensor.convert_to_ieee(&crystal, false).unwrap();
        let expected = Tensor::from([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 7.0]]);
        assert_abs_diff_eq!(converted, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_tetragonal_short_unique_axis() {
        // Unique axis shorter than the other two
        let crystal = Crystal::holohedral(tetragonal_lattice(5.0, 2.0).unwrap(), 1e-6);
        let rotation = get_ieee_rotation(&crystal).unwrap();
        assert_proper_rotation(rotation.matrix());
        let z = rotation.matrix().row(2).transpose();
        assert_abs_diff_eq!(z.cross(&Vector3::z()).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthorhombic_axes_by_length() {
        // a = 2 (short) goes to z, b = 4 (middle) to x, c = 6 (long) to y
        let crystal =
            Crystal::holohedral(orthorhombic_lattice(2.0, 4.0, 6.0).unwrap(), 1e-6);
        let rotation = get_ieee_rotation(&crystal).unwrap();
        assert_proper_rotation(rotation.matrix());
        let expected = Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0);
        assert_abs_diff_eq!(*rotation.matrix(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_monoclinic_unique_axis_goes_to_y() {
        let lattice = monoclinic_lattice(5.0, 6.0, 4.0, 100f64.to_radians()).unwrap();
        let crystal = Crystal::holohedral(lattice, 1e-6);
        assert_eq!(crystal.crystal_system(), Some(CrystalSystem::Monoclinic));
        let rotation = get_ieee_rotation(&crystal).unwrap();
        assert_proper_rotation(rotation.matrix());

        let vecs = crystal.lattice().basis_vectors();
        let y = rotation.matrix().row(1).transpose();
        let z = rotation.matrix().row(2).transpose();
        assert_abs_diff_eq!(y.dot(&vecs[1].normalize()), 1.0, epsilon = 1e-12);
        // c (4.0) is shorter than a (5.0)
        assert_abs_diff_eq!(z.dot(&vecs[2].normalize()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_systems_give_proper_rotations() {
        let lattices = vec![
            cubic_lattice(3.0).unwrap(),
            hexagonal_lattice(3.0, 5.0).unwrap(),
            triclinic_lattice(3.0, 4.0, 5.0, 1.4, 1.6, 1.8).unwrap(),
            rhombohedral_lattice(4.0, 1.2).unwrap(),
        ];
        for lattice in lattices {
            let crystal = Crystal::new(
                lattice.transformed(&arbitrary_rotation()).unwrap(),
                Some(lattice.crystal_system(1e-6)),
                Vec::new(),
            );
            let rotation = get_ieee_rotation(&crystal).unwrap();
            assert_proper_rotation(rotation.matrix());
        }
    }

    #[test]
    fn test_triclinic_shortest_axis_goes_to_z() {
        let lattice = triclinic_lattice(3.0, 4.0, 5.0, 80f64.to_radians(), PI / 2.0, 1.8).unwrap();
        let crystal = Crystal::new(lattice, Some(CrystalSystem::Triclinic), Vec::new());
        let rotation = get_ieee_rotation(&crystal).unwrap();
        let z = rotation.matrix().row(2).transpose();
        let a = crystal.lattice().basis_vectors()[0];
        assert_abs_diff_eq!(z.dot(&a.normalize()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unclassifiable_structure_fails() {
        let crystal = Crystal::new(cubic_lattice(3.0).unwrap(), None, Vec::new());
        let err = Tensor::zeros(2).convert_to_ieee(&crystal, false).unwrap_err();
        assert_eq!(err, TensorError::UnclassifiableCrystalSystem);
    }

    #[test]
    fn test_rhombohedral_threefold_goes_to_z() {
        let lattice = rhombohedral_lattice(4.0, 1.2)
            .unwrap()
            .transformed(&arbitrary_rotation())
            .unwrap();
        let crystal = Crystal::holohedral(lattice, 1e-6);
        assert_eq!(crystal.crystal_system(), Some(CrystalSystem::Trigonal));

        let rotation = get_ieee_rotation(&crystal).unwrap();
        assert_proper_rotation(rotation.matrix());
        let [a, b, c] = crystal.lattice().basis_vectors();
        let x = rotation.matrix().row(0).transpose();
        let z = rotation.matrix().row(2).transpose();
        assert_abs_diff_eq!(z.dot(&(a + b + c).normalize()), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x.dot(&(a - b).normalize()), 1.0, epsilon = 1e-10);

        // A fitted rank-2 tensor is uniaxial about the IEEE z axis
        let tensor = Tensor::from([[1.0, 0.2, 0.3], [0.2, 2.0, 0.4], [0.3, 0.4, 3.0]]);
        let converted = tensor.convert_to_ieee(&crystal, true).unwrap();
        assert_abs_diff_eq!(converted[[0, 0]], converted[[1, 1]], epsilon = 1e-9);
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            assert_abs_diff_eq!(converted[[i, j]], 0.0, epsilon = 1e-9);
        }
    }
}
