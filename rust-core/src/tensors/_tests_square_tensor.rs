#[cfg(test)]
mod _tests_square_tensor {
    use super::super::_test_fixtures::{non_symm, y_rotation};
    use super::super::square_tensor::{PolarSide, SquareTensor};
    use super::super::tensor::Tensor;
    use crate::config::ROTATION_TOLERANCE;
    use crate::errors::{ShapeError, TensorError};
    use crate::interfaces::Transformable;
    use approx::assert_relative_eq;
    use nalgebra::Matrix3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_square(seed: u64) -> SquareTensor {
        let mut rng = StdRng::seed_from_u64(seed);
        SquareTensor::new(Matrix3::from_fn(|_, _| rng.gen_range(-1.0..1.0)))
    }

    fn non_symm_sq() -> SquareTensor {
        SquareTensor::try_from(non_symm()).unwrap()
    }

    fn symm_sq() -> SquareTensor {
        SquareTensor::from([[0.1, 0.3, 0.4], [0.3, 0.5, 0.2], [0.4, 0.2, 0.6]])
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let non_square = vec![
            vec![0.1, 0.2, 0.1],
            vec![0.1, 0.2, 0.3],
            vec![0.1, 0.2, 0.3],
            vec![0.1, 0.1, 0.1],
        ];
        assert!(matches!(
            SquareTensor::from_rows(&non_square),
            Err(TensorError::Shape(ShapeError::AxisLength(_)))
        ));

        let ragged = vec![vec![0.1, 0.2], vec![0.2, 0.3, 0.4], vec![0.2, 0.3, 0.5]];
        assert!(matches!(
            SquareTensor::from_rows(&ragged),
            Err(TensorError::Shape(ShapeError::Ragged { .. }))
        ));

        assert_eq!(
            SquareTensor::try_from(Tensor::zeros(3)).unwrap_err(),
            TensorError::Shape(ShapeError::Rank {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn test_transpose() {
        let expected = SquareTensor::from([[0.1, 0.4, 0.2], [0.2, 0.5, 0.5], [0.3, 0.6, 0.5]]);
        assert_eq!(non_symm_sq().trans(), expected);
        assert_eq!(symm_sq().trans(), symm_sq());
        let r = random_square(1);
        assert_eq!(r.trans().trans(), r);
    }

    #[test]
    fn test_inverse() {
        let inv = non_symm_sq().inv().unwrap();
        let expected = non_symm_sq().matrix().try_inverse().unwrap();
        assert_relative_eq!(*inv.matrix(), expected, epsilon = 1e-12);
        assert_relative_eq!(
            inv.matrix() * non_symm_sq().matrix(),
            Matrix3::identity(),
            epsilon = 1e-12
        );

        let non_invertible = SquareTensor::from([[0.1, 0.0, 0.0], [0.2, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert!(matches!(
            non_invertible.inv(),
            Err(TensorError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_determinant() {
        assert_relative_eq!(non_symm_sq().det(), 0.009, epsilon = 1e-15);
        let non_invertible = SquareTensor::from([[0.1, 0.0, 0.0], [0.2, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(non_invertible.det(), 0.0);
    }

    #[test]
    fn test_symmetrized() {
        let expected = SquareTensor::from([[0.1, 0.3, 0.25], [0.3, 0.5, 0.55], [0.25, 0.55, 0.5]]);
        assert_relative_eq!(
            *non_symm_sq().symmetrized().matrix(),
            *expected.matrix(),
            epsilon = 1e-15
        );
        assert_eq!(symm_sq().symmetrized(), symm_sq());
        assert!(random_square(2).symmetrized().is_symmetric(1e-15));

        // Agrees with the general rank-r rule
        let r = random_square(3);
        assert_relative_eq!(
            *r.symmetrized().matrix(),
            r.to_tensor().symmetrized().to_matrix().unwrap(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_principal_invariants() {
        let t = random_square(4);
        let m = t.matrix();
        let i1 = m.trace();
        let i2 = m[(0, 0)] * m[(1, 1)] + m[(1, 1)] * m[(2, 2)] + m[(2, 2)] * m[(0, 0)]
            - m[(0, 1)] * m[(1, 0)]
            - m[(0, 2)] * m[(2, 0)]
            - m[(2, 1)] * m[(1, 2)];
        let i3 = m.determinant();
        let [p1, p2, p3] = t.principal_invariants();
        assert_relative_eq!(p1, i1, epsilon = 1e-12);
        assert_relative_eq!(p2, i2, epsilon = 1e-12);
        assert_relative_eq!(p3, i3, epsilon = 1e-12);

        // Coefficients of the characteristic polynomial: the eigenvalues of a
        // diagonal matrix give sum, pairwise products and product
        let diag = SquareTensor::new(Matrix3::from_diagonal(&nalgebra::Vector3::new(2.0, 3.0, 5.0)));
        assert_eq!(diag.principal_invariants(), [10.0, 31.0, 30.0]);
    }

    #[test]
    fn test_is_rotation() {
        let rotation = SquareTensor::new(y_rotation());
        assert!(rotation.is_rotation(ROTATION_TOLERANCE));
        assert!(!symm_sq().is_rotation(ROTATION_TOLERANCE));

        let low_val_2 = SquareTensor::from([
            [1e-6, -1.0 - 1e-6, 1e-6],
            [1.0 + 1e-7, 1e-6, 1e-6],
            [1e-7, 1e-7, 1.0 + 1e-6],
        ]);
        assert!(low_val_2.is_rotation(ROTATION_TOLERANCE));
        assert!(!low_val_2.is_rotation(1e-8));

        let improper = SquareTensor::new(-Matrix3::identity());
        assert!(!improper.is_rotation(ROTATION_TOLERANCE));
    }

    #[test]
    fn test_get_scaled() {
        let expected = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 2.0, 5.0, 5.0);
        assert_relative_eq!(*non_symm_sq().get_scaled(10.0).matrix(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_polar_decomposition() {
        let t = random_square(5);
        let (u, p) = t.polar_decomposition(PolarSide::Right);
        assert_relative_eq!(u.matrix() * p.matrix(), *t.matrix(), epsilon = 1e-10);
        assert_relative_eq!(
            u.matrix() * u.matrix().transpose(),
            Matrix3::identity(),
            epsilon = 1e-10
        );
        assert!(p.is_symmetric(1e-10));

        let (u_left, p_left) = t.polar_decomposition(PolarSide::Left);
        assert_relative_eq!(p_left.matrix() * u_left.matrix(), *t.matrix(), epsilon = 1e-10);
        assert_relative_eq!(*u_left.matrix(), *u.matrix(), epsilon = 1e-10);
        assert!(p_left.is_symmetric(1e-10));

        // Stretch eigenvalues are the singular values, hence non-negative
        for value in p.matrix().symmetric_eigenvalues().iter() {
            assert!(*value > -1e-10);
        }
    }

    #[test]
    fn test_refine_rotation() {
        let exact = y_rotation();
        let noisy = SquareTensor::new(exact + Matrix3::from_fn(|i, j| 1e-4 * (i + 2 * j) as f64));
        assert!(!noisy.is_rotation(1e-6));
        let refined = noisy.refine_rotation();
        assert!(refined.is_rotation(1e-12));
        assert_relative_eq!(*refined.matrix(), exact, epsilon = 5e-3);
    }

    #[test]
    fn test_transform_keeps_square_type() {
        let r = y_rotation();
        let square = non_symm_sq().transform(&r);
        let general = non_symm().transform(&r);
        assert_relative_eq!(*square.matrix(), general.to_matrix().unwrap(), epsilon = 1e-14);

        let rotated = Transformable::rotate(&non_symm_sq(), &r, ROTATION_TOLERANCE).unwrap();
        assert_eq!(rotated, square);
        assert!(non_symm_sq().rotate(symm_sq().matrix(), ROTATION_TOLERANCE).is_err());
    }

    #[test]
    fn test_json_rows() {
        let json = serde_json::to_string(&symm_sq()).unwrap();
        assert_eq!(json, "[[0.1,0.3,0.4],[0.3,0.5,0.2],[0.4,0.2,0.6]]");
        let back: SquareTensor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, symm_sq());
        assert!(serde_json::from_str::<SquareTensor>("[1, 2, 3]").is_err());
    }
}
