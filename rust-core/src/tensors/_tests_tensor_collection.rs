#[cfg(test)]
mod _tests_tensor_collection {
    use super::super::_test_fixtures::{banio3_fit_r3, banio3_unfit_r4, non_symm, y_rotation};
    use super::super::tensor::Tensor;
    use super::super::tensor_collection::TensorCollection;
    use super::super::voigt::Voigt;
    use crate::config::{DEFAULT_SYMPREC, ROTATION_TOLERANCE, VOIGT_TOLERANCE};
    use crate::errors::TensorError;
    use crate::interfaces::Transformable;
    use crate::materials::crystal::CommonCrystals;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Matrix3, Matrix6, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Four rank-3 tensors filled with consecutive integers
    fn seq_tc() -> TensorCollection {
        (0..4)
            .map(|k| {
                let start = 27 * k;
                Tensor::new(&[3, 3, 3], (start..start + 27).map(|v| v as f64).collect()).unwrap()
            })
            .collect()
    }

    /// All-ones tensors of rank 2, 3 and 4
    fn diff_rank() -> TensorCollection {
        (2..5).map(|rank| Tensor::from_fn(rank, |_| 1.0)).collect()
    }

    #[test]
    fn test_basic_accessors() {
        let tc = diff_rank();
        assert_eq!(tc.len(), 3);
        assert!(!tc.is_empty());
        assert_eq!(tc.ranks(), vec![2, 3, 4]);
        assert_eq!(tc[1], Tensor::from_fn(3, |_| 1.0));

        let mut empty = TensorCollection::default();
        assert!(empty.is_empty());
        assert!(empty.is_symmetric(1e-8));
        empty.push(non_symm());
        assert_eq!(empty.tensors(), &[non_symm()]);
    }

    #[test]
    fn test_zeroed() {
        let small: TensorCollection = (0..4).map(|_| Tensor::from(Matrix3::identity() * 1e-4)).collect();
        for t in &small.zeroed(1e-3) {
            assert_eq!(t, &Tensor::zeros(2));
        }
        assert_eq!(small.zeroed(1e-5), small);
    }

    #[test]
    fn test_round() {
        let tc = TensorCollection::new(vec![non_symm() * 1.2345, Tensor::from([0.126, 0.0, -0.124])]);
        let rounded = tc.round(2);
        assert_eq!(rounded[1], Tensor::from([0.13, 0.0, -0.12]));
        assert_eq!(rounded[0], tc[0].round(2));
    }

    #[test]
    fn test_elementwise_operations_match_single_tensors() {
        let r = y_rotation();
        for tc in [seq_tc(), diff_rank()] {
            let transformed = tc.transform(&r);
            let rotated = tc.rotate(&r, ROTATION_TOLERANCE).unwrap();
            let symmetrized = tc.symmetrized();
            for (k, t) in tc.iter().enumerate() {
                assert_eq!(transformed[k], t.transform(&r));
                assert_eq!(rotated[k], t.transform(&r));
                assert_eq!(symmetrized[k], t.symmetrized());
            }
        }
    }

    #[test]
    fn test_rotate_rejects_non_rotation() {
        let err = seq_tc().rotate(&(Matrix3::identity() * 2.0), ROTATION_TOLERANCE);
        assert!(matches!(err, Err(TensorError::NotRotation { .. })));

        // Through the trait as well
        let via_trait = Transformable::rotate(&diff_rank(), &y_rotation(), ROTATION_TOLERANCE).unwrap();
        assert_eq!(via_trait, diff_rank().transform(&y_rotation()));
    }

    #[test]
    fn test_is_symmetric() {
        assert!(!seq_tc().is_symmetric(1e-8));
        assert!(seq_tc().symmetrized().is_symmetric(1e-8));
        assert!(diff_rank().is_symmetric(1e-8));
    }

    #[test]
    fn test_fit_to_structure() {
        let si = CommonCrystals::silicon().unwrap();
        for tc in [seq_tc(), diff_rank()] {
            let fitted = tc.fit_to_structure(&si, DEFAULT_SYMPREC);
            for (k, t) in tc.iter().enumerate() {
                assert_abs_diff_eq!(fitted[k], t.fit_to_structure(&si, DEFAULT_SYMPREC), epsilon = 1e-12);
            }
            assert!(fitted.is_fit_to_structure(&si, 1e-8));
        }
        assert!(!diff_rank().is_fit_to_structure(&si, 1e-8));
    }

    #[test]
    fn test_voigt() {
        let tc = TensorCollection::new(vec![banio3_fit_r3(), banio3_unfit_r4()]);
        let forms = tc.voigt().unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].shape(), vec![3, 6]);
        assert_eq!(forms[1].shape(), vec![6, 6]);
        assert!(tc.is_voigt_symmetric(VOIGT_TOLERANCE));

        assert!(diff_rank().is_voigt_symmetric(VOIGT_TOLERANCE));
        assert!(!seq_tc().is_voigt_symmetric(VOIGT_TOLERANCE));
        assert!(matches!(
            seq_tc().voigt(),
            Err(TensorError::NotVoigtCompatible { .. })
        ));
    }

    #[test]
    fn test_voigt_symmetrized() {
        let tc = TensorCollection::new(vec![non_symm(), banio3_unfit_r4()]);
        let symmetrized = tc.voigt_symmetrized().unwrap();
        assert!(symmetrized.is_voigt_symmetric(VOIGT_TOLERANCE));
        assert_eq!(symmetrized[0], non_symm().voigt_symmetrized().unwrap());

        // Rank 3 has no Voigt symmetrization
        assert!(seq_tc().voigt_symmetrized().is_err());
    }

    #[test]
    fn test_from_voigt() {
        let mut rng = StdRng::seed_from_u64(11);
        let forms: Vec<Voigt> = (0..3)
            .map(|_| {
                let m: Matrix6<f64> = Matrix6::from_fn(|_, _| rng.gen_range(-100.0..100.0));
                Voigt::from(m)
            })
            .collect();
        let tc = TensorCollection::from_voigt(&forms);
        assert_eq!(tc.ranks(), vec![4, 4, 4]);
        for (t, form) in tc.iter().zip(&forms) {
            assert_eq!(t, &Tensor::from_voigt(form));
        }
        let back = tc.voigt().unwrap();
        for (b, form) in back.iter().zip(&forms) {
            assert!(b.max_abs_diff(form) < 1e-12);
        }
    }

    #[test]
    fn test_convert_to_ieee() {
        let banio3 = CommonCrystals::barium_nickelate().unwrap();
        let tc = TensorCollection::new(vec![banio3_fit_r3(), banio3_unfit_r4()]);
        let converted = tc.convert_to_ieee(&banio3, true).unwrap();
        for (k, t) in tc.iter().enumerate() {
            assert_abs_diff_eq!(
                converted[k],
                t.convert_to_ieee(&banio3, true).unwrap(),
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_project() {
        let tc = TensorCollection::new(vec![Tensor::from(Matrix3::identity() * 2.0), non_symm()]);
        let projections = tc.project(&Vector3::x());
        assert_eq!(projections, vec![2.0, 0.1]);
    }

    #[test]
    fn test_iteration_and_json() {
        let tc = diff_rank();
        let doubled: TensorCollection = tc.clone().into_iter().map(|t| t * 2.0).collect();
        assert_eq!(doubled.ranks(), tc.ranks());
        assert!(doubled.iter().all(|t| t.iter().all(|&v| v == 2.0)));

        let pair = TensorCollection::from(vec![Tensor::from([1.0, 2.0, 3.0])]);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "[[1.0,2.0,3.0]]");
        let back: TensorCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
        assert_eq!(back.into_inner(), vec![Tensor::from([1.0, 2.0, 3.0])]);
    }
}
