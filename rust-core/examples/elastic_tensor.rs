/// Example walking an elastic tensor through the tensor pipeline
///
/// A computed BaNiO3 stiffness matrix is expanded from Voigt notation, fitted to
/// the 6mm point group, rotated away from and back into the IEEE frame, and the
/// Voigt unit strains are reduced under cubic symmetry.
use crystal_tensors::config::{DEFAULT_SYMPREC, REDUCE_TOLERANCE, VOIGT_TOLERANCE};
use crystal_tensors::lattice::hexagonal_lattice;
use crystal_tensors::lattice::CrystalSystem;
use crystal_tensors::symmetries::{generate_point_group, mirror_x, six_fold_z};
use crystal_tensors::{symmetry_reduce, CommonCrystals, Crystal, Tensor, Voigt};
use nalgebra::{Rotation3, Vector3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Elastic Tensor of BaNiO3 ===\n");

    // Example 1: Expand a computed stiffness matrix (GPa)
    println!("1. Expanding the computed Voigt matrix:");
    let computed = Tensor::from_voigt(&Voigt::from([
        [161.26, 62.76, 30.18, 0.0, 0.0, 0.0],
        [62.76, 155.28, 28.53, -0.06, 0.0, 0.0],
        [30.18, 28.53, 207.57, 0.0, 0.0, 0.0],
        [0.0, -0.06, 0.0, 4.44, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 4.23, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 47.08],
    ]));
    println!("   Rank: {}", computed.rank());
    println!(
        "   Voigt symmetric: {}\n",
        computed.is_voigt_symmetric(VOIGT_TOLERANCE)
    );

    // Example 2: Fit to the 6mm point group
    println!("2. Fitting to the crystal symmetry:");
    let banio3 = CommonCrystals::barium_nickelate()?;
    println!(
        "   Fit before: {}",
        computed.is_fit_to_structure(&banio3, 1e-2)
    );
    let fitted = computed.fit_to_structure(&banio3, DEFAULT_SYMPREC);
    if let Voigt::Rank4(c) = fitted.voigt()? {
        println!("   C11 = {:.2}, C22 = {:.2}", c[(0, 0)], c[(1, 1)]);
        println!(
            "   C66 = {:.2}, (C11 - C12) / 2 = {:.2}\n",
            c[(5, 5)],
            (c[(0, 0)] - c[(0, 1)]) / 2.0
        );
    }

    // Example 3: Undo an arbitrary rotation of the whole crystal
    println!("3. Converting a rotated crystal back to the IEEE frame:");
    let q = Rotation3::from_axis_angle(&Vector3::y_axis(), 0.6).into_inner();
    let rotated_crystal = Crystal::from_point_group(
        hexagonal_lattice(5.58, 4.83)?.transformed(&q)?,
        CrystalSystem::Hexagonal,
        generate_point_group(&[six_fold_z(), mirror_x()], 1e-6),
    )?;
    let rotated = fitted.transform(&q);
    let restored = rotated.convert_to_ieee(&rotated_crystal, true)?;
    println!(
        "   Max deviation after conversion: {:.2e}\n",
        restored.max_abs_diff(&fitted)
    );

    // Example 4: Symmetry-distinct strains in a cubic crystal
    println!("4. Reducing the Voigt unit strains under m-3m:");
    let tin = CommonCrystals::alpha_tin()?;
    let strains: Vec<Tensor> = (0..6)
        .map(|k| {
            let mut values = [0.0; 6];
            values[k] = 0.01;
            Tensor::from_voigt(&Voigt::from(values))
        })
        .collect();
    let reduced = symmetry_reduce(&strains, &tin, REDUCE_TOLERANCE, DEFAULT_SYMPREC);
    for (representative, operations) in reduced.iter() {
        println!(
            "   {:?} reproduces {} further strains",
            representative.voigt()?.to_rows()[0],
            operations.len()
        );
    }

    Ok(())
}
