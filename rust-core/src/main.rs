use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crystal_tensors::config::{
    ANGLE_TOLERANCE, DEFAULT_SYMPREC, GROUP_CLOSURE_TOLERANCE, REDUCE_TOLERANCE,
};
use crystal_tensors::lattice::{CrystalSystem, Lattice3D};
use crystal_tensors::symmetries::generate_point_group;
use crystal_tensors::{symmetry_reduce, Crystal, Structure, Tensor, TensorCollection, Voigt};
use env_logger::Env;
use log::{debug, info, warn};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "crystal-tensors")]
#[command(about = "Voigt conversion, symmetry fitting and IEEE orientation of crystal property tensors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a tensor (nested JSON array) into Voigt notation
    Voigt {
        /// Tensor file, stdin if omitted
        input: Option<PathBuf>,
    },
    /// Expand a Voigt form (6, 3×6 or 6×6 JSON array) into the full tensor
    FromVoigt {
        /// Voigt file, stdin if omitted
        input: Option<PathBuf>,
    },
    /// Symmetrize a tensor over all index permutations
    Symmetrize {
        /// Tensor file, stdin if omitted
        input: Option<PathBuf>,

        /// Only symmetrize the Voigt index pairs
        #[arg(long)]
        voigt: bool,
    },
    /// Average a tensor over the point group of a crystal
    Fit {
        /// Crystal description (JSON)
        #[arg(short, long)]
        crystal: PathBuf,

        /// Tensor file, stdin if omitted
        input: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_SYMPREC)]
        symprec: f64,
    },
    /// Rotate a tensor into the IEEE standard frame of a crystal
    Ieee {
        /// Crystal description (JSON)
        #[arg(short, long)]
        crystal: PathBuf,

        /// Tensor file, stdin if omitted
        input: Option<PathBuf>,

        /// Skip fitting to the crystal before rotating
        #[arg(long)]
        no_fit: bool,
    },
    /// Group a list of tensors into classes related by the crystal's symmetry
    Reduce {
        /// Crystal description (JSON)
        #[arg(short, long)]
        crystal: PathBuf,

        /// JSON list of tensors, stdin if omitted
        input: Option<PathBuf>,

        #[arg(long, default_value_t = REDUCE_TOLERANCE)]
        tol: f64,

        #[arg(long, default_value_t = DEFAULT_SYMPREC)]
        symprec: f64,
    },
}

/// Crystal file format. Point-group generators are rotation matrices (rows)
/// in the standard setting; without them the lattice holohedry is placed
/// along the lattice's own axes.
#[derive(Deserialize)]
struct CrystalInput {
    /// Lattice vectors a, b, c as rows
    lattice: Lattice3D,
    #[serde(default)]
    crystal_system: Option<CrystalSystem>,
    #[serde(default)]
    generators: Option<Vec<[[f64; 3]; 3]>>,
}

#[derive(Serialize)]
struct ReducedClass {
    representative: Tensor,
    /// Rotation parts (rows) mapping the representative onto each member
    operations: Vec<[[f64; 3]; 3]>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    debug!("Starting crystal-tensors v{}", crystal_tensors::VERSION);

    match cli.command {
        Commands::Voigt { input } => {
            let tensor: Tensor = read_json(input.as_deref())?;
            info!("Compressing rank-{} tensor", tensor.rank());
            print_json(&tensor.voigt()?)
        }
        Commands::FromVoigt { input } => {
            let voigt: Voigt = read_json(input.as_deref())?;
            print_json(&Tensor::from_voigt(&voigt))
        }
        Commands::Symmetrize { input, voigt } => {
            let tensor: Tensor = read_json(input.as_deref())?;
            let symmetrized = if voigt {
                tensor.voigt_symmetrized()?
            } else {
                tensor.symmetrized()
            };
            print_json(&symmetrized)
        }
        Commands::Fit {
            crystal,
            input,
            symprec,
        } => {
            let crystal = load_crystal(&crystal)?;
            let tensor: Tensor = read_json(input.as_deref())?;
            let fitted = tensor.fit_to_structure(&crystal, symprec);
            info!(
                "Fitting moved elements by at most {:.3e}",
                tensor.max_abs_diff(&fitted)
            );
            print_json(&fitted)
        }
        Commands::Ieee {
            crystal,
            input,
            no_fit,
        } => {
            let crystal = load_crystal(&crystal)?;
            let tensor: Tensor = read_json(input.as_deref())?;
            let converted = tensor
                .convert_to_ieee(&crystal, !no_fit)
                .context("IEEE conversion failed")?;
            print_json(&converted)
        }
        Commands::Reduce {
            crystal,
            input,
            tol,
            symprec,
        } => {
            let crystal = load_crystal(&crystal)?;
            let tensors: TensorCollection = read_json(input.as_deref())?;
            let reduced = symmetry_reduce(tensors.tensors(), &crystal, tol, symprec);
            info!(
                "Reduced {} tensors to {} classes",
                tensors.len(),
                reduced.len()
            );
            let classes: Vec<ReducedClass> = reduced
                .into_iter()
                .map(|(representative, ops)| ReducedClass {
                    representative,
                    operations: ops.iter().map(|op| matrix_rows(&op.rotation)).collect(),
                })
                .collect();
            print_json(&classes)
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("Failed to parse JSON input")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_crystal(path: &Path) -> Result<Crystal> {
    let input: CrystalInput = read_json(Some(path))?;
    let system = match input.crystal_system {
        Some(system) => system,
        None => {
            let system = input.lattice.crystal_system(ANGLE_TOLERANCE);
            info!("Classified lattice as {}", system);
            system
        }
    };

    let crystal = match input.generators {
        Some(generators) if !generators.is_empty() => {
            let matrices: Vec<Matrix3<f64>> = generators
                .iter()
                .map(|rows| Matrix3::from_fn(|i, j| rows[i][j]))
                .collect();
            let operations = generate_point_group(&matrices, GROUP_CLOSURE_TOLERANCE);
            Crystal::from_point_group(input.lattice, system, operations)?
        }
        Some(_) => bail!("Generator list in {} is empty", path.display()),
        None => Crystal::from_holohedry(input.lattice, system),
    };
    debug!(
        "Loaded {} crystal with {} operations",
        system,
        crystal.symmetry_operations(DEFAULT_SYMPREC).len()
    );
    Ok(crystal)
}

fn matrix_rows(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    [0, 1, 2].map(|i| [m[(i, 0)], m[(i, 1)], m[(i, 2)]])
}
