//! pointkernel Command Line Interface
//!
//! Computes interpolation weights for query points over a CSV point cloud and
//! manages kernel configuration files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use pointkernel::api::{KernelSetup, QueryStats};
use pointkernel::core::{EllipsoidalConfig, Point3, Result};
use pointkernel::kernel::KernelType;
use pointkernel::persistence::KernelFile;
use pointkernel::PointCloud;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "pointkernel")]
#[command(about = "Interpolation weights for point clouds")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "pointkernel contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute weights at query points
    Weights(WeightsArgs),
    /// Write a kernel configuration file
    Config(ConfigArgs),
    /// Display a kernel configuration file
    Info(InfoArgs),
}

#[derive(Args)]
struct WeightsArgs {
    /// Source point cloud (CSV with x,y,z header)
    #[arg(long)]
    points: PathBuf,

    /// Query points (CSV with x,y,z header)
    #[arg(long)]
    queries: PathBuf,

    /// Kernel configuration file; overrides the kernel arguments
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    kernel: KernelArgs,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Output kernel file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    kernel: KernelArgs,
}

#[derive(Args)]
struct InfoArgs {
    /// Kernel file
    config: PathBuf,
}

#[derive(Args)]
struct KernelArgs {
    /// Kernel type
    #[arg(short, long, default_value = "ellipsoidal")]
    kernel: CliKernel,

    /// Search radius
    #[arg(short, long, default_value = "1.0")]
    radius: f64,

    /// Falloff sharpness (ellipsoidal, gaussian)
    #[arg(short, long, default_value = "2.0")]
    sharpness: f64,

    /// In-plane to normal-axis scaling ratio (ellipsoidal)
    #[arg(short, long, default_value = "2.0")]
    eccentricity: f64,

    /// Inverse distance power (shepard)
    #[arg(short, long, default_value = "2.0")]
    power: f64,

    /// Ignore the normals array
    #[arg(long)]
    no_normals: bool,

    /// Scale weights by the scalars array
    #[arg(long)]
    use_scalars: bool,

    /// Name of the normals array
    #[arg(long, default_value = "Normals")]
    normals_array: String,

    /// Name of the scalars array
    #[arg(long, default_value = "Scalars")]
    scalars_array: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    /// Anisotropic Gaussian oriented by point normals
    #[value(name = "ellipsoidal")]
    Ellipsoidal,
    /// Isotropic Gaussian
    #[value(name = "gaussian")]
    Gaussian,
    /// Inverse distance weighting
    #[value(name = "shepard")]
    Shepard,
    /// Uniform average
    #[value(name = "linear")]
    Linear,
}

impl From<&KernelArgs> for KernelType {
    fn from(args: &KernelArgs) -> Self {
        match args.kernel {
            CliKernel::Ellipsoidal => KernelType::Ellipsoidal(
                EllipsoidalConfig::default()
                    .with_radius(args.radius)
                    .with_sharpness(args.sharpness)
                    .with_eccentricity(args.eccentricity)
                    .with_normals(!args.no_normals)
                    .with_scalars(args.use_scalars)
                    .with_normals_array_name(args.normals_array.clone())
                    .with_scalars_array_name(args.scalars_array.clone()),
            ),
            CliKernel::Gaussian => KernelType::Gaussian {
                radius: args.radius,
                sharpness: args.sharpness,
            },
            CliKernel::Shepard => KernelType::Shepard {
                radius: args.radius,
                power: args.power,
            },
            CliKernel::Linear => KernelType::Linear {
                radius: args.radius,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Weights(args) => weights_command(args),
        Commands::Config(args) => config_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn weights_command(args: WeightsArgs) -> Result<()> {
    let kind = match &args.config {
        Some(path) => {
            info!("Loading kernel from: {path:?}");
            KernelFile::load_from_file(path)?.kernel
        }
        None => KernelType::from(&args.kernel),
    };

    info!("Loading points from: {:?}", args.points);
    let bound = KernelSetup::with_kernel(kind.build()).bind_csv(&args.points)?;
    let info = bound.info();
    info!(
        "Using {} kernel over {} points, arrays {:?}",
        info.kernel, info.n_points, info.arrays
    );

    info!("Loading queries from: {:?}", args.queries);
    let queries = load_queries(&args.queries)?;
    let results = bound.weights_for(&queries);

    let stats = QueryStats::from_results(&results);
    info!(
        "{} queries, {} empty, {} failed, {:.2} neighbors on average",
        stats.queries,
        stats.empty,
        stats.failed,
        stats.mean_neighbors()
    );

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    writeln!(writer, "# Weights for {} queries", queries.len())?;
    writeln!(writer, "# Format: query_index point_id weight")?;
    for (q, result) in results.iter().enumerate() {
        match result {
            Ok(hood) => {
                for (id, w) in hood.iter() {
                    writeln!(writer, "{q} {id} {w:.9}")?;
                }
            }
            Err(e) => warn!("Skipping query {q}: {e}"),
        }
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        info!("Weights saved to: {path:?}");
    }
    Ok(())
}

fn config_command(args: ConfigArgs) -> Result<()> {
    let kind = KernelType::from(&args.kernel);
    kind.validate()?;

    KernelFile::new(kind).save_to_file(&args.output)?;
    info!("Kernel saved to: {:?}", args.output);
    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading kernel from: {:?}", args.config);
    KernelFile::load_from_file(&args.config)?.print_summary();
    Ok(())
}

/// Query positions are read with the point cloud loader; extra columns are ignored
fn load_queries(path: &Path) -> Result<Vec<Point3>> {
    Ok(PointCloud::from_csv_file(path)?.points().to_vec())
}
