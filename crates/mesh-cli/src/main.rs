//! mesh-subdivide CLI - refine closed triangle meshes.
//!
//! Usage: mesh-subdivide <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `mesh-subdivide --help` for available commands.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mesh_subdivide::{SubdivisionScheme, DEFAULT_TOLERANCE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mesh-subdivide")]
#[command(author, version, about = "Subdivide closed triangle meshes", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subdivide a mesh
    Subdivide {
        /// Input mesh file (STL or OBJ)
        input: PathBuf,

        /// Output mesh file (STL or OBJ)
        output: PathBuf,

        /// Subdivision scheme: catmull-clark, loop, sqrt3 or butterfly
        #[arg(short, long)]
        scheme: Option<SubdivisionScheme>,

        /// Number of subdivision passes
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Weld tolerance (squared distance)
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Refuse to produce more faces than this
        #[arg(long)]
        max_faces: Option<usize>,

        /// Subdivision config file (TOML, or JSON with a .json extension).
        /// Command-line options override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Display mesh information and check it can be subdivided
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Weld tolerance (squared distance) used for the subdividable verdict
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
}

/// How results are printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Subdivide {
            input,
            output,
            scheme,
            iterations,
            tolerance,
            max_faces,
            config,
        } => commands::subdivide::run(
            &commands::subdivide::SubdivideArgs {
                input,
                output,
                scheme,
                iterations,
                tolerance,
                max_faces,
                config,
            },
            cli.format,
            cli.quiet,
        ),
        Commands::Info { input, tolerance } => {
            commands::info::run(&input, tolerance, cli.format, cli.quiet)
        }
    }
}
