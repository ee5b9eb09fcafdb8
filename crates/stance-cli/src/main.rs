//! stance CLI - inspect, validate and simulate animation catalogs

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{clips, export, pose, simulate, validate, CatalogSource};

#[derive(Parser)]
#[command(name = "stance")]
#[command(about = "Keyframe pose animation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate catalog files
    Validate {
        /// Catalog files (.anim.toml)
        #[arg(required = true)]
        files: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// List the clips of a catalog
    Clips {
        #[command(flatten)]
        source: CatalogSource,
    },

    /// Print the resolved pose of a clip at a frame
    Pose {
        /// Clip name (e.g., "attack")
        clip: String,

        /// Elapsed frames into the clip
        #[arg(long, default_value = "0")]
        frame: f64,

        #[command(flatten)]
        source: CatalogSource,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Run a scripted sequence of animator commands
    Simulate {
        /// Path to a TOML script of steps
        script: String,

        #[command(flatten)]
        source: CatalogSource,
    },

    /// Print a built-in catalog as TOML
    Export {
        /// Archetype name (knight or robot)
        archetype: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { files, format } => validate::run(&files, &format),
        Commands::Clips { source } => clips::run(&source),
        Commands::Pose {
            clip,
            frame,
            source,
            format,
        } => pose::run(pose::PoseArgs {
            clip,
            frame,
            source,
            format,
        }),
        Commands::Simulate { script, source } => simulate::run(&script, &source),
        Commands::Export { archetype } => export::run(&archetype),
    }
}
