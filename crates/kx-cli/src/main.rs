//! CLI frontend for organizing Klyax project folders.

mod commands;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "klyax",
    about = "Klyax project organizer tool",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove files matching glob masks from the Images and Models folders
    Cleanup {
        /// Glob masks (e.g. "*.bak" "*.log")
        masks: Vec<String>,

        /// Actually delete files (default: dry run)
        #[arg(short, long)]
        delete: bool,

        /// Project folder containing Models and Images (default: current directory)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Show a part or assembly unit with its side files and children
    Display {
        /// Path from the Models folder to the model, without extension (e.g. Klyax/Arm)
        identifier: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Project folder containing Models and Images
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Show every assembly unit in the Models folder
    Tree {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Project folder containing Models and Images
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Cleanup {
            masks,
            delete,
            root,
        } => commands::cleanup::run(&root, &masks, delete),
        Commands::Display {
            identifier,
            json,
            root,
        } => commands::display::run(&root, &identifier, json),
        Commands::Tree { json, root } => commands::tree::run(&root, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
