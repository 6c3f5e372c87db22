//! Workspace quality checks.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run all quality checks, reporting failures
//! - `cargo xtask ci` - Same checks, failing on the first broken step
//! - `cargo xtask crates` - List the library crates and their layer
//!
//! # What is checked
//!
//! 1. Formatting (`cargo fmt --check`)
//! 2. Clippy with `-D warnings`
//! 3. Tests, all features
//! 4. Documentation with `-D warnings`
//! 5. No `unwrap`/`expect` in library code outside test modules
//! 6. Library crates stay engine-free (no renderer or scene-graph crates
//!    in their dependency tree)

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Cable workspace quality checks
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for the cable workspace", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Exit non-zero if any check fails
        #[arg(long)]
        ci: bool,
    },

    /// Run the full CI suite
    Ci,

    /// List library crates in dependency order
    Crates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run_ci(),
        Commands::Crates => {
            check::list_crates();
            Ok(())
        }
    }
}
