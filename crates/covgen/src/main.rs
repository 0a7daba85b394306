use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd_docs;
mod cmd_gen;
mod cmd_helpers;
mod cmd_lint;
mod cmd_users;

#[derive(Parser)]
#[command(name = "covgen", about = "Synthetic document-access traffic generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a year of access records and send them in bulk
    Gen {
        /// Path to covgen.toml
        #[arg(short, long)]
        config: PathBuf,

        /// RNG seed; overrides generation.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Number of days to simulate; overrides generation.days
        #[arg(long)]
        days: Option<u32>,

        /// Build every batch but discard it instead of sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Create the generated users: write the patch document and/or send it
    /// to [users.admin]
    Users {
        /// Path to covgen.toml
        #[arg(short, long)]
        config: PathBuf,

        /// Output JSON file
        #[arg(long)]
        out: Option<PathBuf>,

        /// RNG seed; overrides generation.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Skip sending to [users.admin]
        #[arg(long)]
        dry_run: bool,
    },
    /// Assign areas, products, placements and users to existing documents
    Docs {
        /// Path to covgen.toml
        #[arg(short, long)]
        config: PathBuf,

        /// File with one document id per line
        #[arg(long)]
        ids: PathBuf,

        /// RNG seed; overrides generation.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Build every batch but discard it instead of sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate covgen.toml and the file pool, then print the traffic plan
    Lint {
        /// Path to covgen.toml
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gen {
            config,
            seed,
            days,
            dry_run,
        } => cmd_gen::run(config, seed, days, dry_run),
        Commands::Users {
            config,
            out,
            seed,
            dry_run,
        } => cmd_users::run(config, out, seed, dry_run),
        Commands::Docs {
            config,
            ids,
            seed,
            dry_run,
        } => cmd_docs::run(config, ids, seed, dry_run),
        Commands::Lint { config } => cmd_lint::run(config),
    }
}
