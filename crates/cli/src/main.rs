//! Dimension Registry CLI
//!
//! Usage:
//!   dimensions                                   - Start interactive mode
//!   dimensions dimension list [--include-retired] - List dimensions
//!   dimensions dimension search <name> [--exact]  - Search by name
//!   dimensions dimension add <name>              - Add a dimension
//!   dimensions dimension retire <id> -r <reason> - Retire a dimension
//!   dimensions column person-id                  - Describe the person id column
//!
//! Without `--config` the in-memory backend is used, so only interactive
//! mode keeps state between commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::commands::{ColumnCommand, DimensionCommand};
use cli::interactive::InteractiveCli;
use dimension_adapter::open_persister;
use dimension_domain::DimensionService;
use shared::AppConfig;

#[derive(Parser)]
#[command(name = "dimensions")]
#[command(about = "Dimension Registry - Manage indicator dimensions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage dimensions
    Dimension(DimensionCommand),
    /// Describe report columns
    Column(ColumnCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Some(Commands::Column(cmd)) => {
            println!("{}", cmd.run(cli.json));
        }
        Some(Commands::Dimension(cmd)) => {
            let mut service = DimensionService::new(open_persister(&config.storage)?);
            println!("{}", cmd.run(&mut service, cli.json)?);
        }
        None => {
            // No subcommand - start interactive mode
            let service = DimensionService::new(open_persister(&config.storage)?);
            let mut interactive = InteractiveCli::new(service, cli.json);
            interactive.run()?;
        }
    }

    Ok(())
}
