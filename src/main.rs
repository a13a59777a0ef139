use clap::{Parser, Subcommand};
use site_content::{comment, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Inspect the blog's site config and normalize comment records")]
#[command(long_about = "\
Inspect the blog's site config and normalize comment records

The site config (title, menu, footer, analytics id) is compiled in and
validated on startup. Comment records may use any of the known field
namings and are converted to the canonical shape:

  authorName / bodyText   canonical
  author / text           legacy
  name / comment          legacy

Every record also needs an ISO-8601 `timestamp`.

Set RUST_LOG=debug to see which records use legacy field names.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the validated site config
    Config,
    /// Print a config.toml with every key at its built-in value
    GenConfig,
    /// Validate the built-in config, or a candidate overlay file
    Check {
        /// TOML overlay to validate on top of the built-in values
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Normalize a JSON array of raw comment records
    Comments {
        /// JSON file containing an array of records
        file: PathBuf,
        /// Print accepted comments as canonical JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            let site = config::load_config()?;
            output::print_config(site);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check { config: overlay } => match overlay {
            Some(path) => {
                println!("==> Checking {}", path.display());
                let site = config::load_config_file(&path)?;
                output::print_config(&site);
                println!("==> Config is valid");
            }
            None => {
                println!("==> Checking built-in config");
                config::load_config()?;
                println!("==> Config is valid");
            }
        },
        Command::Comments { file, json } => {
            let content = std::fs::read_to_string(&file)?;
            let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;
            let report = comment::normalize_batch(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&report.comments)?);
            } else {
                output::print_batch_report(&report);
            }
        }
    }

    Ok(())
}
