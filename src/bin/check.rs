//! AdPulse Check CLI
//!
//! Runs the same backend probes as the health page from the command line:
//! configuration first, then one cheap call per core procedure. Exits
//! non-zero when anything fails, so it slots into deploy pipelines.

use adpulse::backend::{run_standard_probes, BackendClient, ProbeResult};
use adpulse::config::{generate_default_config, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "adpulse-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe the analytics backend behind the AdPulse dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the standard backend probes (default)
    Probe,

    /// Print a default config file to stdout
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {e}");
        std::process::exit(2);
    }

    let backend = BackendClient::new(config.backend.clone());
    let results = run_standard_probes(&backend).await;
    let all_pass = results.iter().all(|r| r.pass);

    match cli.format.as_str() {
        "json" => print_json(&results)?,
        _ => print_table(&results),
    }

    if !all_pass {
        std::process::exit(1);
    }
    Ok(())
}

fn print_table(results: &[ProbeResult]) {
    let width = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for result in results {
        if result.pass {
            println!("{:width$}  PASS", result.name);
        } else {
            println!(
                "{:width$}  FAIL  {}",
                result.name,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

fn print_json(results: &[ProbeResult]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}
