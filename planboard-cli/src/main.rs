//! Planboard CLI - Command-line interface for Planboard

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use planboard_core::{
    DataPartnerFilter, PartnerFilter, PlaceholderRegistry, PlanFilter, PlanRegistry,
};
use planboard_server::{routes::ROUTES, ServerConfig};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "planboard")]
#[command(about = "Planboard - partner, data partner and plan administration API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Planboard HTTP server
    Serve {
        /// Configuration file path (TOML)
        #[arg(short, long)]
        config: Option<String>,

        /// Address to listen on (overrides config and BIND_ADDRESS)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// List the HTTP routes served
    Routes {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the records the placeholder registry serves
    Sample {
        /// Which records to print
        #[arg(value_enum)]
        kind: SampleKind,

        /// Plan id for advisor-plan
        #[arg(long, default_value = "sample")]
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleKind {
    Partners,
    DataPartners,
    Plans,
    AdvisorPlan,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            serve_command(config, bind, cli.verbose).await?;
        }
        Commands::Routes { format } => {
            init_verbose(cli.verbose)?;
            routes_command(format)?;
        }
        Commands::Sample { kind, id } => {
            init_verbose(cli.verbose)?;
            sample_command(kind, &id)?;
        }
    }

    Ok(())
}

fn init_verbose(verbose: bool) -> Result<()> {
    if verbose {
        planboard_server::tracing::init_console_logging("planboard=debug")?;
    }
    Ok(())
}

async fn serve_command(config: Option<String>, bind: Option<String>, verbose: bool) -> Result<()> {
    let mut server_config = match config {
        Some(path) => {
            println!("{} Loading configuration from {}...", "→".blue(), path);
            ServerConfig::from_file(&path)?.with_env_overrides()?
        }
        None => ServerConfig::load()?,
    };

    if let Some(addr) = bind {
        server_config.bind_address = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid bind address: {}", addr))?;
    }
    if verbose {
        server_config.debug = true;
    }

    println!(
        "{} Starting Planboard server on {}...",
        "→".blue(),
        server_config.bind_address
    );

    planboard_server::tracing::init_logging(&server_config)?;
    planboard_server::server::run(server_config).await
}

fn routes_command(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(ROUTES)?);
        }
        OutputFormat::Text => {
            println!("{} Planboard routes", "═".blue().bold());
            for route in ROUTES {
                let method = match route.method {
                    "GET" => route.method.green(),
                    _ => route.method.yellow(),
                };
                println!(
                    "{} {:<6} {:<36} {}  {}",
                    "▸".blue(),
                    method,
                    route.path,
                    route.status,
                    route.description.dimmed()
                );
            }
        }
    }
    Ok(())
}

fn sample_command(kind: SampleKind, id: &str) -> Result<()> {
    let registry = PlaceholderRegistry::new();

    let output = match kind {
        SampleKind::Partners => {
            serde_json::to_string_pretty(&registry.list_partners(&PartnerFilter::default())?)?
        }
        SampleKind::DataPartners => serde_json::to_string_pretty(
            &registry.list_data_partners(&DataPartnerFilter::default())?,
        )?,
        SampleKind::Plans => {
            serde_json::to_string_pretty(&registry.list_plans(&PlanFilter::default())?)?
        }
        SampleKind::AdvisorPlan => serde_json::to_string_pretty(&registry.advisor_plan(id)?)?,
    };

    tracing::debug!("Sample output: {} bytes", output.len());
    println!("{}", output);
    Ok(())
}
