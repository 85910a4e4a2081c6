use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ricrob_task::args::Args;
use ricrob_task::config::Config;
use ricrob_task::params::{FlagArgs, FlagParams};

#[derive(Parser)]
#[command(
    name = "ricrob-task",
    version,
    about = "Validate robot puzzle tasks from flags or URLs and serve them over HTTP",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Configuration file (TOML); defaults come from RICROB_* variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Board symbol layout file (TOML)
    #[arg(long, global = true)]
    layout: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate task flags and print the resulting arguments
    Check {
        #[command(flatten)]
        flags: FlagArgs,
    },

    /// Validate the query parameters of a task URL
    Url {
        /// Task URL, e.g. http://host/solve?ttl=A1F&ry=0,0
        url: String,
    },

    /// Serve the task validation API
    Serve {
        /// Override the bind address
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(layout) = cli.layout {
        config.board.layout_path = Some(layout);
    }
    config.validate()?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    let layout = config.load_layout().context("Failed to load board layout")?;

    match cli.command {
        Commands::Check { flags } => {
            tracing::info!("Validating task flags");
            let args = Args::from_params(&FlagParams::from_process_env(flags)?, &layout)?;
            print_args(&args)?;
        }

        Commands::Url { url } => {
            tracing::info!(url = %url, "Validating task URL");
            let url = url::Url::parse(&url).with_context(|| format!("Invalid URL: {url}"))?;
            let args = Args::from_url(&url, &layout)?;
            print_args(&args)?;
        }

        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            ricrob_task::server::serve(&config.server, layout).await?;
        }
    }

    Ok(())
}

fn print_args(args: &Args) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(args)?);
    println!("{}", args.cmd_args().join(" "));
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("ricrob_task=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("ricrob_task={level},warn"))
    };

    // Logs go to stderr; stdout carries the validated arguments
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
