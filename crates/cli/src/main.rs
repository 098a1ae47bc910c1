//! kubewaste
//!
//! Displays pods/containers according to how much of their requested
//! resources they currently use, based on a single metrics snapshot.

mod commands;
mod config;
mod kube_source;
mod metrics;
mod output;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::report;
use kube_source::KubeSource;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Displays pods/containers according to how much requested resources they currently waste
#[derive(Parser)]
#[command(name = "kubewaste")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Kubernetes config context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Kubernetes namespace to use (all namespaces if not specified)
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// Path to a kubeconfig file (uses the default lookup if not specified)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Log format for diagnostics written to stderr
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

/// Diagnostic log encoding
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool, log_format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;

    let context = cli.context.or(config.context);
    let namespace = cli.namespace.or(config.namespace);
    let format = cli.format.or(config.format).unwrap_or_default();

    let source = KubeSource::connect(cli.kubeconfig.as_deref(), context.as_deref()).await?;
    report::show_report(&source, namespace.as_deref(), format).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    if let Err(err) = run(cli).await {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
