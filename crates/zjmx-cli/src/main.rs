//! zabbix-jmx-get
//!
//! Fetches JMX values through a Zabbix Java gateway and prints them one per
//! line. Discovery keys (`jmx.discovery[beans,...]`) are printed as one
//! `domain type object name` line per bean.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zabbix_jmx_get::commands::{self, Options};
use zabbix_jmx_get::output::{print_error, OutputStyle};
use zjmx_client::config::{self, ConfigFile};

#[derive(Parser)]
#[command(name = "zabbix-jmx-get")]
#[command(author, version, about = "Tool for fetching data from Zabbix Java Gateway")]
#[command(disable_help_flag = true, arg_required_else_help = true)]
#[command(after_help = "Examples:
  zabbix-jmx-get -h 127.0.0.1 -p 10052 -H srv1.domain.com -P 9093 \\
    'jmx[\"kafka.server:type=BrokerTopicMetrics,name=BytesInPerSec\",OneMinuteRate]'
  Request kafka metrics

  zabbix-jmx-get -h 127.0.0.1 -p 10052 -H srv1.domain.com -P 9093 \\
    'jmx.discovery[beans,\"*:type=GarbageCollector,name=*\"]'
  Request discovery info")]
struct Cli {
    /// Java gateway host
    #[arg(short = 'h', long, value_name = "HOST")]
    host: Option<String>,

    /// Java gateway port
    #[arg(short = 'p', long, value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// JMX server host
    #[arg(short = 'H', long, value_name = "HOST")]
    server_host: Option<String>,

    /// JMX server port
    #[arg(short = 'P', long, value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    server_port: Option<u16>,

    /// JMX server user
    #[arg(long, value_name = "USERNAME")]
    user: Option<String>,

    /// JMX server password (sent only together with --user)
    #[arg(long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Connect timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    connect_timeout: Option<u64>,

    /// Read and write timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Show this help message
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// Item keys to fetch
    #[arg(required = true, value_name = "KEY")]
    keys: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity; logs go to stderr, values to stdout
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let style = OutputStyle::detect(cli.no_color);

    match run(cli, &style) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&style, &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, style: &OutputStyle) -> Result<()> {
    let file = load_config_file(cli.config.as_ref())?;

    let options = Options {
        host: cli.host,
        port: cli.port,
        server_host: cli.server_host,
        server_port: cli.server_port,
        user: cli.user,
        password: cli.password,
        connect_timeout: cli.connect_timeout,
        timeout: cli.timeout,
    };

    let exchange = commands::resolve(options, &file, cli.keys)?;
    commands::get_command(&exchange, style)
}

/// Load the explicit config file, or the default one if it exists
fn load_config_file(path: Option<&PathBuf>) -> Result<ConfigFile> {
    if let Some(path) = path {
        return config::load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let default_path = config::default_config_path();
    if !default_path.exists() {
        return Ok(ConfigFile::default());
    }

    Ok(config::load_config(&default_path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from {:?}: {}", default_path, e);
        ConfigFile::default()
    }))
}
