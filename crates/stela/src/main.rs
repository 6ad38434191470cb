//! Stela DNS Responder
//!
//! An authoritative UDP responder that answers queries from a fixed
//! record set defined in its configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use stela_config::{Config, LogFormat};
use stela_server::{UdpServer, UdpSettings};
use stela_store::RecordStore;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stela DNS Responder - authoritative answers from a fixed record set
#[derive(Parser, Debug)]
#[command(name = "stela")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the responder (default)
    Run,

    /// Validate configuration file
    Validate {
        /// Show the records that would be served
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

/// Find the configuration file in standard locations
fn find_config_file(explicit_path: Option<PathBuf>) -> Option<PathBuf> {
    // An explicit path wins, even if it does not exist (the load will
    // report the error)
    if let Some(path) = explicit_path {
        return Some(path);
    }

    let search_paths = [
        PathBuf::from("./stela.yaml"),
        PathBuf::from("./stela.yml"),
        PathBuf::from("./config.yaml"),
        PathBuf::from("/etc/stela/config.yaml"),
        PathBuf::from("/etc/stela/stela.yaml"),
        dirs::config_dir()
            .map(|p| p.join("stela/config.yaml"))
            .unwrap_or_default(),
    ];

    search_paths.into_iter().find(|path| path.exists())
}

/// Parse log level from string
fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging/tracing subsystem
fn init_logging(config: &Config, cli_level: Option<&str>, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if let Some(lvl) = cli_level {
        parse_log_level(lvl)
    } else {
        parse_log_level(&config.logging.level)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match config.logging.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .init();
        }
    }
}

/// Print the startup banner
fn print_banner(config: &Config, quiet: bool) {
    if quiet {
        return;
    }

    let version = env!("CARGO_PKG_VERSION");

    println!();
    println!(
        "  {} {}",
        style("Stela DNS Responder").cyan().bold(),
        style(format!("v{version}")).dim()
    );
    println!(
        "  {}",
        style("Authoritative answers from a fixed record set").dim()
    );
    println!();

    let listeners: Vec<String> = config
        .server
        .listen
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("  {} {}", style("Listen:").green(), listeners.join(", "));
    println!(
        "  {} {} records",
        style("Serving:").green(),
        config.records.len()
    );
    println!();
}

/// Build the record store from configuration
fn build_store(config: &Config) -> Arc<RecordStore> {
    let store = RecordStore::new();
    for entry in &config.records {
        store.add(&entry.name, entry.rtype.clone(), &entry.value);
    }

    if store.is_empty() {
        warn!("No records configured, every query will be answered with NXDOMAIN");
    }

    info!(
        records = store.record_count(),
        names = store.owner_count(),
        "Record store loaded"
    );

    Arc::new(store)
}

/// Run the DNS responder
async fn run_server(config: Config, quiet: bool) -> Result<()> {
    print_banner(&config, quiet);

    let store = build_store(&config);

    let settings = UdpSettings {
        reuse_port: config.server.reuse_port,
        recv_buffer: config.server.recv_buffer_size,
        send_buffer: config.server.send_buffer_size,
    };

    // Create shutdown channel
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    // Bind all listeners before starting any of them
    let mut servers = Vec::new();
    for addr in &config.server.listen {
        let server = UdpServer::bind(*addr, store.clone(), &settings)
            .await
            .with_context(|| format!("Failed to bind UDP listener on {addr}"))?;
        servers.push(server);
    }

    // Spawn signal handlers
    let shutdown_signal = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
            .expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
            }
        }

        let _ = shutdown_signal.send(());
    });

    info!("DNS server running");

    let mut tasks = Vec::new();
    for server in servers {
        let shutdown_rx = shutdown_tx.subscribe();
        tasks.push(tokio::spawn(async move { server.run(shutdown_rx).await }));
    }

    for task in tasks {
        if let Err(e) = task.await? {
            error!(error = %e, "Server error");
            return Err(e.into());
        }
    }

    info!("DNS server stopped");
    Ok(())
}

/// Validate configuration file
fn validate_config(path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let config_path = find_config_file(path).context("No configuration file found")?;

    println!("Validating configuration: {}", config_path.display());

    let config = Config::from_file(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            config_path.display()
        )
    })?;

    if verbose {
        println!("\n{}", style("Records to serve:").green().bold());
        for record in &config.records {
            println!("  {} {} {}", record.name, record.rtype, record.value);
        }
        println!();
        println!("  Listeners: {}", config.server.listen.len());
        println!("  Log level: {}", config.logging.level);
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", style("Configuration is valid!").green().bold());
    Ok(())
}

/// Print version information
fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle version command early (before config loading)
    if let Some(Commands::Version) = &cli.command {
        print_version();
        return Ok(());
    }

    // Handle validate command
    if let Some(Commands::Validate { verbose }) = &cli.command {
        return validate_config(cli.config, *verbose);
    }

    // Load configuration
    let config_path = find_config_file(cli.config.clone());
    let config = if let Some(path) = config_path {
        Config::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?
    } else {
        // Serve the built-in records
        if !cli.quiet {
            eprintln!(
                "{}",
                style("No configuration file found, serving built-in records").yellow()
            );
        }
        Config::default()
    };

    // Validate configuration
    config.validate().context("Invalid configuration")?;

    // Initialize logging
    init_logging(&config, cli.log_level.as_deref(), cli.quiet);

    // Run the server (default command)
    match cli.command {
        Some(Commands::Run) | None => {
            run_server(config, cli.quiet).await?;
        }
        _ => unreachable!(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("WARNING"), Level::WARN);
        assert_eq!(parse_log_level("error"), Level::ERROR);

        // Unknown levels fall back to info
        assert_eq!(parse_log_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = Cli::try_parse_from(["stela"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(!cli.quiet);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_global_args() {
        let cli =
            Cli::try_parse_from(["stela", "-c", "/etc/stela/config.yaml", "-l", "debug", "-q"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/stela/config.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.quiet);

        // Globals are accepted after a subcommand too
        let cli = Cli::try_parse_from(["stela", "run", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_subcommands() {
        let cli = Cli::try_parse_from(["stela", "validate", "--verbose"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Validate { verbose: true })
        ));

        let cli = Cli::try_parse_from(["stela", "version"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Version)));
    }
}
