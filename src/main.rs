//! rustible-route53 - Route53 hosted zone management
//!
//! This is the main entry point for the rustible-route53 CLI.

mod cli;

use anyhow::Result;
use cli::commands::CommandContext;
use cli::output::OutputFormatter;
use cli::{Cli, Commands};
use rustible_route53::config::{Config, LogFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so it can pick the log format
    let config = Config::load(cli.config.as_ref());

    let log_format = cli.log_format.unwrap_or_else(|| {
        config
            .as_ref()
            .map(|c| c.logging.format)
            .unwrap_or_default()
    });
    let log_level = config.as_ref().ok().and_then(|c| c.logging.level.clone());
    init_logging(cli.verbosity(), log_level.as_deref(), log_format);

    if cli.verbosity() >= 2 {
        eprintln!("rustible-route53 v{} by {}", VERSION, AUTHORS);
    }

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            let output = OutputFormatter::new(cli.output.unwrap_or_default(), true, !cli.no_color);
            output.error(&err);
            std::process::exit(err.exit_code());
        }
    };

    let ctx = CommandContext::new(&cli, &config);

    let result = match &cli.command {
        Commands::Zone(args) => args.execute(&ctx).await,
        Commands::Exec(args) => args.execute(&ctx).await,
        Commands::ListModules => list_modules(&ctx),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            ctx.output.error(&err);
            err.exit_code()
        }
    };

    std::process::exit(exit_code);
}

/// Initialize logging on stderr.
///
/// `RUST_LOG` wins, then `-v` (warn, info, debug, trace), then the level
/// from the config file.
fn init_logging(verbosity: u8, config_level: Option<&str>, format: LogFormat) {
    let filter = match verbosity {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(verbosity >= 3)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Print every registered module with its description
fn list_modules(ctx: &CommandContext) -> rustible_route53::error::Result<i32> {
    let registry = ctx.registry();
    let rows: Vec<(String, String)> = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|module| (module.name().to_string(), module.description().to_string()))
        .collect();

    ctx.output.table(&rows)?;
    Ok(0)
}
