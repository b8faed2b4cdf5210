//! CLI module for rustible-route53
//!
//! Argument parsing and subcommand dispatch. Global flags override the
//! config file; module parameters override both.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use rustible_route53::config::{LogFormat, OutputFormat};
use rustible_route53::modules::cloud::aws::AwsConnectionConfig;
use std::path::PathBuf;

/// Manage AWS Route53 hosted zones the way an Ansible module does
#[derive(Parser, Debug, Clone)]
#[command(name = "rustible-route53")]
#[command(author = "Rustible Contributors")]
#[command(version)]
#[command(about = "Converge AWS Route53 hosted zones", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run in check mode (only read calls are made)
    #[arg(long = "check", global = true)]
    pub check_mode: bool,

    /// Include a before/after diff in the result
    #[arg(long = "diff", global = true)]
    pub diff_mode: bool,

    /// Result format (defaults to the config file, then json)
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// AWS region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// AWS shared config profile
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Route53 endpoint override
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Converge one hosted zone
    Zone(commands::zone::ZoneArgs),

    /// Run a module with Ansible-style arguments
    Exec(commands::exec::ExecArgs),

    /// List available modules
    #[command(name = "list-modules")]
    ListModules,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }

    /// Connection values given as flags
    pub fn connection(&self) -> AwsConnectionConfig {
        AwsConnectionConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}
