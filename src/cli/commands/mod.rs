//! Subcommands module for rustible-route53 CLI

pub mod exec;
pub mod zone;

use crate::cli::output::OutputFormatter;
use crate::cli::Cli;
use rustible_route53::config::Config;
use rustible_route53::error::{Error, ErrorContext, Result};
use rustible_route53::modules::{ModuleContext, ModuleParams, ModuleRegistry};
use std::sync::Arc;

/// Common context shared between commands
pub struct CommandContext {
    /// Output formatter
    pub output: OutputFormatter,
    /// Module context handed to every module run
    module_context: ModuleContext,
    registry: Arc<ModuleRegistry>,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let format = cli.output.unwrap_or(config.output.format);
        let use_color = config.output.color && !cli.no_color;
        let output = OutputFormatter::new(format, config.output.pretty, use_color);

        let module_context = ModuleContext::new()
            .with_check_mode(cli.check_mode)
            .with_diff_mode(cli.diff_mode)
            .with_aws(cli.connection().or(config.connection()));

        Self {
            output,
            module_context,
            registry: Arc::new(ModuleRegistry::with_builtins()),
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Run a module and print its result; returns the exit code
    pub async fn run_module(&self, name: &str, params: ModuleParams) -> Result<i32> {
        let registry = Arc::clone(&self.registry);
        let context = self.module_context.clone();
        let module = name.to_string();

        // Modules block on their own calls; keep them off the async workers
        let result =
            tokio::task::spawn_blocking(move || registry.execute(&module, &params, &context))
                .await
                .context("Module task failed")?;

        match result {
            Ok(output) => {
                self.output.module_result(name, &output)?;
                Ok(0)
            }
            Err(err) => {
                let err = Error::from_module(name, err);
                tracing::debug!(module = name, error = %err, "Module failed");
                self.output.module_failure(name, &err)?;
                Ok(err.exit_code())
            }
        }
    }
}
