//! Output formatting module for rustible-route53
//!
//! Structured formats (json, yaml) go to stdout so the result can be piped;
//! the human format adds color and sends failures to stderr.

use colored::Colorize;
use rustible_route53::config::OutputFormat;
use rustible_route53::error::{Error, Result};
use rustible_route53::modules::{ModuleOutput, ModuleStatus};

/// Output formatter for different output modes
pub struct OutputFormatter {
    format: OutputFormat,
    /// Pretty-print JSON
    pretty: bool,
    /// Use colored output
    use_color: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(format: OutputFormat, pretty: bool, use_color: bool) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            format,
            pretty,
            use_color,
        }
    }

    /// Print the result of a successful module run
    pub fn module_result(&self, module: &str, output: &ModuleOutput) -> Result<()> {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => {
                println!("{}", self.render(output)?);
            }
            OutputFormat::Human => {
                let status = self.status_label(output.status);
                println!("{}: [{}] => {}", status, self.bold(module), output.msg);

                let mut keys: Vec<&String> = output.data.keys().collect();
                keys.sort();
                for key in keys {
                    let value = serde_yaml::to_string(&output.data[key])?;
                    println!("  {}:", self.dim(key));
                    for line in value.lines() {
                        println!("    {}", line);
                    }
                }

                if let Some(diff) = &output.diff {
                    self.diff(&diff.before, &diff.after);
                }
            }
        }
        Ok(())
    }

    /// Print a failed module run
    pub fn module_failure(&self, module: &str, err: &Error) -> Result<()> {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => {
                println!("{}", self.render(&Self::failure_output(err))?);
            }
            OutputFormat::Human => {
                eprintln!(
                    "{}: [{}] => {}",
                    self.status_label(ModuleStatus::Failed),
                    self.bold(module),
                    Self::failure_message(err)
                );
            }
        }
        Ok(())
    }

    /// Print an error that happened outside any module run
    pub fn error(&self, err: &Error) {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => {
                match self.render(&Self::failure_output(err)) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(_) => eprintln!("ERROR: {}", err),
                }
            }
            OutputFormat::Human if self.use_color => {
                eprintln!("{} {}", "ERROR:".red().bold(), err);
            }
            OutputFormat::Human => eprintln!("ERROR: {}", err),
        }
    }

    /// Failure result; the provider error code, if any, sits next to `msg`
    pub fn failure_output(err: &Error) -> ModuleOutput {
        let output =
            ModuleOutput::failed(err.user_message()).with_data("failed", serde_json::json!(true));
        match err.code() {
            Some(code) => output.with_data("code", serde_json::json!(code)),
            None => output,
        }
    }

    fn failure_message(err: &Error) -> String {
        match err.code() {
            Some(code) => format!("{} ({})", err.user_message(), code),
            None => err.user_message(),
        }
    }

    /// Print a two-column listing
    pub fn table(&self, rows: &[(String, String)]) -> Result<()> {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => {
                let map: serde_json::Map<String, serde_json::Value> = rows
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect();
                println!("{}", self.render(&map)?);
            }
            OutputFormat::Human => {
                let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                for (name, description) in rows {
                    println!("{:<width$}  {}", self.bold(name), description, width = width);
                }
            }
        }
        Ok(())
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
            _ if self.pretty => serde_json::to_string_pretty(value)?,
            _ => serde_json::to_string(value)?,
        };
        Ok(rendered)
    }

    fn diff(&self, before: &str, after: &str) {
        for line in before.lines() {
            if self.use_color {
                println!("{}", format!("- {}", line).red());
            } else {
                println!("- {}", line);
            }
        }
        for line in after.lines() {
            if self.use_color {
                println!("{}", format!("+ {}", line).green());
            } else {
                println!("+ {}", line);
            }
        }
    }

    fn status_label(&self, status: ModuleStatus) -> String {
        if !self.use_color {
            return status.to_string();
        }
        match status {
            ModuleStatus::Ok => "ok".green().to_string(),
            ModuleStatus::Changed => "changed".yellow().to_string(),
            ModuleStatus::Failed => "failed".red().bold().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bright_white().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }
}
