//! `exec` subcommand: run a module with Ansible-style arguments.
//!
//! Arguments come from a JSON or YAML mapping (file or stdin), an old-style
//! `key=value key2=value2` line, and `-a key=value` flags, in that order.

use super::CommandContext;
use clap::Parser;
use rustible_route53::error::{Error, Result};
use rustible_route53::modules::ModuleParams;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Arguments for the exec command
#[derive(Parser, Debug, Clone)]
pub struct ExecArgs {
    /// Module name (see `list-modules`)
    pub module: String,

    /// File holding module arguments, or `-` for stdin
    #[arg(long)]
    pub args: Option<PathBuf>,

    /// Extra module argument (key=value), may be repeated
    #[arg(short = 'a', long = "arg", action = clap::ArgAction::Append)]
    pub arg: Vec<String>,
}

impl ExecArgs {
    /// Execute the exec command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        if !ctx.registry().contains(&self.module) {
            return Err(Error::ModuleNotFound(self.module.clone()));
        }

        let params = self.load_params()?;
        tracing::debug!(
            module = %self.module,
            keys = ?params.keys().collect::<Vec<_>>(),
            "Loaded module arguments"
        );
        ctx.run_module(&self.module, params).await
    }

    fn load_params(&self) -> Result<ModuleParams> {
        let mut params = match &self.args {
            Some(path) => read_args_file(path)?,
            None => ModuleParams::new(),
        };

        for pair in &self.arg {
            let (key, value) = parse_key_value(pair).ok_or_else(|| Error::ModuleArgs {
                module: self.module.clone(),
                message: format!("Expected key=value, got '{}'", pair),
            })?;
            params.insert(key, value);
        }

        Ok(params)
    }
}

fn read_args_file(path: &Path) -> Result<ModuleParams> {
    let args_error = |message: String| Error::ArgsFile {
        path: path.to_path_buf(),
        message,
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| args_error(e.to_string()))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| args_error(e.to_string()))?
    };

    parse_args(&content).map_err(args_error)
}

/// Parse a module argument document.
///
/// Accepts a JSON object, a YAML mapping, or a single line of
/// whitespace-separated `key=value` pairs.
pub fn parse_args(content: &str) -> std::result::Result<ModuleParams, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(ModuleParams::new());
    }

    let value: serde_json::Value = if trimmed.starts_with('{') {
        serde_json::from_str(trimmed).map_err(|e| e.to_string())?
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| e.to_string())?
    };

    match value {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        serde_json::Value::String(line) if line.contains('=') => line
            .split_whitespace()
            .map(|pair| {
                parse_key_value(pair).ok_or_else(|| format!("Expected key=value, got '{}'", pair))
            })
            .collect(),
        _ => Err("module arguments must be a mapping".to_string()),
    }
}

/// Split `key=value`. The value stays a string; an empty value or `null`
/// unsets the key.
fn parse_key_value(pair: &str) -> Option<(String, serde_json::Value)> {
    let (key, raw) = pair.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = match raw {
        "" | "null" => serde_json::Value::Null,
        _ => serde_json::Value::String(raw.to_string()),
    };
    Some((key.to_string(), value))
}
