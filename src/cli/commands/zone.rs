//! `zone` subcommand: converge one hosted zone from flags.

use super::CommandContext;
use clap::Parser;
use rustible_route53::error::Result;
use rustible_route53::modules::ModuleParams;

const MODULE: &str = "aws_route53_zone";

/// Arguments for the zone command
#[derive(Parser, Debug, Clone)]
pub struct ZoneArgs {
    /// Zone name (a trailing dot is added when missing)
    #[arg(long)]
    pub zone: String,

    /// Desired state
    #[arg(long, default_value = "present", value_parser = ["present", "absent"])]
    pub state: String,

    /// VPC to scope a private zone to (requires --vpc-region)
    #[arg(long)]
    pub vpc_id: Option<String>,

    /// Region of the VPC (requires --vpc-id)
    #[arg(long)]
    pub vpc_region: Option<String>,

    /// Zone comment, applied on creation
    #[arg(long)]
    pub comment: Option<String>,

    /// Reusable delegation set ID for a new public zone
    #[arg(long)]
    pub delegation_set: Option<String>,
}

impl ZoneArgs {
    /// Module parameters equivalent to these flags
    pub fn to_params(&self) -> ModuleParams {
        let mut params = ModuleParams::new();
        params.insert("zone".to_string(), serde_json::json!(self.zone));
        params.insert("state".to_string(), serde_json::json!(self.state));

        let optional = [
            ("vpc_id", &self.vpc_id),
            ("vpc_region", &self.vpc_region),
            ("comment", &self.comment),
            ("delegation_set", &self.delegation_set),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.to_string(), serde_json::json!(value));
            }
        }
        params
    }

    /// Execute the zone command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<i32> {
        ctx.run_module(MODULE, self.to_params()).await
    }
}
