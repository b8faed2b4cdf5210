//! # rustible-route53 - Route53 hosted zone management
//!
//! Converges AWS Route53 hosted zones to a requested state the way an
//! Ansible module would: one zone per invocation, `present` or `absent`,
//! public or scoped to a VPC, with a structured result describing the zone.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 CLI (clap) / ModuleRegistry                   │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ ModuleParams + ModuleContext
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │          aws_route53_zone (sync Module, tokio bridge)         │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ ZoneRequest
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │      ZoneReconciler  ──  ZoneListing (lazy pages)             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ HostedZoneApi
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │              Route53Api (aws-sdk-route53)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use rustible_route53::prelude::*;
//!
//! let registry = ModuleRegistry::with_builtins();
//! let mut params = ModuleParams::new();
//! params.insert("zone".into(), serde_json::json!("example.com"));
//! params.insert("comment".into(), serde_json::json!("managed"));
//!
//! let context = ModuleContext::new()
//!     .with_aws(AwsConnectionConfig::new().with_region("us-east-1"));
//! let output = registry.execute("aws_route53_zone", &params, &context)?;
//! println!("changed={} zone={}", output.changed, output.data["result"]["zone_id"]);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod modules;

/// Convenient re-exports of commonly used types and traits.
pub mod prelude {
    pub use crate::config::{Config, LogFormat, OutputFormat};
    pub use crate::error::{Error, ErrorContext, Result};
    pub use crate::modules::cloud::aws::route53::{
        HostedZoneApi, ReconcileResult, Route53Api, ZoneAction, ZoneError, ZoneReconciler,
        ZoneRequest, ZoneState, ZoneView,
    };
    pub use crate::modules::cloud::aws::{AwsConnectionConfig, Route53ZoneModule};
    pub use crate::modules::{
        Diff, Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleRegistry,
        ModuleResult, ModuleStatus, ParamExt,
    };
}

/// Returns the current version of rustible-route53.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
