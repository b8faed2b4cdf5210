//! AWS modules.
//!
//! ## Available Modules
//!
//! - [`Route53ZoneModule`](route53_zone::Route53ZoneModule): hosted zone lifecycle
//!
//! ## Authentication
//!
//! Credentials come from the standard AWS credential chain (environment,
//! `~/.aws/credentials`, instance or task roles). The region, profile and
//! endpoint can be set per invocation through module parameters, or as
//! defaults through [`AwsConnectionConfig`] in the
//! [`ModuleContext`](crate::modules::ModuleContext). Anything left unset
//! falls back to `AWS_REGION`/`AWS_DEFAULT_REGION` and `~/.aws/config`.

pub mod connection;
pub mod route53;
pub mod route53_zone;

pub use connection::AwsConnectionConfig;
pub use route53_zone::Route53ZoneModule;
