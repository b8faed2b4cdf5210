//! Connection settings shared by the AWS modules.

use crate::modules::{ModuleParams, ModuleResult, ParamExt};
use serde::{Deserialize, Serialize};

/// Explicit AWS connection settings.
///
/// Values left unset fall through to the AWS SDK default chain
/// (`AWS_REGION`, `AWS_PROFILE`, `~/.aws/config`, ...). Nothing here is
/// process-global: each module invocation carries its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConnectionConfig {
    /// AWS region
    pub region: Option<String>,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Endpoint override (e.g. a local Route53 emulator)
    pub endpoint_url: Option<String>,
}

impl AwsConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Read connection parameters from module arguments.
    ///
    /// Accepts the Ansible spellings `aws_region`/`ec2_region`,
    /// `aws_profile` and `ec2_url` as aliases.
    pub fn from_params(params: &ModuleParams) -> ModuleResult<Self> {
        Ok(Self {
            region: params.get_string_alias(&["region", "aws_region", "ec2_region"])?,
            profile: params.get_string_alias(&["profile", "aws_profile"])?,
            endpoint_url: params.get_string_alias(&["endpoint_url", "ec2_url"])?,
        })
    }

    /// Fill unset values from `defaults`; values already set win
    pub fn or(self, defaults: &AwsConnectionConfig) -> Self {
        Self {
            region: self.region.or_else(|| defaults.region.clone()),
            profile: self.profile.or_else(|| defaults.profile.clone()),
            endpoint_url: self.endpoint_url.or_else(|| defaults.endpoint_url.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.profile.is_none() && self.endpoint_url.is_none()
    }
}
