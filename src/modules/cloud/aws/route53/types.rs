//! Request, provider and result types for hosted zone reconciliation.

use super::error::{ZoneError, ZoneResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path prefix Route53 puts in front of hosted zone IDs
pub const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

/// Path prefix Route53 puts in front of delegation set IDs
pub const DELEGATION_SET_PREFIX: &str = "/delegationset/";

/// Normalize a zone name to its lowercase, fully-qualified form.
///
/// Appends the trailing dot when it is missing. Applying it twice gives the
/// same string as applying it once.
pub fn normalize_zone_name(zone: &str) -> String {
    let mut name = zone.to_lowercase();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}

/// Strip the `/hostedzone/` prefix from a zone ID
pub fn strip_zone_id(id: &str) -> &str {
    id.strip_prefix(HOSTED_ZONE_PREFIX).unwrap_or(id)
}

/// Strip the `/delegationset/` prefix from a delegation set ID
pub fn strip_delegation_set_id(id: &str) -> &str {
    id.strip_prefix(DELEGATION_SET_PREFIX).unwrap_or(id)
}

/// Desired state of a hosted zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneState {
    /// Zone should exist
    #[default]
    Present,
    /// Zone should not exist
    Absent,
}

impl ZoneState {
    pub fn from_str(s: &str) -> ZoneResult<Self> {
        match s.to_lowercase().as_str() {
            "present" => Ok(ZoneState::Present),
            "absent" => Ok(ZoneState::Absent),
            _ => Err(ZoneError::validation(format!(
                "Invalid state '{}'. Valid states: present, absent",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneState::Present => "present",
            ZoneState::Absent => "absent",
        }
    }
}

impl fmt::Display for ZoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A VPC associated with a private hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcAssociation {
    pub vpc_id: String,
    pub vpc_region: String,
}

impl VpcAssociation {
    pub fn new(vpc_id: impl Into<String>, vpc_region: impl Into<String>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            vpc_region: vpc_region.into(),
        }
    }
}

/// A validated request to converge one hosted zone.
///
/// Built through [`ZoneRequest::builder`], which enforces that VPC ID and
/// region come as a pair and that private zones carry no delegation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRequest {
    zone_name: String,
    state: ZoneState,
    vpc: Option<VpcAssociation>,
    comment: Option<String>,
    delegation_set_id: Option<String>,
}

impl ZoneRequest {
    pub fn builder(zone: impl Into<String>) -> ZoneRequestBuilder {
        ZoneRequestBuilder::new(zone)
    }

    /// Normalized zone name (lowercase, trailing dot)
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub fn vpc(&self) -> Option<&VpcAssociation> {
        self.vpc.as_ref()
    }

    pub fn is_private(&self) -> bool {
        self.vpc.is_some()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Delegation set ID without the `/delegationset/` prefix
    pub fn delegation_set_id(&self) -> Option<&str> {
        self.delegation_set_id.as_deref()
    }

    /// Whether a remote zone with the right name has the requested visibility.
    ///
    /// Private requests match zones associated with the requested VPC; public
    /// requests match zones with no VPC associations at all.
    pub fn matches_scope(&self, zone: &RemoteZone) -> bool {
        match &self.vpc {
            Some(vpc) => zone.vpcs.iter().any(|v| v.vpc_id == vpc.vpc_id),
            None => zone.vpcs.is_empty(),
        }
    }
}

/// Builder for [`ZoneRequest`]
#[derive(Debug, Clone, Default)]
pub struct ZoneRequestBuilder {
    zone: String,
    state: ZoneState,
    vpc_id: Option<String>,
    vpc_region: Option<String>,
    comment: Option<String>,
    delegation_set: Option<String>,
}

impl ZoneRequestBuilder {
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            ..Self::default()
        }
    }

    pub fn state(mut self, state: ZoneState) -> Self {
        self.state = state;
        self
    }

    pub fn vpc_id(mut self, vpc_id: Option<String>) -> Self {
        self.vpc_id = vpc_id;
        self
    }

    pub fn vpc_region(mut self, vpc_region: Option<String>) -> Self {
        self.vpc_region = vpc_region;
        self
    }

    pub fn comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn delegation_set(mut self, delegation_set: Option<String>) -> Self {
        self.delegation_set = delegation_set;
        self
    }

    pub fn build(self) -> ZoneResult<ZoneRequest> {
        let zone = self.zone.trim();
        if zone.is_empty() || zone == "." {
            return Err(ZoneError::validation("zone must not be empty"));
        }

        let vpc = match (non_empty(self.vpc_id), non_empty(self.vpc_region)) {
            (Some(vpc_id), Some(vpc_region)) => Some(VpcAssociation { vpc_id, vpc_region }),
            (None, None) => None,
            _ => {
                return Err(ZoneError::validation(
                    "vpc_id and vpc_region must be specified together",
                ))
            }
        };

        let delegation_set_id =
            non_empty(self.delegation_set).map(|id| strip_delegation_set_id(&id).to_string());

        if delegation_set_id.is_some() && vpc.is_some() {
            return Err(ZoneError::validation(
                "Private zones cannot specify a delegation set",
            ));
        }

        Ok(ZoneRequest {
            zone_name: normalize_zone_name(zone),
            state: self.state,
            vpc,
            comment: non_empty(self.comment),
            delegation_set_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One entry of a `ListHostedZones` page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSummary {
    /// Zone ID as reported by the provider (may carry `/hostedzone/`)
    pub id: String,
    pub name: String,
    pub private_zone: bool,
}

/// One page of hosted zones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZonePage {
    pub zones: Vec<ZoneSummary>,
    /// Marker for the following page; `None` on the last page
    pub next_marker: Option<String>,
}

/// Full description of a hosted zone as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteZone {
    pub id: String,
    pub name: String,
    pub private_zone: bool,
    pub resource_record_set_count: i64,
    pub comment: Option<String>,
    pub delegation_set_id: Option<String>,
    pub name_servers: Option<Vec<String>>,
    pub vpcs: Vec<VpcAssociation>,
}

/// A reusable delegation set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationSetInfo {
    pub id: String,
    pub name_servers: Vec<String>,
}

/// Arguments of a `CreateHostedZone` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateZoneInput {
    pub name: String,
    pub caller_reference: String,
    pub comment: Option<String>,
    pub vpc: Option<VpcAssociation>,
    pub delegation_set_id: Option<String>,
}

/// Result of a `CreateHostedZone` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedZone {
    pub zone: RemoteZone,
    /// Provider URL of the new zone
    pub location: String,
}

/// A VPC as it appears in module output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcView {
    pub id: String,
    pub region: String,
}

/// Normalized description of a hosted zone returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneView {
    pub zone_id: String,
    pub name: String,
    pub private_zone: bool,
    pub resource_record_set_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_servers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpcs: Option<Vec<VpcView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ZoneView {
    pub fn from_remote(zone: &RemoteZone) -> Self {
        let vpcs = if zone.vpcs.is_empty() {
            None
        } else {
            Some(
                zone.vpcs
                    .iter()
                    .map(|v| VpcView {
                        id: v.vpc_id.clone(),
                        region: v.vpc_region.clone(),
                    })
                    .collect(),
            )
        };

        Self {
            zone_id: strip_zone_id(&zone.id).to_string(),
            name: zone.name.clone(),
            private_zone: zone.private_zone,
            resource_record_set_count: zone.resource_record_set_count,
            comment: zone.comment.clone(),
            name_servers: zone.name_servers.clone(),
            delegation_set: zone
                .delegation_set_id
                .as_deref()
                .map(|id| strip_delegation_set_id(id).to_string()),
            vpcs,
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// What the reconciler did (or would do in check mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneAction {
    /// Zone exists and matches the request
    Unchanged,
    /// Zone was created
    Created,
    /// Zone was deleted
    Deleted,
    /// Zone does not exist and should not
    Absent,
    /// Check mode: zone would be created
    WouldCreate,
    /// Check mode: zone would be deleted
    WouldDelete,
}

/// Outcome of a reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub changed: bool,
    pub action: ZoneAction,
    pub zone: Option<ZoneView>,
}

impl ReconcileResult {
    pub fn new(action: ZoneAction, zone: Option<ZoneView>) -> Self {
        let changed = matches!(
            action,
            ZoneAction::Created
                | ZoneAction::Deleted
                | ZoneAction::WouldCreate
                | ZoneAction::WouldDelete
        );
        Self {
            changed,
            action,
            zone,
        }
    }
}
