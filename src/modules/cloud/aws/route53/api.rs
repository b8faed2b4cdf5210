//! The Route53 calls the reconciler depends on.

use super::error::ZoneResult;
use super::types::{CreateZoneInput, CreatedZone, DelegationSetInfo, RemoteZone, ZonePage};
use async_trait::async_trait;

/// Hosted zone operations of the Route53 API.
///
/// Zone and delegation set IDs are passed without their `/hostedzone/` and
/// `/delegationset/` prefixes. Implementations report a missing delegation
/// set as [`ZoneError::DelegationSetNotFound`](super::ZoneError::DelegationSetNotFound)
/// and every other failure as a provider error carrying the service code.
#[async_trait]
pub trait HostedZoneApi: Send + Sync {
    /// Fetch one page of hosted zones, starting after `marker`
    async fn list_hosted_zones(&self, marker: Option<String>) -> ZoneResult<ZonePage>;

    /// Fetch the full description of one zone, including its VPCs and
    /// delegation set
    async fn get_hosted_zone(&self, zone_id: &str) -> ZoneResult<RemoteZone>;

    /// Look up a reusable delegation set
    async fn get_reusable_delegation_set(&self, id: &str) -> ZoneResult<DelegationSetInfo>;

    /// Create a hosted zone
    async fn create_hosted_zone(&self, input: CreateZoneInput) -> ZoneResult<CreatedZone>;

    /// Delete a hosted zone
    async fn delete_hosted_zone(&self, zone_id: &str) -> ZoneResult<()>;
}
