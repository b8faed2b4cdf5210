//! [`HostedZoneApi`] backed by the official AWS SDK for Rust.

use super::api::HostedZoneApi;
use super::error::{ZoneError, ZoneResult};
use super::types::{
    CreateZoneInput, CreatedZone, DelegationSetInfo, RemoteZone, VpcAssociation, ZonePage,
    ZoneSummary,
};
use crate::modules::cloud::aws::AwsConnectionConfig;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_route53::config::Region;
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::types::{DelegationSet, HostedZone, HostedZoneConfig, Vpc, VpcRegion};
use aws_sdk_route53::Client;

/// Route53 client used by the `aws_route53_zone` module
#[derive(Debug, Clone)]
pub struct Route53Api {
    client: Client,
}

impl Route53Api {
    /// Build a client from explicit connection settings.
    ///
    /// Fails with [`ZoneError::Configuration`] when no region can be
    /// resolved from the settings or the AWS default chain.
    pub async fn connect(config: &AwsConnectionConfig) -> ZoneResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        if sdk_config.region().is_none() {
            return Err(ZoneError::Configuration(
                "Either the region parameter or the AWS_REGION / AWS_DEFAULT_REGION \
                 environment variable or the AWS config file region must be set"
                    .to_string(),
            ));
        }

        tracing::debug!(
            region = ?sdk_config.region(),
            profile = ?config.profile,
            endpoint_url = ?config.endpoint_url,
            "Created Route53 client"
        );

        Ok(Self::from_client(Client::new(&sdk_config)))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HostedZoneApi for Route53Api {
    async fn list_hosted_zones(&self, marker: Option<String>) -> ZoneResult<ZonePage> {
        let resp = self
            .client
            .list_hosted_zones()
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| provider_error("ListHostedZones", e))?;

        let zones = resp
            .hosted_zones()
            .iter()
            .map(|zone| ZoneSummary {
                id: zone.id().to_string(),
                name: zone.name().to_string(),
                private_zone: zone.config().map(|c| c.private_zone()).unwrap_or(false),
            })
            .collect();

        let next_marker = if resp.is_truncated() {
            resp.next_marker().map(str::to_string)
        } else {
            None
        };

        Ok(ZonePage { zones, next_marker })
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> ZoneResult<RemoteZone> {
        let resp = self
            .client
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| provider_error("GetHostedZone", e))?;

        let zone = resp.hosted_zone().ok_or_else(|| {
            ZoneError::provider(
                "GetHostedZone",
                None,
                format!("Hosted zone {} was not returned", zone_id),
            )
        })?;

        let vpcs = resp.vpcs().iter().filter_map(vpc_association).collect();
        Ok(remote_zone(zone, resp.delegation_set(), vpcs))
    }

    async fn get_reusable_delegation_set(&self, id: &str) -> ZoneResult<DelegationSetInfo> {
        let resp = match self.client.get_reusable_delegation_set().id(id).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_delegation_set())
                    .unwrap_or(false);
                if missing {
                    return Err(ZoneError::DelegationSetNotFound(id.to_string()));
                }
                return Err(provider_error("GetReusableDelegationSet", e));
            }
        };

        let set = resp
            .delegation_set()
            .ok_or_else(|| ZoneError::DelegationSetNotFound(id.to_string()))?;

        Ok(DelegationSetInfo {
            id: set.id().unwrap_or(id).to_string(),
            name_servers: set.name_servers().to_vec(),
        })
    }

    async fn create_hosted_zone(&self, input: CreateZoneInput) -> ZoneResult<CreatedZone> {
        let mut req = self
            .client
            .create_hosted_zone()
            .name(&input.name)
            .caller_reference(&input.caller_reference);

        if let Some(comment) = &input.comment {
            req = req.hosted_zone_config(HostedZoneConfig::builder().comment(comment).build());
        }

        if let Some(vpc) = &input.vpc {
            req = req.vpc(
                Vpc::builder()
                    .vpc_id(&vpc.vpc_id)
                    .vpc_region(VpcRegion::from(vpc.vpc_region.as_str()))
                    .build(),
            );
        }

        if let Some(delegation_set_id) = &input.delegation_set_id {
            req = req.delegation_set_id(delegation_set_id);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| provider_error("CreateHostedZone", e))?;

        let zone = resp.hosted_zone().ok_or_else(|| {
            ZoneError::provider(
                "CreateHostedZone",
                None,
                format!("Hosted zone {} was not returned", input.name),
            )
        })?;

        let vpcs = resp.vpc().and_then(vpc_association).into_iter().collect();

        Ok(CreatedZone {
            zone: remote_zone(zone, resp.delegation_set(), vpcs),
            location: resp.location().to_string(),
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> ZoneResult<()> {
        self.client
            .delete_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| provider_error("DeleteHostedZone", e))?;
        Ok(())
    }
}

fn remote_zone(
    zone: &HostedZone,
    delegation_set: Option<&DelegationSet>,
    vpcs: Vec<VpcAssociation>,
) -> RemoteZone {
    RemoteZone {
        id: zone.id().to_string(),
        name: zone.name().to_string(),
        private_zone: zone.config().map(|c| c.private_zone()).unwrap_or(false),
        resource_record_set_count: zone.resource_record_set_count().unwrap_or(0),
        comment: zone
            .config()
            .and_then(|c| c.comment())
            .map(str::to_string),
        delegation_set_id: delegation_set.and_then(|d| d.id()).map(str::to_string),
        name_servers: delegation_set.map(|d| d.name_servers().to_vec()),
        vpcs,
    }
}

fn vpc_association(vpc: &Vpc) -> Option<VpcAssociation> {
    Some(VpcAssociation {
        vpc_id: vpc.vpc_id()?.to_string(),
        vpc_region: vpc
            .vpc_region()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
    })
}

/// Surface the service error code and message unmodified
fn provider_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ZoneError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let service = err.as_service_error();
    let code = service.and_then(|e| e.code()).map(str::to_string);
    let message = service
        .and_then(|e| e.message())
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    tracing::warn!(operation, code = ?code, "Route53 call failed: {}", message);
    ZoneError::provider(operation, code, message)
}
