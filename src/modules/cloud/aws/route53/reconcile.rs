//! Converge one hosted zone to its requested state.

use super::api::HostedZoneApi;
use super::error::{ZoneError, ZoneResult};
use super::listing::ZoneListing;
use super::types::{
    strip_delegation_set_id, strip_zone_id, CreateZoneInput, DelegationSetInfo, ReconcileResult,
    RemoteZone, ZoneAction, ZoneRequest, ZoneState, ZoneView,
};
use chrono::Utc;
use futures::TryStreamExt;
use rand::Rng;

/// Build a fresh `CallerReference` for `CreateHostedZone`.
///
/// Unique per attempt: a UTC timestamp plus a six digit random suffix.
pub fn caller_reference() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    format!(
        "rustible-route53_zone-{}-{}",
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f"),
        suffix
    )
}

/// Reconciles hosted zones against a [`HostedZoneApi`].
///
/// In check mode only read calls are issued and the result reports what
/// would have changed.
pub struct ZoneReconciler<'a> {
    api: &'a dyn HostedZoneApi,
    check_mode: bool,
}

impl<'a> ZoneReconciler<'a> {
    pub fn new(api: &'a dyn HostedZoneApi) -> Self {
        Self {
            api,
            check_mode: false,
        }
    }

    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub async fn reconcile(&self, request: &ZoneRequest) -> ZoneResult<ReconcileResult> {
        let existing = self.find_zone(request).await?;

        // Resolved up front so a bad ID aborts before anything is mutated.
        if let Some(id) = request.delegation_set_id() {
            self.resolve_delegation_set(id).await?;
        }

        match (request.state(), existing) {
            (ZoneState::Present, Some(zone)) => {
                if let Some(wanted) = request.delegation_set_id() {
                    let current = zone.delegation_set_id.as_deref().map(strip_delegation_set_id);
                    if current != Some(wanted) {
                        return Err(ZoneError::validation(
                            "Cannot change the delegation set for an existing zone",
                        ));
                    }
                }
                tracing::debug!(zone = %zone.name, id = %zone.id, "Hosted zone already present");
                Ok(ReconcileResult::new(
                    ZoneAction::Unchanged,
                    Some(ZoneView::from_remote(&zone)),
                ))
            }
            (ZoneState::Present, None) => {
                if self.check_mode {
                    tracing::info!(zone = %request.zone_name(), "Would create hosted zone");
                    return Ok(ReconcileResult::new(ZoneAction::WouldCreate, None));
                }
                self.create(request).await
            }
            (ZoneState::Absent, Some(zone)) => {
                let zone_id = strip_zone_id(&zone.id);
                if self.check_mode {
                    tracing::info!(zone = %zone.name, id = %zone_id, "Would delete hosted zone");
                    return Ok(ReconcileResult::new(ZoneAction::WouldDelete, None));
                }
                tracing::info!(zone = %zone.name, id = %zone_id, "Deleting hosted zone");
                self.api.delete_hosted_zone(zone_id).await?;
                Ok(ReconcileResult::new(ZoneAction::Deleted, None))
            }
            (ZoneState::Absent, None) => {
                tracing::debug!(zone = %request.zone_name(), "Hosted zone already absent");
                Ok(ReconcileResult::new(ZoneAction::Absent, None))
            }
        }
    }

    /// First zone in provider order with the requested name and visibility.
    ///
    /// A same-name zone of the other visibility is skipped, not matched.
    pub async fn find_zone(&self, request: &ZoneRequest) -> ZoneResult<Option<RemoteZone>> {
        let listing = ZoneListing::new(self.api);
        let mut zones = std::pin::pin!(listing.zones());

        while let Some(summary) = zones.try_next().await? {
            if summary.name != request.zone_name() {
                continue;
            }

            let zone = self.api.get_hosted_zone(strip_zone_id(&summary.id)).await?;
            if request.matches_scope(&zone) {
                tracing::debug!(zone = %zone.name, id = %zone.id, "Matched hosted zone");
                return Ok(Some(zone));
            }
            tracing::debug!(
                zone = %zone.name,
                id = %zone.id,
                "Skipping hosted zone with a different visibility"
            );
        }

        Ok(None)
    }

    async fn resolve_delegation_set(&self, id: &str) -> ZoneResult<DelegationSetInfo> {
        let set = self.api.get_reusable_delegation_set(id).await?;
        tracing::debug!(id = %set.id, name_servers = ?set.name_servers, "Resolved delegation set");
        Ok(set)
    }

    async fn create(&self, request: &ZoneRequest) -> ZoneResult<ReconcileResult> {
        let input = CreateZoneInput {
            name: request.zone_name().to_string(),
            caller_reference: caller_reference(),
            comment: request.comment().map(str::to_string),
            vpc: request.vpc().cloned(),
            delegation_set_id: request.delegation_set_id().map(str::to_string),
        };

        tracing::info!(
            zone = %input.name,
            private = request.is_private(),
            caller_reference = %input.caller_reference,
            "Creating hosted zone"
        );
        let created = self.api.create_hosted_zone(input).await?;

        let view = ZoneView::from_remote(&created.zone).with_location(created.location);
        Ok(ReconcileResult::new(ZoneAction::Created, Some(view)))
    }
}
