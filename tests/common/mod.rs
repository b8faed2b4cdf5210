//! Shared test utilities for the rustible-route53 test suite.
//!
//! Provides [`FakeRoute53`], an in-memory [`HostedZoneApi`] that keeps zones
//! and delegation sets the way Route53 reports them (prefixed IDs, paged
//! listings) and records every call it receives.
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use rustible_route53::modules::cloud::aws::route53::{
    strip_delegation_set_id, strip_zone_id, CreateZoneInput, CreatedZone, DelegationSetInfo,
    HostedZoneApi, RemoteZone, VpcAssociation, ZoneError, ZonePage, ZoneResult, ZoneSummary,
};

// ============================================================================
// Call Log
// ============================================================================

/// One call received by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(Option<String>),
    Get(String),
    GetDelegationSet(String),
    Create(CreateZoneInput),
    Delete(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Create(_) | Call::Delete(_))
    }
}

// ============================================================================
// Fake Route53
// ============================================================================

#[derive(Default)]
struct FakeState {
    zones: Vec<RemoteZone>,
    delegation_sets: HashMap<String, Vec<String>>,
    calls: Vec<Call>,
    failures: HashMap<&'static str, ZoneError>,
    next_id: u32,
}

/// In-memory Route53 with paged listings and failure injection
pub struct FakeRoute53 {
    state: Mutex<FakeState>,
    page_size: usize,
}

impl Default for FakeRoute53 {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRoute53 {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            page_size: 100,
        }
    }

    /// Return at most `page_size` zones per `ListHostedZones` page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add a public zone with provider-assigned name servers; returns the bare ID
    pub fn add_public_zone(&self, name: &str) -> String {
        let id = self.allocate_id();
        self.add_zone(RemoteZone {
            id: format!("/hostedzone/{}", id),
            name: name.to_string(),
            private_zone: false,
            resource_record_set_count: 2,
            comment: None,
            delegation_set_id: None,
            name_servers: Some(default_name_servers()),
            vpcs: Vec::new(),
        });
        id
    }

    /// Add a private zone associated with one VPC; returns the bare ID
    pub fn add_private_zone(&self, name: &str, vpc_id: &str, vpc_region: &str) -> String {
        let id = self.allocate_id();
        self.add_zone(RemoteZone {
            id: format!("/hostedzone/{}", id),
            name: name.to_string(),
            private_zone: true,
            resource_record_set_count: 2,
            comment: None,
            delegation_set_id: None,
            name_servers: None,
            vpcs: vec![VpcAssociation::new(vpc_id, vpc_region)],
        });
        id
    }

    /// Add a zone exactly as given
    pub fn add_zone(&self, zone: RemoteZone) {
        self.state.lock().unwrap().zones.push(zone);
    }

    /// Register a reusable delegation set under its bare ID
    pub fn add_delegation_set(&self, id: &str, name_servers: &[&str]) {
        self.state.lock().unwrap().delegation_sets.insert(
            id.to_string(),
            name_servers.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Make every call to `operation` fail with `error`
    pub fn fail(&self, operation: &'static str, error: ZoneError) {
        self.state.lock().unwrap().failures.insert(operation, error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn list_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List(_)))
            .count()
    }

    pub fn created_inputs(&self) -> Vec<CreateZoneInput> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(input) => Some(input),
                _ => None,
            })
            .collect()
    }

    /// Zones currently stored with this name
    pub fn zones_named(&self, name: &str) -> Vec<RemoteZone> {
        self.state
            .lock()
            .unwrap()
            .zones
            .iter()
            .filter(|z| z.name == name)
            .cloned()
            .collect()
    }

    fn allocate_id(&self) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        format!("Z{:012}", state.next_id)
    }

    fn record(&self, operation: &'static str, call: Call) -> ZoneResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn default_name_servers() -> Vec<String> {
    vec![
        "ns-1536.awsdns-00.co.uk".to_string(),
        "ns-0.awsdns-00.com".to_string(),
        "ns-1024.awsdns-00.org".to_string(),
        "ns-512.awsdns-00.net".to_string(),
    ]
}

fn no_such_zone(operation: &'static str, id: &str) -> ZoneError {
    ZoneError::provider(
        operation,
        Some("NoSuchHostedZone".to_string()),
        format!("No hosted zone found with ID: {}", id),
    )
}

#[async_trait]
impl HostedZoneApi for FakeRoute53 {
    async fn list_hosted_zones(&self, marker: Option<String>) -> ZoneResult<ZonePage> {
        self.record("ListHostedZones", Call::List(marker.clone()))?;

        let state = self.state.lock().unwrap();
        let start: usize = marker.and_then(|m| m.parse().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(state.zones.len());

        let zones = state.zones[start.min(end)..end]
            .iter()
            .map(|z| ZoneSummary {
                id: z.id.clone(),
                name: z.name.clone(),
                private_zone: z.private_zone,
            })
            .collect();
        let next_marker = (end < state.zones.len()).then(|| end.to_string());

        Ok(ZonePage { zones, next_marker })
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> ZoneResult<RemoteZone> {
        self.record("GetHostedZone", Call::Get(zone_id.to_string()))?;

        let state = self.state.lock().unwrap();
        state
            .zones
            .iter()
            .find(|z| strip_zone_id(&z.id) == strip_zone_id(zone_id))
            .cloned()
            .ok_or_else(|| no_such_zone("GetHostedZone", zone_id))
    }

    async fn get_reusable_delegation_set(&self, id: &str) -> ZoneResult<DelegationSetInfo> {
        self.record(
            "GetReusableDelegationSet",
            Call::GetDelegationSet(id.to_string()),
        )?;

        let state = self.state.lock().unwrap();
        let bare = strip_delegation_set_id(id);
        state
            .delegation_sets
            .get(bare)
            .map(|name_servers| DelegationSetInfo {
                id: format!("/delegationset/{}", bare),
                name_servers: name_servers.clone(),
            })
            .ok_or_else(|| ZoneError::DelegationSetNotFound(id.to_string()))
    }

    async fn create_hosted_zone(&self, input: CreateZoneInput) -> ZoneResult<CreatedZone> {
        self.record("CreateHostedZone", Call::Create(input.clone()))?;

        let id = self.allocate_id();
        let mut state = self.state.lock().unwrap();

        let (delegation_set_id, name_servers) = match (&input.vpc, &input.delegation_set_id) {
            (Some(_), _) => (None, None),
            (None, Some(set)) => {
                let bare = strip_delegation_set_id(set).to_string();
                let servers = state
                    .delegation_sets
                    .get(&bare)
                    .cloned()
                    .unwrap_or_else(default_name_servers);
                (Some(format!("/delegationset/{}", bare)), Some(servers))
            }
            (None, None) => (None, Some(default_name_servers())),
        };

        let zone = RemoteZone {
            id: format!("/hostedzone/{}", id),
            name: input.name.clone(),
            private_zone: input.vpc.is_some(),
            resource_record_set_count: 2,
            comment: input.comment.clone(),
            delegation_set_id,
            name_servers,
            vpcs: input.vpc.iter().cloned().collect(),
        };
        state.zones.push(zone.clone());

        Ok(CreatedZone {
            zone,
            location: format!("https://route53.amazonaws.com/2013-04-01/hostedzone/{}", id),
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> ZoneResult<()> {
        self.record("DeleteHostedZone", Call::Delete(zone_id.to_string()))?;

        let mut state = self.state.lock().unwrap();
        let index = state
            .zones
            .iter()
            .position(|z| strip_zone_id(&z.id) == strip_zone_id(zone_id))
            .ok_or_else(|| no_such_zone("DeleteHostedZone", zone_id))?;
        state.zones.remove(index);
        Ok(())
    }
}
