//! Route53 hosted zone reconciliation.
//!
//! [`ZoneReconciler`] observes the hosted zones visible through a
//! [`HostedZoneApi`] and converges a single [`ZoneRequest`] to `present` or
//! `absent`:
//!
//! | state   | zone found        | zone missing          |
//! |---------|-------------------|-----------------------|
//! | present | unchanged         | `CreateHostedZone`    |
//! | absent  | `DeleteHostedZone`| unchanged             |
//!
//! A zone is found when its name equals the normalized request name and its
//! visibility matches: private requests need the requested VPC among the
//! zone's associations, public requests need a zone without any.

pub mod api;
pub mod error;
pub mod listing;
pub mod reconcile;
pub mod sdk;
pub mod types;

pub use api::HostedZoneApi;
pub use error::{ZoneError, ZoneResult};
pub use listing::ZoneListing;
pub use reconcile::{caller_reference, ZoneReconciler};
pub use sdk::Route53Api;
pub use types::{
    normalize_zone_name, strip_delegation_set_id, strip_zone_id, CreateZoneInput, CreatedZone,
    DelegationSetInfo, ReconcileResult, RemoteZone, VpcAssociation, VpcView, ZoneAction,
    ZonePage, ZoneRequest, ZoneRequestBuilder, ZoneState, ZoneSummary, ZoneView,
};
