//! `aws_route53_zone`: create, describe and delete Route53 hosted zones.
//!
//! ```yaml
//! - name: Public zone with a reusable delegation set
//!   aws_route53_zone:
//!     zone: example.com
//!     comment: managed by rustible
//!     delegation_set: N4FE26DK7WIZ83
//!
//! - name: Private zone
//!   aws_route53_zone:
//!     zone: internal.example.com
//!     vpc_id: vpc-0a1b2c3d
//!     vpc_region: us-east-1
//!
//! - name: Remove a zone
//!   aws_route53_zone:
//!     zone: old.example.com
//!     state: absent
//! ```

use super::connection::AwsConnectionConfig;
use super::route53::{
    HostedZoneApi, ReconcileResult, Route53Api, ZoneAction, ZoneReconciler, ZoneRequest,
    ZoneState,
};
use crate::modules::{
    Diff, Module, ModuleContext, ModuleError, ModuleOutput, ModuleParams, ModuleResult, ParamExt,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::RuntimeFlavor;

/// Module for managing Route53 hosted zones
#[derive(Default, Clone)]
pub struct Route53ZoneModule {
    api: Option<Arc<dyn HostedZoneApi>>,
}

impl std::fmt::Debug for Route53ZoneModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53ZoneModule")
            .field("injected_api", &self.api.is_some())
            .finish()
    }
}

impl Route53ZoneModule {
    /// Module that connects to Route53 with the AWS SDK on each run
    pub fn new() -> Self {
        Self::default()
    }

    /// Module bound to a specific provider implementation
    pub fn with_api(api: Arc<dyn HostedZoneApi>) -> Self {
        Self { api: Some(api) }
    }

    /// Parse and validate the zone request without touching the provider
    pub fn request_from_params(params: &ModuleParams) -> ModuleResult<ZoneRequest> {
        let zone = params.get_string_required("zone")?;
        let state = match params.get_string("state")? {
            Some(state) => ZoneState::from_str(&state)?,
            None => ZoneState::Present,
        };

        let request = ZoneRequest::builder(zone)
            .state(state)
            .vpc_id(params.get_string("vpc_id")?)
            .vpc_region(params.get_string("vpc_region")?)
            .comment(params.get_string("comment")?)
            .delegation_set(params.get_string("delegation_set")?)
            .build()?;
        Ok(request)
    }

    async fn execute_async(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let request = Self::request_from_params(params)?;

        let api: Arc<dyn HostedZoneApi> = match &self.api {
            Some(api) => Arc::clone(api),
            None => {
                let connection = AwsConnectionConfig::from_params(params)?.or(&context.aws);
                if connection.is_empty() {
                    tracing::debug!("No explicit AWS settings, using the SDK default chain");
                }
                Arc::new(Route53Api::connect(&connection).await?)
            }
        };

        let result = ZoneReconciler::new(api.as_ref())
            .with_check_mode(context.check_mode)
            .reconcile(&request)
            .await?;

        Self::build_output(&request, result, context.diff_mode)
    }

    fn build_output(
        request: &ZoneRequest,
        result: ReconcileResult,
        diff_mode: bool,
    ) -> ModuleResult<ModuleOutput> {
        let name = request.zone_name();
        let msg = match result.action {
            ZoneAction::Unchanged => format!("Hosted zone '{}' already exists", name),
            ZoneAction::Created => format!("Created hosted zone '{}'", name),
            ZoneAction::Deleted => format!("Deleted hosted zone '{}'", name),
            ZoneAction::Absent => format!("Hosted zone '{}' does not exist", name),
            ZoneAction::WouldCreate => format!("Would create hosted zone '{}'", name),
            ZoneAction::WouldDelete => format!("Would delete hosted zone '{}'", name),
        };

        let mut output = if result.changed {
            ModuleOutput::changed(msg)
        } else {
            ModuleOutput::ok(msg)
        };

        if let Some(zone) = &result.zone {
            output = output.with_data("result", serde_json::to_value(zone)?);
        }

        if diff_mode {
            let present = format!("present: {}", name);
            match result.action {
                ZoneAction::Created | ZoneAction::WouldCreate => {
                    output = output.with_diff(Diff::new("absent", present));
                }
                ZoneAction::Deleted | ZoneAction::WouldDelete => {
                    output = output.with_diff(Diff::new(present, "absent"));
                }
                ZoneAction::Unchanged | ZoneAction::Absent => {}
            }
        }

        Ok(output)
    }
}

impl Module for Route53ZoneModule {
    fn name(&self) -> &'static str {
        "aws_route53_zone"
    }

    fn description(&self) -> &'static str {
        "Create, describe and delete AWS Route53 hosted zones"
    }

    fn required_params(&self) -> &[&'static str] {
        &["zone"]
    }

    fn optional_params(&self) -> HashMap<&'static str, serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("state", serde_json::json!("present"));
        params.insert("vpc_id", serde_json::Value::Null);
        params.insert("vpc_region", serde_json::Value::Null);
        params.insert("comment", serde_json::json!(""));
        params.insert("delegation_set", serde_json::Value::Null);
        params.insert("region", serde_json::Value::Null);
        params.insert("profile", serde_json::Value::Null);
        params.insert("endpoint_url", serde_json::Value::Null);
        params
    }

    fn execute(
        &self,
        params: &ModuleParams,
        context: &ModuleContext,
    ) -> ModuleResult<ModuleOutput> {
        let params = params.clone();
        let context = context.clone();
        let module = self;

        match tokio::runtime::Handle::try_current() {
            // A current-thread runtime cannot drive a nested block_on from another
            // thread while its only worker is parked in this call
            Ok(handle) if handle.runtime_flavor() != RuntimeFlavor::CurrentThread => {
                std::thread::scope(|s| {
                    s.spawn(|| handle.block_on(module.execute_async(&params, &context)))
                        .join()
                        .unwrap_or_else(|_| Err(worker_panicked()))
                })
            }
            Ok(_) => std::thread::scope(|s| {
                s.spawn(|| block_on_fresh_runtime(module.execute_async(&params, &context)))
                    .join()
                    .unwrap_or_else(|_| Err(worker_panicked()))
            }),
            // Called outside any runtime (plain CLI or sync tests)
            Err(_) => block_on_fresh_runtime(module.execute_async(&params, &context)),
        }
    }

    fn diff(&self, params: &ModuleParams, context: &ModuleContext) -> ModuleResult<Option<Diff>> {
        let preview = context.clone().with_check_mode(true).with_diff_mode(true);
        Ok(self.execute(params, &preview)?.diff)
    }

    fn validate_params(&self, params: &ModuleParams) -> ModuleResult<()> {
        Self::request_from_params(params)?;
        AwsConnectionConfig::from_params(params)?;
        Ok(())
    }
}

fn block_on_fresh_runtime<F>(future: F) -> ModuleResult<ModuleOutput>
where
    F: std::future::Future<Output = ModuleResult<ModuleOutput>>,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(future)
}

fn worker_panicked() -> ModuleError {
    ModuleError::ExecutionFailed("Route53 worker thread panicked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cloud::aws::route53::{VpcView, ZoneView};

    fn params(pairs: &[(&str, serde_json::Value)]) -> ModuleParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_request_from_params_defaults() {
        let request = Route53ZoneModule::request_from_params(&params(&[(
            "zone",
            serde_json::json!("Example.com"),
        )]))
        .unwrap();

        assert_eq!(request.zone_name(), "example.com.");
        assert_eq!(request.state(), ZoneState::Present);
        assert!(!request.is_private());
    }

    #[test]
    fn test_request_from_params_treats_null_as_unset() {
        let request = Route53ZoneModule::request_from_params(&params(&[
            ("zone", serde_json::json!("example.com")),
            ("vpc_id", serde_json::Value::Null),
            ("vpc_region", serde_json::Value::Null),
            ("delegation_set", serde_json::Value::Null),
        ]))
        .unwrap();

        assert!(request.vpc().is_none());
        assert!(request.delegation_set_id().is_none());
    }

    #[test]
    fn test_validate_params_rejects_bad_input() {
        let module = Route53ZoneModule::new();

        let missing_zone = params(&[("state", serde_json::json!("present"))]);
        assert!(matches!(
            module.validate_params(&missing_zone),
            Err(ModuleError::MissingParameter(_))
        ));

        let bad_state = params(&[
            ("zone", serde_json::json!("example.com")),
            ("state", serde_json::json!("running")),
        ]);
        assert!(matches!(
            module.validate_params(&bad_state),
            Err(ModuleError::InvalidParameter(_))
        ));

        let private_with_set = params(&[
            ("zone", serde_json::json!("internal.example.com")),
            ("vpc_id", serde_json::json!("vpc-123")),
            ("vpc_region", serde_json::json!("us-east-1")),
            ("delegation_set", serde_json::json!("N123")),
        ]);
        assert!(matches!(
            module.validate_params(&private_with_set),
            Err(ModuleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_build_output_with_diff() {
        let request = ZoneRequest::builder("new.example.com").build().unwrap();
        let view = ZoneView {
            zone_id: "ZNEW".to_string(),
            name: "new.example.com.".to_string(),
            private_zone: true,
            resource_record_set_count: 2,
            comment: None,
            name_servers: None,
            delegation_set: None,
            vpcs: Some(vec![VpcView {
                id: "vpc-1".to_string(),
                region: "us-east-1".to_string(),
            }]),
            location: Some("https://route53.amazonaws.com/2013-04-01/hostedzone/ZNEW".to_string()),
        };
        let result = ReconcileResult::new(ZoneAction::Created, Some(view));

        let output = Route53ZoneModule::build_output(&request, result, true).unwrap();
        assert!(output.changed);
        assert_eq!(output.data["result"]["zone_id"], "ZNEW");
        assert_eq!(output.data["result"]["vpcs"][0]["id"], "vpc-1");

        let diff = output.diff.unwrap();
        assert_eq!(diff.before, "absent");
        assert_eq!(diff.after, "present: new.example.com.");
    }

    #[test]
    fn test_build_output_absent_has_no_result() {
        let request = ZoneRequest::builder("gone.example.com")
            .state(ZoneState::Absent)
            .build()
            .unwrap();
        let result = ReconcileResult::new(ZoneAction::Absent, None);

        let output = Route53ZoneModule::build_output(&request, result, true).unwrap();
        assert!(!output.changed);
        assert!(output.diff.is_none());
        assert!(!output.data.contains_key("result"));
    }
}
