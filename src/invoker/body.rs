//! Chaos body builders
//!
//! Pure translation from a [`RequestCommand`] into a typed [`ChaosResource`].
//! No I/O happens here; every validation failure is raised before the
//! dispatcher touches the cluster.

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::scene;

use super::command::RequestCommand;
use super::crd::*;
use super::encode;

const NAMESPACES_KEY: &str = "Namespaces";
const PODS_KEY: &str = "Pods";

/// Builds the chaos resource for the request's fault kind.
///
/// `name` is the freshly generated resource name; the attack dispatcher
/// creates it once per invocation and never reuses it.
pub fn build_chaos_body(
    request: &RequestCommand,
    name: &str,
    namespace: &str,
) -> AppResult<ChaosResource> {
    let kind = FaultKind::from_scene_code(&request.scene_code)?;

    let mut arguments = request.arguments.clone();
    encode::containers_to_array(&mut arguments);
    arguments.insert("mode".to_string(), "all".to_string());
    if kind.has_action() {
        let action = scene::action(&request.scene_code)?;
        arguments.insert("action".to_string(), action.to_string());
    }

    let selector = build_selector(request)?;
    let encoded = encode::flatten(&arguments)?;

    let spec = match kind {
        FaultKind::Pod => {
            let mut spec: PodChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Pod(spec)
        }
        FaultKind::Network => {
            let mut spec: NetworkChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Network(spec)
        }
        FaultKind::Stress => {
            let mut spec: StressChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Stress(spec)
        }
        FaultKind::Io => {
            let mut spec: IoChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Io(spec)
        }
        FaultKind::Dns => {
            let mut spec: DnsChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Dns(spec)
        }
        FaultKind::Time => {
            let mut spec: TimeChaosSpec = serde_json::from_value(encoded)?;
            spec.selector = selector;
            ChaosSpec::Time(spec)
        }
    };

    Ok(ChaosResource::new(kind, name, namespace, spec))
}

/// Builds the pod selector from `Namespaces` and `Pods`.
///
/// Every namespace receives the entire pod list; the selection is not a
/// positional pairing.
fn build_selector(request: &RequestCommand) -> AppResult<ChaosPodSelector> {
    let namespaces = request
        .arguments
        .get(NAMESPACES_KEY)
        .ok_or_else(|| AppError::missing_argument(NAMESPACES_KEY))?;
    let pods = request
        .arguments
        .get(PODS_KEY)
        .ok_or_else(|| AppError::missing_argument(PODS_KEY))?;

    let pod_list: Vec<String> = pods.split(',').map(str::to_string).collect();
    let mut selector = BTreeMap::new();
    for namespace in namespaces.split(',') {
        selector.insert(namespace.to_string(), pod_list.clone());
    }

    Ok(ChaosPodSelector { pods: selector })
}
