//! Tests for request-to-CRD translation
//!
//! Verifies the serialized envelopes the cluster would receive, covering
//! the selector fan-out, action presence, container transform, and
//! sanitization behavior.

use std::collections::HashMap;

use chaosmesh_invoker::invoker::{build_chaos_body, ChaosSpec};
use chaosmesh_invoker::{AppError, RequestCommand};

fn request(scene_code: &str, pairs: &[(&str, &str)]) -> RequestCommand {
    let arguments: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RequestCommand::new(scene_code, arguments)
}

#[test]
fn test_pod_chaos_envelope_json() {
    let req = request(
        "chaosmesh.k8s-pod.pod-failure",
        &[
            ("Namespaces", "ns1,ns2"),
            ("Pods", "p1,p2"),
            ("duration", "30s"),
        ],
    );

    let body = build_chaos_body(&req, "deadbeef", "default").unwrap();
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["apiVersion"], "chaos-mesh.org/v1alpha1");
    assert_eq!(json["kind"], "PodChaos");
    assert_eq!(json["metadata"]["name"], "deadbeef");
    assert_eq!(json["spec"]["action"], "pod-failure");
    assert_eq!(json["spec"]["mode"], "all");
    assert_eq!(json["spec"]["duration"], "30s");

    // Full pod list under every namespace, not a positional pairing
    let pods = &json["spec"]["selector"]["pods"];
    assert_eq!(pods["ns1"], serde_json::json!(["p1", "p2"]));
    assert_eq!(pods["ns2"], serde_json::json!(["p1", "p2"]));
}

#[test]
fn test_network_chaos_nested_delay() {
    let req = request(
        "chaosmesh.k8s-network.delay",
        &[
            ("Namespaces", "ns1"),
            ("Pods", "p1"),
            ("delay.latency", "100ms"),
            ("delay.jitter", "10ms"),
            ("direction", "to"),
        ],
    );

    let body = build_chaos_body(&req, "deadbeef", "default").unwrap();
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["kind"], "NetworkChaos");
    assert_eq!(json["spec"]["action"], "delay");
    assert_eq!(json["spec"]["delay"]["latency"], "100ms");
    assert_eq!(json["spec"]["delay"]["jitter"], "10ms");
    assert_eq!(json["spec"]["direction"], "to");
}

#[test]
fn test_stress_and_time_specs_have_no_action() {
    let req = request(
        "chaosmesh.k8s-stress.cpu",
        &[
            ("Namespaces", "ns1"),
            ("Pods", "p1"),
            ("stressors.cpu.workers", "4"),
            ("stressors.cpu.load", "80"),
        ],
    );
    let json = serde_json::to_value(build_chaos_body(&req, "n1", "default").unwrap()).unwrap();
    assert_eq!(json["kind"], "StressChaos");
    assert!(json["spec"].get("action").is_none());
    assert_eq!(json["spec"]["stressors"]["cpu"]["workers"], 4);
    assert_eq!(json["spec"]["stressors"]["cpu"]["load"], 80);

    let req = request(
        "chaosmesh.k8s-time.skew",
        &[
            ("Namespaces", "ns1"),
            ("Pods", "p1"),
            ("timeOffset", "-5m"),
        ],
    );
    let json = serde_json::to_value(build_chaos_body(&req, "n2", "default").unwrap()).unwrap();
    assert_eq!(json["kind"], "TimeChaos");
    assert!(json["spec"].get("action").is_none());
    assert_eq!(json["spec"]["timeOffset"], "-5m");
}

#[test]
fn test_container_transform_in_envelope() {
    let req = request(
        "chaosmesh.k8s-dns.error",
        &[
            ("Namespaces", "ns1"),
            ("Pods", "p1"),
            ("Containers", "app,sidecar"),
        ],
    );

    let json = serde_json::to_value(build_chaos_body(&req, "n1", "default").unwrap()).unwrap();
    assert_eq!(
        json["spec"]["containerNames"],
        serde_json::json!(["app", "sidecar"])
    );
}

#[test]
fn test_quote_sanitization_keeps_structure_valid() {
    let req = request(
        "chaosmesh.k8s-file.mistake",
        &[
            ("Namespaces", "ns1"),
            ("Pods", "p1"),
            ("mistake.filling", r#"random "bytes""#),
        ],
    );

    let body = build_chaos_body(&req, "n1", "default").unwrap();
    match &body.spec {
        ChaosSpec::Io(spec) => {
            // The embedded quotes are not recoverable, only rewritten
            assert_eq!(
                spec.mistake.as_ref().unwrap().filling.as_deref(),
                Some("random 'bytes'")
            );
        }
        other => panic!("expected io spec, got {:?}", other),
    }

    // The serialized envelope still parses
    let text = serde_json::to_string(&body).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
}

#[test]
fn test_unknown_discriminator_rejected_before_dispatch() {
    let req = request(
        "chaosmesh.k8s-gpu.burn",
        &[("Namespaces", "ns1"), ("Pods", "p1")],
    );
    let err = build_chaos_body(&req, "n1", "default").unwrap_err();
    assert!(matches!(err, AppError::UnknownFaultType(ref t) if t == "gpu"));
    assert!(err.is_validation());
}

#[test]
fn test_missing_selector_arguments_fail_translation() {
    let req = request("chaosmesh.k8s-pod.pod-kill", &[]);
    let err = build_chaos_body(&req, "n1", "default").unwrap_err();
    assert!(err.is_validation());
}
