//! Tests for the scenario catalog builder
//!
//! Exercises the descriptor source and parser together against an
//! on-disk fixture pair, verifying the join completeness property.

use std::path::PathBuf;

use chaosmesh_invoker::scenario::{
    DescriptorSource, JoinStats, MeshScenarioParser, ScenarioOriginal,
};

const DESCRIPTOR: &str = r#"
action: chaosmesh.pod.pod-failure
flags:
- name: Namespaces
  desc: Target namespaces
  required: true
- name: Pods
  desc: Target pods
  required: true
- name: duration
  desc: Fault duration
  required: false
---
action: chaosmesh.network.delay
flags:
- name: delay.latency
  desc: Added latency
  required: true
---
action: chaosmesh.stress.cpu
flags:
- name: stressors.cpu.workers
  desc: Worker count
  required: false
"#;

const CATEGORIES: &str = r#"
chaosmesh.k8s-pod.pod-failure:
- kubernetes
- pod
chaosmesh.k8s-network.delay:
- kubernetes
- network
chaosmesh.k8s-stress.cpu:
- kubernetes
chaosmesh.k8s-time.skew:
- kubernetes
"#;

/// Lays out a descriptor/category fixture pair in a fresh temp directory
fn fixture_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("chaosmesh-invoker-tests")
        .join(format!("{}-{}", tag, std::process::id()));
    let tool_dir = dir.join("chaosmesh");
    std::fs::create_dir_all(tool_dir.join("2.14")).unwrap();
    std::fs::write(tool_dir.join("chaosmesh-k8s-2.14.yaml"), DESCRIPTOR).unwrap();
    std::fs::write(tool_dir.join("2.14").join("category.yaml"), CATEGORIES).unwrap();
    dir
}

fn original() -> ScenarioOriginal {
    ScenarioOriginal {
        name: "k8s".to_string(),
        version: "2.14".to_string(),
        url: None,
    }
}

#[test]
fn test_catalog_built_from_local_descriptors() {
    let dir = fixture_dir("local");
    let parser = MeshScenarioParser::new(vec![original()], DescriptorSource::new(&dir));

    let (spec, stats) = tokio_test::block_on(parser.parse_one(&original())).unwrap();

    assert_eq!(spec.kind, "chaosmesh");
    assert_eq!(spec.plugin_type, "k8s");
    assert_eq!(spec.version, "2.14");

    // Every matched entry yields exactly one item; the time entry has no
    // param set and is dropped without failing the build
    assert_eq!(stats, JoinStats { matched: 3, dropped: 1 });
    assert_eq!(spec.items.len(), 3);

    let pod_item = &spec.items[0];
    assert_eq!(pod_item.scope, "k8s");
    assert_eq!(pod_item.target, "pod");
    assert_eq!(pod_item.actions[0].action, "pod-failure");
    assert_eq!(pod_item.actions[0].flags.len(), 3);
    assert_eq!(pod_item.actions[0].categories, vec!["kubernetes", "pod"]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_catalog_yaml_round_trip() {
    let dir = fixture_dir("yaml");
    let parser = MeshScenarioParser::new(vec![original()], DescriptorSource::new(&dir));

    let specs = tokio_test::block_on(parser.parse()).unwrap();
    assert_eq!(specs.len(), 1);

    let dumped = serde_yaml::to_string(&specs[0]).unwrap();
    let reloaded: chaosmesh_invoker::scenario::PluginSpec =
        serde_yaml::from_str(&dumped).unwrap();
    assert_eq!(reloaded.items.len(), specs[0].items.len());
    assert_eq!(reloaded.plugin_type, "k8s");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_descriptor_without_url_fails() {
    let dir = std::env::temp_dir()
        .join("chaosmesh-invoker-tests")
        .join(format!("missing-{}", std::process::id()));
    let parser = MeshScenarioParser::new(vec![original()], DescriptorSource::new(&dir));

    // No local file and no fetch URL configured
    let result = tokio_test::block_on(parser.parse_one(&original()));
    assert!(result.is_err());
}
