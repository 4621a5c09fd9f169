//! Scenario descriptor parsing and catalog join
//!
//! The action/flag descriptor is a multi-document YAML file separated by
//! `---`; the category document maps composite keys of the form
//! `group.scope-target.action` to ordered category tags. The join looks up
//! each category entry's derived action code with a linear first-match
//! search over the parsed param sets.

use tracing::{info, warn};

use crate::error::{AppError, AppResult};

use super::model::{ActionSpec, ModelSpec, ParamSet, PluginSpec, ScenarioOriginal};
use super::source::{DescriptorSource, TOOL_NAME};

const DOCUMENT_SEPARATOR: &str = "---";

/// Join diagnostics: category entries without a matching param set are
/// dropped from the catalog, not raised as errors. The counts make the
/// drift observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub matched: usize,
    pub dropped: usize,
}

/// Builds the scenario catalog for the configured descriptor origins
#[derive(Debug, Clone)]
pub struct MeshScenarioParser {
    originals: Vec<ScenarioOriginal>,
    source: DescriptorSource,
}

impl MeshScenarioParser {
    pub fn new(originals: Vec<ScenarioOriginal>, source: DescriptorSource) -> Self {
        Self { originals, source }
    }

    /// Parse one catalog per configured (tool, version) pair
    pub async fn parse(&self) -> AppResult<Vec<PluginSpec>> {
        let mut specs = Vec::with_capacity(self.originals.len());
        for original in &self.originals {
            let (spec, stats) = self.parse_one(original).await?;
            info!(
                name = %original.name,
                version = %original.version,
                matched = stats.matched,
                dropped = stats.dropped,
                "Built scenario catalog"
            );
            specs.push(spec);
        }
        Ok(specs)
    }

    /// Parse a single origin, returning the catalog and its join stats
    pub async fn parse_one(
        &self,
        original: &ScenarioOriginal,
    ) -> AppResult<(PluginSpec, JoinStats)> {
        let descriptor_text = self.source.load_descriptor(original).await?;
        let category_text = self.source.load_categories(&original.version)?;

        let param_sets = parse_param_sets(&descriptor_text)?;
        let categories = parse_categories(&category_text)?;
        let (items, stats) = join(&param_sets, &categories);

        let spec = PluginSpec {
            kind: TOOL_NAME.to_string(),
            plugin_type: original.name.clone(),
            version: original.version.clone(),
            items,
        };
        Ok((spec, stats))
    }
}

/// Split the descriptor text on the document separator and parse each
/// non-blank segment into a [`ParamSet`]
pub fn parse_param_sets(text: &str) -> AppResult<Vec<ParamSet>> {
    text.split(DOCUMENT_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| serde_yaml::from_str::<ParamSet>(segment).map_err(AppError::from))
        .collect()
}

/// Parse the category document: composite key to ordered category tags,
/// preserving document order
pub fn parse_categories(text: &str) -> AppResult<Vec<(String, Vec<String>)>> {
    let mapping: serde_yaml::Mapping = serde_yaml::from_str(text)?;
    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key: String = serde_yaml::from_value(key)?;
        let tags: Vec<String> = serde_yaml::from_value(value)?;
        entries.push((key, tags));
    }
    Ok(entries)
}

/// Join category entries against param sets.
///
/// An entry whose derived action code matches no param set, or whose
/// composite key does not decompose, produces no item; it is counted and
/// logged rather than raised.
pub fn join(param_sets: &[ParamSet], categories: &[(String, Vec<String>)]) -> (Vec<ModelSpec>, JoinStats) {
    let mut items = Vec::new();
    let mut stats = JoinStats::default();

    for (composite_key, tags) in categories {
        let Some((scope, target, action)) = decompose_key(composite_key) else {
            warn!(key = %composite_key, "Skipping malformed category key");
            stats.dropped += 1;
            continue;
        };

        let simple_scene_code = format!("{}.{}.{}", TOOL_NAME, target, action);

        // First match wins; duplicate actions across documents are not
        // reconciled
        let Some(param_set) = param_sets
            .iter()
            .find(|ps| ps.action == simple_scene_code)
        else {
            warn!(
                key = %composite_key,
                action = %simple_scene_code,
                "No param set for category entry, dropping"
            );
            stats.dropped += 1;
            continue;
        };

        items.push(ModelSpec {
            scope: scope.to_string(),
            target: target.to_string(),
            actions: vec![ActionSpec {
                action: action.to_string(),
                flags: param_set.flags.clone(),
                categories: tags.clone(),
            }],
        });
        stats.matched += 1;
    }

    (items, stats)
}

/// Decompose `group.scope-target.action` into its three parts
fn decompose_key(composite_key: &str) -> Option<(&str, &str, &str)> {
    let mut parts = composite_key.splitn(3, '.');
    let _group = parts.next()?;
    let scope_target = parts.next()?;
    let action = parts.next().filter(|s| !s.is_empty())?;

    let (scope, target) = scope_target.split_once('-')?;
    if scope.is_empty() || target.is_empty() {
        return None;
    }
    Some((scope, target, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
action: chaosmesh.pod.pod-failure
flags:
- name: Namespaces
  desc: Target namespaces
  required: true
- name: Pods
  desc: Target pods
  required: true
---
action: chaosmesh.network.delay
flags:
- name: delay.latency
  desc: Added latency
  required: true
---
"#;

    const CATEGORIES: &str = r#"
chaosmesh.k8s-pod.pod-failure:
- kubernetes
- pod
chaosmesh.k8s-network.delay:
- kubernetes
- network
chaosmesh.k8s-dns.error:
- kubernetes
"#;

    #[test]
    fn test_parse_param_sets_splits_documents() {
        let sets = parse_param_sets(DESCRIPTOR).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].action, "chaosmesh.pod.pod-failure");
        assert_eq!(sets[0].flags.len(), 2);
        assert!(sets[0].flags[0].required);
        assert_eq!(sets[1].flags[0].name, "delay.latency");
    }

    #[test]
    fn test_parse_categories_preserves_order() {
        let categories = parse_categories(CATEGORIES).unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].0, "chaosmesh.k8s-pod.pod-failure");
        assert_eq!(categories[1].1, vec!["kubernetes", "network"]);
    }

    #[test]
    fn test_join_matches_and_drops() {
        let param_sets = parse_param_sets(DESCRIPTOR).unwrap();
        let categories = parse_categories(CATEGORIES).unwrap();

        let (items, stats) = join(&param_sets, &categories);

        // dns entry has no param set and is dropped without error
        assert_eq!(stats, JoinStats { matched: 2, dropped: 1 });
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].scope, "k8s");
        assert_eq!(items[0].target, "pod");
        assert_eq!(items[0].actions.len(), 1);
        assert_eq!(items[0].actions[0].action, "pod-failure");
        assert_eq!(items[0].actions[0].flags.len(), 2);
        assert_eq!(items[0].actions[0].categories, vec!["kubernetes", "pod"]);
    }

    #[test]
    fn test_join_first_match_wins() {
        let mut param_sets = parse_param_sets(DESCRIPTOR).unwrap();
        // Duplicate action with different flags
        param_sets.push(ParamSet {
            action: "chaosmesh.pod.pod-failure".to_string(),
            flags: vec![],
        });

        let categories = vec![(
            "chaosmesh.k8s-pod.pod-failure".to_string(),
            vec!["kubernetes".to_string()],
        )];

        let (items, _) = join(&param_sets, &categories);
        assert_eq!(items[0].actions[0].flags.len(), 2);
    }

    #[test]
    fn test_join_malformed_key_dropped() {
        let param_sets = parse_param_sets(DESCRIPTOR).unwrap();
        let categories = vec![
            ("nodots".to_string(), vec![]),
            ("chaosmesh.nodash.action".to_string(), vec![]),
        ];

        let (items, stats) = join(&param_sets, &categories);
        assert!(items.is_empty());
        assert_eq!(stats.dropped, 2);
    }
}
