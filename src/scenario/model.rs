//! Catalog entity models
//!
//! Built once per (tool, version) pair at load time, immutable afterwards.

use serde::{Deserialize, Serialize};

/// One descriptor document: an action plus its ordered flag list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSet {
    pub action: String,
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
}

/// A single fault parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagSpec {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub required: bool,
}

/// One action joined with its flags and category tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSpec {
    pub action: String,
    pub flags: Vec<FlagSpec>,
    pub categories: Vec<String>,
}

/// One catalog item: a scope/target pair with its actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub scope: String,
    pub target: String,
    pub actions: Vec<ActionSpec>,
}

/// The full catalog for one (fault-tool, version) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSpec {
    pub kind: String,
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub version: String,
    pub items: Vec<ModelSpec>,
}

/// A configured descriptor origin: tool name, version, and fetch URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOriginal {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub url: Option<String>,
}
