//! Chaos Mesh CRD types
//!
//! Typed spec structs for the six supported fault kinds, the pod selector,
//! and the resource envelope submitted to the cluster. Decoding is lenient:
//! unknown keys in the flattened argument structure are ignored, and
//! numeric fields accept the string form the argument bag carries.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::scene;

pub const GROUP: &str = "chaos-mesh.org";
pub const VERSION: &str = "v1alpha1";
pub const API_VERSION: &str = "chaos-mesh.org/v1alpha1";

/// The six fault kinds enumerated by the Chaos Mesh schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Pod,
    Network,
    Stress,
    Io,
    Dns,
    Time,
}

impl FaultKind {
    /// Derives the fault kind from the scene code's target segment
    /// (e.g. `k8s-pod` selects [`FaultKind::Pod`]).
    ///
    /// An unrecognized discriminator is rejected here, before any remote
    /// call can be issued.
    pub fn from_scene_code(scene_code: &str) -> AppResult<Self> {
        match scene::target_type(scene_code)? {
            "pod" => Ok(FaultKind::Pod),
            "network" => Ok(FaultKind::Network),
            "stress" => Ok(FaultKind::Stress),
            "file" => Ok(FaultKind::Io),
            "dns" => Ok(FaultKind::Dns),
            "time" => Ok(FaultKind::Time),
            other => Err(AppError::UnknownFaultType(other.to_string())),
        }
    }

    /// CRD kind name
    pub fn kind(&self) -> &'static str {
        match self {
            FaultKind::Pod => "PodChaos",
            FaultKind::Network => "NetworkChaos",
            FaultKind::Stress => "StressChaos",
            FaultKind::Io => "IOChaos",
            FaultKind::Dns => "DNSChaos",
            FaultKind::Time => "TimeChaos",
        }
    }

    /// Plural resource collection name used to address create/delete calls
    pub fn plural(&self) -> &'static str {
        match self {
            FaultKind::Pod => "podchaos",
            FaultKind::Network => "networkchaos",
            FaultKind::Stress => "stresschaos",
            FaultKind::Io => "iochaos",
            FaultKind::Dns => "dnschaos",
            FaultKind::Time => "timechaos",
        }
    }

    /// Stress and Time specs carry no `action` field; everything else does
    pub fn has_action(&self) -> bool {
        !matches!(self, FaultKind::Stress | FaultKind::Time)
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// Pod selector: every namespace maps to the full pod-name list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChaosPodSelector {
    pub pods: BTreeMap<String, Vec<String>>,
}

/// Accepts both JSON numbers and the string form the argument bag carries
fn de_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_i64()),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected number or string, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub grace_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_names: Option<Vec<String>>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_targets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<NetworkDelaySpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss: Option<NetworkLossSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<NetworkDuplicateSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupt: Option<NetworkCorruptSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<NetworkBandwidthSpec>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkDelaySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkLossSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkDuplicateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkCorruptSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkBandwidthSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub buffer: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StressChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stressors: Option<Stressors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stressng_stressors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_names: Option<Vec<String>>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stressors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuStressor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryStressor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CpuStressor {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub workers: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub load: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryStressor {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub workers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IoChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub errno: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub percent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<AttrOverrideSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mistake: Option<MistakeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_names: Option<Vec<String>>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

/// Filesystem attribute overrides for IOChaos `attrOverride` faults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttrOverrideSpec {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub ino: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub size: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub blocks: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub perm: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub nlink: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub uid: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub gid: Option<i64>,
}

/// Mistake injection for IOChaos `mistake` faults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MistakeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filling: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub max_occurrences: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de_lenient_i64"
    )]
    pub max_length: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_names: Option<Vec<String>>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeChaosSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_names: Option<Vec<String>>,
    pub mode: String,
    pub selector: ChaosPodSelector,
}

/// Tagged union over the six spec variants; dispatch is an explicit match
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChaosSpec {
    Pod(PodChaosSpec),
    Network(NetworkChaosSpec),
    Stress(StressChaosSpec),
    Io(IoChaosSpec),
    Dns(DnsChaosSpec),
    Time(TimeChaosSpec),
}

impl ChaosSpec {
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            ChaosSpec::Pod(_) => FaultKind::Pod,
            ChaosSpec::Network(_) => FaultKind::Network,
            ChaosSpec::Stress(_) => FaultKind::Stress,
            ChaosSpec::Io(_) => FaultKind::Io,
            ChaosSpec::Dns(_) => FaultKind::Dns,
            ChaosSpec::Time(_) => FaultKind::Time,
        }
    }

    pub fn selector(&self) -> &ChaosPodSelector {
        match self {
            ChaosSpec::Pod(s) => &s.selector,
            ChaosSpec::Network(s) => &s.selector,
            ChaosSpec::Stress(s) => &s.selector,
            ChaosSpec::Io(s) => &s.selector,
            ChaosSpec::Dns(s) => &s.selector,
            ChaosSpec::Time(s) => &s.selector,
        }
    }

    /// The action carried by the spec; `None` for Stress and Time
    pub fn action(&self) -> Option<&str> {
        match self {
            ChaosSpec::Pod(s) => s.action.as_deref(),
            ChaosSpec::Network(s) => s.action.as_deref(),
            ChaosSpec::Io(s) => s.action.as_deref(),
            ChaosSpec::Dns(s) => s.action.as_deref(),
            ChaosSpec::Stress(_) | ChaosSpec::Time(_) => None,
        }
    }
}

/// The full resource submitted to the cluster
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosResource {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ChaosSpec,
}

impl ChaosResource {
    pub fn new(kind: FaultKind, name: &str, namespace: &str, spec: ChaosSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: kind.kind().to_string(),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec,
        }
    }
}
