//! Request and response models for the invoker

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A fault-injection request handed down by the experiment scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCommand {
    /// Scene code, e.g. `chaosmesh.k8s-pod.pod-failure`
    pub scene_code: String,
    /// Flat argument bag; keys are unique and case-sensitive
    #[serde(default)]
    pub arguments: HashMap<String, String>,
    /// Optional kubeconfig YAML; when absent the shared default client is used
    #[serde(default)]
    pub config: Option<String>,
    /// Name of the chaos resource to recover; set by a prior attack
    #[serde(default)]
    pub name: Option<String>,
}

impl RequestCommand {
    pub fn new(scene_code: &str, arguments: HashMap<String, String>) -> Self {
        Self {
            scene_code: scene_code.to_string(),
            arguments,
            config: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// The single outcome of an attack or recovery invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseCommand {
    pub success: bool,
    /// Transport status code, or empty when none applies
    #[serde(default)]
    pub code: String,
    /// Resource name on success, diagnostic message on failure
    pub result: String,
    /// Raw diagnostic body on failure
    #[serde(default)]
    pub error: Option<String>,
}

impl ResponseCommand {
    pub fn success(code: &str, result: &str) -> Self {
        Self {
            success: true,
            code: code.to_string(),
            result: result.to_string(),
            error: None,
        }
    }

    pub fn failure(code: &str, result: &str, error: Option<String>) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            result: result.to_string(),
            error,
        }
    }
}
