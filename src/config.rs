use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Namespace the chaos CRDs are created in
    #[serde(default = "default_chaos_namespace")]
    pub chaos_namespace: String,

    /// Optional kubeconfig path override; `None` lets kube infer
    #[serde(default = "default_kubeconfig")]
    pub kubeconfig: Option<String>,

    /// Directory holding bundled scenario descriptor files
    #[serde(default = "default_scenario_dir")]
    pub scenario_dir: String,

    /// Grace period in seconds passed to delete calls during recovery
    #[serde(default = "default_recover_grace_period")]
    pub recover_grace_period: i64,
}

fn default_chaos_namespace() -> String {
    "default".to_string()
}

fn default_kubeconfig() -> Option<String> {
    None
}

fn default_scenario_dir() -> String {
    "scenarios".to_string()
}

fn default_recover_grace_period() -> i64 {
    10
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let settings: Config = config
            .try_deserialize()
            .unwrap_or_else(|_| Config::default());

        Ok(settings)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chaos_namespace: default_chaos_namespace(),
            kubeconfig: default_kubeconfig(),
            scenario_dir: default_scenario_dir(),
            recover_grace_period: default_recover_grace_period(),
        }
    }
}
