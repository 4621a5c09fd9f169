//! Offline catalog generation
//!
//! Reads the configured descriptor origins, builds one catalog per
//! (tool, version) pair, and dumps each as block-style YAML next to the
//! descriptors so the upstream scheduler can serve them without parsing.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chaosmesh_invoker::scenario::{DescriptorSource, MeshScenarioParser, ScenarioOriginal};
use chaosmesh_invoker::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let originals_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("{}/originals.yaml", config.scenario_dir));

    let text = std::fs::read_to_string(&originals_path)
        .with_context(|| format!("reading {}", originals_path))?;
    let originals: Vec<ScenarioOriginal> = serde_yaml::from_str(&text)?;

    if originals.is_empty() {
        tracing::warn!("No scenario originals configured, nothing to do");
        return Ok(());
    }

    let source = DescriptorSource::new(&config.scenario_dir);
    let parser = MeshScenarioParser::new(originals, source);

    for spec in parser.parse().await? {
        let out_dir = std::path::Path::new(&config.scenario_dir)
            .join(&spec.kind)
            .join(&spec.version);
        std::fs::create_dir_all(&out_dir)?;

        let out_path = out_dir.join(format!(
            "{}-{}-{}.catalog.yaml",
            spec.kind, spec.plugin_type, spec.version
        ));
        std::fs::write(&out_path, serde_yaml::to_string(&spec)?)?;
        tracing::info!(path = %out_path.display(), items = spec.items.len(), "Wrote catalog");
    }

    Ok(())
}
