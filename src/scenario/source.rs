//! Descriptor document loading
//!
//! The bundled local copy is preferred; on a miss the descriptor is fetched
//! from the original's URL and persisted so future runs stay offline.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{AppError, AppResult};

use super::model::ScenarioOriginal;

/// The fault-tool name; also the descriptor directory name
pub const TOOL_NAME: &str = "chaosmesh";

/// Resolves and caches descriptor documents under a base directory
#[derive(Debug, Clone)]
pub struct DescriptorSource {
    base_dir: PathBuf,
}

impl DescriptorSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn descriptor_path(&self, original: &ScenarioOriginal) -> PathBuf {
        self.base_dir.join(TOOL_NAME).join(format!(
            "{}-{}-{}.yaml",
            TOOL_NAME, original.name, original.version
        ))
    }

    fn category_path(&self, version: &str) -> PathBuf {
        self.base_dir
            .join(TOOL_NAME)
            .join(version)
            .join("category.yaml")
    }

    /// Load the multi-document action/flag descriptor text
    pub async fn load_descriptor(&self, original: &ScenarioOriginal) -> AppResult<String> {
        let path = self.descriptor_path(original);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Bundled descriptor not found");
                self.fetch_and_persist(original, &path).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the category-mapping document text for a version
    pub fn load_categories(&self, version: &str) -> AppResult<String> {
        Ok(std::fs::read_to_string(self.category_path(version))?)
    }

    async fn fetch_and_persist(
        &self,
        original: &ScenarioOriginal,
        path: &Path,
    ) -> AppResult<String> {
        let url = original
            .url
            .as_deref()
            .ok_or_else(|| AppError::missing_argument("descriptor url"))?;

        info!(name = %original.name, url, "Fetching scenario descriptor");
        let body = reqwest::get(url).await?.error_for_status()?.text().await?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &body)?;
        info!(path = %path.display(), "Persisted scenario descriptor");

        Ok(body)
    }
}
