//! Error types shared across the invoker and scenario modules

use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required request argument is absent (e.g. `Namespaces`, `Pods`)
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// The scene code names a fault type outside the six supported kinds
    #[error("unknown fault type: {0}")]
    UnknownFaultType(String),

    /// The scene code does not follow the `tool.scope-target.action` grammar
    #[error("malformed scene code: {0}")]
    MalformedSceneCode(String),

    /// An argument key cannot be flattened into a nested structure
    #[error("malformed argument key: {0}")]
    MalformedKey(String),

    /// Building a Kubernetes client failed; fatal, never mapped to an Outcome
    #[error("failed to construct Kubernetes client: {0}")]
    ClientConstruction(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn missing_argument(name: &str) -> Self {
        AppError::MissingArgument(name.to_string())
    }

    pub fn client(msg: impl Into<String>) -> Self {
        AppError::ClientConstruction(msg.into())
    }

    /// True for errors raised before any remote call is attempted
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingArgument(_)
                | AppError::UnknownFaultType(_)
                | AppError::MalformedSceneCode(_)
                | AppError::MalformedKey(_)
        )
    }
}
