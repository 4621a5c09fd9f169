//! Experiment dispatcher
//!
//! Reduces each attack or recovery invocation to exactly one
//! [`ResponseCommand`]. Translation runs in the caller before any remote
//! call; the single await on the kube client resolves the outcome. No
//! retries happen here; retry policy belongs to the upstream scheduler.

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppResult;

use super::body::build_chaos_body;
use super::client::MeshClient;
use super::command::{RequestCommand, ResponseCommand};
use super::crd::FaultKind;

/// Experiment phase, fixed per deployment and never derived from requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Attack,
    Recover,
}

/// Dispatches fault-injection experiments against Chaos Mesh
#[derive(Clone)]
pub struct MeshInvoker {
    client: MeshClient,
    recover_grace_period: i64,
}

impl MeshInvoker {
    /// Build an invoker with the shared default client
    pub async fn new(config: &Config) -> AppResult<Self> {
        let client = MeshClient::try_default(&config.chaos_namespace).await?;
        Ok(Self {
            client,
            recover_grace_period: config.recover_grace_period,
        })
    }

    pub fn with_client(client: MeshClient, recover_grace_period: i64) -> Self {
        Self {
            client,
            recover_grace_period,
        }
    }

    /// Run the configured phase for a request
    pub async fn invoke(&self, phase: Phase, request: &RequestCommand) -> AppResult<ResponseCommand> {
        match phase {
            Phase::Attack => self.attack(request).await,
            Phase::Recover => self.recover(request).await,
        }
    }

    /// Attack phase: translate the request and create the chaos resource.
    ///
    /// The generated name is created once per invocation and reported back
    /// as the outcome's result so recovery can address the resource later.
    pub async fn attack(&self, request: &RequestCommand) -> AppResult<ResponseCommand> {
        let name = Uuid::new_v4().simple().to_string();

        // Translation failures never reach the cluster
        let body = build_chaos_body(request, &name, self.client.namespace())?;

        info!(
            scene_code = %request.scene_code,
            kind = %body.kind,
            name = %name,
            "Dispatching attack"
        );

        let client = self.client.for_request(request).await?;
        match client.create_chaos(&body).await {
            Ok(_) => Ok(ResponseCommand::success("200", &name)),
            Err(e) => {
                warn!(name = %name, "Attack failed: {}", e);
                Ok(outcome_from_error(&e))
            }
        }
    }

    /// Recovery phase: delete the resource named by `request.name`.
    ///
    /// A 404 from the cluster means the fault is already gone and counts as
    /// a successful recovery.
    pub async fn recover(&self, request: &RequestCommand) -> AppResult<ResponseCommand> {
        let kind = FaultKind::from_scene_code(&request.scene_code)?;
        let name = request
            .name
            .as_deref()
            .ok_or_else(|| crate::error::AppError::missing_argument("name"))?;

        info!(
            scene_code = %request.scene_code,
            kind = %kind,
            name = %name,
            "Dispatching recovery"
        );

        let client = self.client.for_request(request).await?;
        match client
            .delete_chaos(kind, name, self.recover_grace_period)
            .await
        {
            Ok(_) => Ok(ResponseCommand::success("200", name)),
            Err(e) => Ok(recovery_outcome_from_error(&e, name)),
        }
    }
}

/// Maps a failed remote call to a structured failure outcome
fn outcome_from_error(error: &kube::Error) -> ResponseCommand {
    match error {
        kube::Error::Api(ae) => ResponseCommand::failure(
            &ae.code.to_string(),
            &ae.message,
            serde_json::to_string(ae).ok(),
        ),
        other => ResponseCommand::failure("", &other.to_string(), None),
    }
}

/// Recovery reduction: not-found is a success, anything else a failure
fn recovery_outcome_from_error(error: &kube::Error, name: &str) -> ResponseCommand {
    match error {
        kube::Error::Api(ae) if ae.code == 404 => {
            warn!(name, "Chaos resource already gone, treating as recovered");
            ResponseCommand {
                success: true,
                code: String::new(),
                result: name.to_string(),
                error: None,
            }
        }
        other => outcome_from_error(other),
    }
}
