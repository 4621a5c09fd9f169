//! Kubernetes client wrapper for the Chaos Mesh custom resources
//!
//! Wraps `kube::Client` and addresses the chaos CRD collections through
//! `Api<DynamicObject>`. A process-wide default client serves requests
//! without credentials; a request carrying its own kubeconfig blob gets a
//! fresh client and never touches the shared one.

use kube::{
    api::{Api, DeleteParams, DynamicObject, PostParams, PropagationPolicy},
    config::{KubeConfigOptions, Kubeconfig},
    discovery::ApiResource,
    Client, Config,
};
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};

use super::command::RequestCommand;
use super::crd::{self, ChaosResource, FaultKind};

/// Chaos Mesh API client
#[derive(Clone)]
pub struct MeshClient {
    client: Client,
    namespace: String,
}

impl MeshClient {
    /// Create a client from the default kubeconfig or in-cluster config
    #[instrument(skip_all)]
    pub async fn try_default(namespace: &str) -> AppResult<Self> {
        let config = Config::infer()
            .await
            .map_err(|e| AppError::client(e.to_string()))?;
        let client = Client::try_from(config).map_err(|e| AppError::client(e.to_string()))?;

        info!("Connected to Kubernetes cluster");

        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    /// Create a client from an inline kubeconfig YAML blob
    pub async fn from_kubeconfig(blob: &str, namespace: &str) -> AppResult<Self> {
        let kubeconfig =
            Kubeconfig::from_yaml(blob).map_err(|e| AppError::client(e.to_string()))?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| AppError::client(e.to_string()))?;
        let client = Client::try_from(config).map_err(|e| AppError::client(e.to_string()))?;

        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    /// Resolve the client for a request: the shared default, or a fresh one
    /// when the request carries its own credentials
    pub async fn for_request(&self, request: &RequestCommand) -> AppResult<MeshClient> {
        match request.config.as_deref() {
            Some(blob) if !blob.trim().is_empty() => {
                Self::from_kubeconfig(blob, &self.namespace).await
            }
            _ => Ok(self.clone()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn api(&self, kind: FaultKind) -> Api<DynamicObject> {
        let ar = ApiResource {
            group: crd::GROUP.to_string(),
            version: crd::VERSION.to_string(),
            api_version: crd::API_VERSION.to_string(),
            kind: kind.kind().to_string(),
            plural: kind.plural().to_string(),
        };
        Api::namespaced_with(self.client.clone(), &self.namespace, &ar)
    }

    /// Create a chaos resource; returns the name the cluster accepted
    #[instrument(skip(self, body), fields(kind = %body.kind))]
    pub async fn create_chaos(&self, body: &ChaosResource) -> Result<String, kube::Error> {
        let kind = body.spec.fault_kind();
        let obj: DynamicObject = serde_json::from_value(serde_json::to_value(body).map_err(
            kube::Error::SerdeError,
        )?)
        .map_err(kube::Error::SerdeError)?;

        let created = self.api(kind).create(&PostParams::default(), &obj).await?;
        let name = created.metadata.name.unwrap_or_default();
        info!(name = %name, "Created chaos resource");
        Ok(name)
    }

    /// Delete a chaos resource by name with the given grace period.
    /// Cascade is disabled: dependents are orphaned, matching the
    /// controller's own cleanup responsibility.
    #[instrument(skip(self))]
    pub async fn delete_chaos(
        &self,
        kind: FaultKind,
        name: &str,
        grace_period: i64,
    ) -> Result<(), kube::Error> {
        let dp = DeleteParams {
            grace_period_seconds: Some(u32::try_from(grace_period).unwrap_or(0)),
            propagation_policy: Some(PropagationPolicy::Orphan),
            ..Default::default()
        };
        self.api(kind).delete(name, &dp).await?;
        info!(name, "Deleted chaos resource");
        Ok(())
    }
}
