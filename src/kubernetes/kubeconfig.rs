// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Active context resolution and client creation from the local kubeconfig

use crate::error::{IntakeError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use tracing::{debug, info};

/// The kubeconfig context an onboarding run targets
#[derive(Clone)]
pub struct KubeContext {
    kubeconfig: Kubeconfig,
    /// Context name
    pub context: String,
    /// Name of the kubeconfig cluster entry the context points at
    pub cluster: String,
    /// API server URL of that cluster
    pub server: String,
}

impl KubeContext {
    /// Read the kubeconfig from `path`, or from `KUBECONFIG` / `~/.kube/config` when absent
    pub fn load(path: Option<&str>, context: Option<&str>) -> Result<Self> {
        let kubeconfig = match path {
            Some(path) => Kubeconfig::read_from(path).map_err(|e| {
                IntakeError::NoKubeContext(format!("Failed to read kubeconfig {}: {}", path, e))
            })?,
            None => Kubeconfig::read().map_err(|e| {
                IntakeError::NoKubeContext(format!("Failed to read kubeconfig: {}", e))
            })?,
        };

        Self::from_kubeconfig(kubeconfig, context)
    }

    /// Resolve `context` (or the current context) to its cluster and server
    pub fn from_kubeconfig(kubeconfig: Kubeconfig, context: Option<&str>) -> Result<Self> {
        let Some(context_name) = context
            .map(str::to_string)
            .or_else(|| kubeconfig.current_context.clone())
            .filter(|c| !c.is_empty())
        else {
            return Err(IntakeError::NoKubeContext(
                "kubeconfig has no current context".to_string(),
            ));
        };

        let Some(cluster_name) = kubeconfig
            .contexts
            .iter()
            .find(|c| c.name == context_name)
            .and_then(|c| c.context.as_ref())
            .map(|c| c.cluster.clone())
            .filter(|c| !c.is_empty())
        else {
            return Err(IntakeError::NoKubeContext(format!(
                "context '{}' not found or has no cluster",
                context_name
            )));
        };

        let Some(server) = kubeconfig
            .clusters
            .iter()
            .find(|c| c.name == cluster_name)
            .and_then(|c| c.cluster.as_ref())
            .and_then(|c| c.server.clone())
            .filter(|s| !s.is_empty())
        else {
            return Err(IntakeError::NoKubeContext(format!(
                "cluster '{}' not found or has no server",
                cluster_name
            )));
        };

        debug!(
            "Resolved context {} to cluster {} at {}",
            context_name, cluster_name, server
        );

        Ok(KubeContext {
            kubeconfig,
            context: context_name,
            cluster: cluster_name,
            server,
        })
    }

    /// Host part of the API server URL, the IP address for GKE clusters
    pub fn endpoint_host(&self) -> Result<String> {
        let url = url::Url::parse(&self.server).map_err(|e| {
            IntakeError::KubeconfigError(format!("Invalid server URL {}: {}", self.server, e))
        })?;

        url.host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
            .ok_or_else(|| {
                IntakeError::KubeconfigError(format!("Server URL {} has no host", self.server))
            })
    }

    /// Create a Kubernetes client for this context
    pub async fn client(&self) -> Result<Client> {
        let options = KubeConfigOptions {
            context: Some(self.context.clone()),
            ..Default::default()
        };

        let client_config = KConfig::from_custom_kubeconfig(self.kubeconfig.clone(), &options)
            .await
            .map_err(|e| {
                IntakeError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

        let client = Client::try_from(client_config).map_err(|e| {
            IntakeError::KubeconfigError(format!("Failed to create client: {}", e))
        })?;

        info!("Connected to cluster {} via context {}", self.server, self.context);
        Ok(client)
    }
}
