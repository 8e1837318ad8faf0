// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The onboarding run: provision the account, bind it, extract its
//! credentials and hand them to Vault.
//!
//! Every step is a single blocking round-trip and the first failure aborts
//! the run. Resources created before a failure are left in place.

use crate::config::Config;
use crate::constants::SERVICE_ACCOUNT_NAME;
use crate::error::Result;
use crate::gcloud;
use crate::kubernetes::{
    apply_binding, create_service_account, read_account_token, require_namespace, KubeContext,
    RbacBinding,
};
use crate::tools::{check_required_tools, CommandRunner};
use crate::types::{ClusterIdentity, CredentialBundle};
use crate::vault;
use kube::Client;
use tracing::{info, instrument};

/// Drives one onboarding run against a single cluster
pub struct Onboarder<R> {
    client: Client,
    runner: R,
    config: Config,
}

impl<R: CommandRunner> Onboarder<R> {
    pub fn new(client: Client, runner: R, config: Config) -> Self {
        Self {
            client,
            runner,
            config,
        }
    }

    /// Run every step in order and return the bundle written to Vault.
    ///
    /// Missing command line tools abort the run before the cluster is contacted.
    #[instrument(
        skip(self, context),
        fields(namespace = %self.config.namespace, kube_context = %context.context)
    )]
    pub async fn run(&self, context: &KubeContext) -> Result<CredentialBundle> {
        let namespace = self.config.namespace.as_str();
        check_required_tools(&self.runner).await?;

        info!("[Step 1] Creating service account {}/{}...", namespace, SERVICE_ACCOUNT_NAME);
        require_namespace(&self.client, namespace).await?;
        create_service_account(&self.client, namespace, SERVICE_ACCOUNT_NAME).await?;

        info!("[Step 2] Reading service account token...");
        let token = read_account_token(&self.client, namespace, SERVICE_ACCOUNT_NAME).await?;

        info!("[Step 3] Resolving cluster identity for {}...", context.server);
        let identity = self.resolve_identity(context).await?;
        let cluster_id = identity.cluster_id();
        info!("Cluster identifier is {}", cluster_id);

        let binding = RbacBinding::for_service_account(namespace, SERVICE_ACCOUNT_NAME);
        info!("[Step 4] Applying {} to cluster-admin...", binding.kind());
        apply_binding(&self.client, &binding).await?;

        let bundle =
            CredentialBundle::new(token, &context.server, &cluster_id, SERVICE_ACCOUNT_NAME);
        let path = self.config.vault_secret_path(&cluster_id);
        info!("[Step 5] Uploading credentials to {}...", path);
        vault::write_credentials(&self.runner, &path, &bundle).await?;

        Ok(bundle)
    }

    async fn resolve_identity(&self, context: &KubeContext) -> Result<ClusterIdentity> {
        let endpoint_host = context.endpoint_host()?;

        let project = match &self.config.gcp_project {
            Some(project) => project.clone(),
            None => gcloud::current_project(&self.runner).await?,
        };

        let cluster =
            gcloud::find_cluster_by_endpoint(&self.runner, &project, &endpoint_host).await?;

        Ok(ClusterIdentity {
            project,
            location: cluster.location,
            cluster: cluster.name,
            namespace: self.config.namespace.clone(),
        })
    }
}
