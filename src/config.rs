// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::cli::Cli;
use crate::constants::{vault, DEFAULT_NAMESPACE};
use std::env;

/// Run configuration, loaded from environment variables and overridden by CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace the service account is created in
    pub namespace: String,
    /// Vault path prefix the credential bundle is written under
    pub vault_path: String,
    /// GCP project, asked from gcloud when unset
    pub gcp_project: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let vault_path = lookup("INTAKE_VAULT_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| vault::DEFAULT_PATH_PREFIX.to_string());
        let gcp_project = lookup("INTAKE_GCP_PROJECT").filter(|v| !v.is_empty());

        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            vault_path,
            gcp_project,
        }
    }

    /// Apply command line overrides
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        self.namespace = cli.namespace.clone();
        if let Some(vault_path) = &cli.vault_path {
            self.vault_path = vault_path.clone();
        }
        if cli.project.is_some() {
            self.gcp_project = cli.project.clone();
        }
        self
    }

    /// Full Vault path for a cluster identifier
    pub fn vault_secret_path(&self, cluster_id: &str) -> String {
        format!("{}/{}", self.vault_path.trim_end_matches('/'), cluster_id)
    }
}
