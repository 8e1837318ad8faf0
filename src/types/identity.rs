// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an onboarded account lives: GKE project, location, cluster and namespace
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClusterIdentity {
    pub project: String,
    pub location: String,
    pub cluster: String,
    pub namespace: String,
}

impl ClusterIdentity {
    /// Identifier used as the account name and Vault key,
    /// `gke_<project>_<location>_<cluster>_<namespace>`
    pub fn cluster_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClusterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gke_{}_{}_{}_{}",
            self.project, self.location, self.cluster, self.namespace
        )
    }
}

/// A GKE cluster entry as reported by `gcloud container clusters list --format=json`
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GkeCluster {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl GkeCluster {
    /// Location of the cluster, falling back to the legacy zone field
    pub fn location(&self) -> Option<&str> {
        let non_empty = |l: &&str| !l.is_empty();
        self.location
            .as_deref()
            .filter(non_empty)
            .or(self.zone.as_deref().filter(non_empty))
    }
}
