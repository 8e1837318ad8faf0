// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GKE inventory lookups through the gcloud CLI

use crate::error::{IntakeError, Result};
use crate::tools::CommandRunner;
use crate::types::GkeCluster;
use tracing::{debug, info, instrument};

const UNSET_PROJECT: &str = "(unset)";

/// A cluster matched by endpoint, with its location resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCluster {
    pub name: String,
    pub location: String,
}

/// Active project of the gcloud configuration
#[instrument(skip(runner))]
pub async fn current_project<R: CommandRunner>(runner: &R) -> Result<String> {
    let output = runner
        .run("gcloud", &["config", "get-value", "project"], None)
        .await?;

    if !output.success {
        return Err(IntakeError::GcloudError(format!(
            "Failed to read active project: {}",
            output.stderr_str()
        )));
    }

    let project = output.stdout_str();
    if project.is_empty() || project == UNSET_PROJECT {
        return Err(IntakeError::GcloudError(
            "No active project configured, run 'gcloud config set project <id>' or pass --project"
                .to_string(),
        ));
    }

    debug!("Using gcloud project {}", project);
    Ok(project)
}

/// Find the GKE cluster serving the API endpoint `endpoint_host`
#[instrument(skip(runner))]
pub async fn find_cluster_by_endpoint<R: CommandRunner>(
    runner: &R,
    project: &str,
    endpoint_host: &str,
) -> Result<ResolvedCluster> {
    let filter = format!("--filter=endpoint:{}", endpoint_host);
    let project_flag = format!("--project={}", project);
    let output = runner
        .run(
            "gcloud",
            &[
                "container",
                "clusters",
                "list",
                &filter,
                &project_flag,
                "--format=json",
            ],
            None,
        )
        .await?;

    if !output.success {
        return Err(IntakeError::GcloudError(format!(
            "Failed to list clusters in project {}: {}",
            project,
            output.stderr_str()
        )));
    }

    let clusters: Vec<GkeCluster> = serde_json::from_slice(&output.stdout).map_err(|e| {
        IntakeError::GcloudError(format!("Failed to parse cluster list: {}", e))
    })?;

    let Some(cluster) = clusters.into_iter().next() else {
        return Err(IntakeError::ClusterNotFound(endpoint_host.to_string()));
    };

    let Some(location) = cluster.location().map(str::to_string) else {
        return Err(IntakeError::GcloudError(format!(
            "Cluster {} has no location",
            cluster.name
        )));
    };

    info!(
        "Endpoint {} belongs to cluster {} in {}",
        endpoint_host, cluster.name, location
    );
    Ok(ResolvedCluster {
        name: cluster.name,
        location,
    })
}
