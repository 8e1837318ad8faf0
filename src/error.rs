// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("No usable Kubernetes context: {0}")]
    NoKubeContext(String),

    #[error("Required tool '{tool}' not found. {hint}")]
    MissingTool { tool: String, hint: String },

    #[error("Namespace '{0}' does not exist")]
    NamespaceNotFound(String),

    #[error("Service account token secret error: {0}")]
    TokenSecretError(String),

    #[error("gcloud error: {0}")]
    GcloudError(String),

    #[error("No GKE cluster found with endpoint {0}")]
    ClusterNotFound(String),

    #[error("Failed to apply RBAC binding: {0}")]
    RbacApplyError(String),

    #[error("Vault write failed: {0}")]
    VaultWriteError(String),

    #[error("Failed to run {program}: {message}")]
    CommandError { program: String, message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
