// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Name of the service account Spinnaker authenticates as
pub const SERVICE_ACCOUNT_NAME: &str = "spinnaker-user";

/// The field manager used for server-side apply
pub const FIELD_MANAGER: &str = "spinnaker-intake";

/// Namespace that gets a cluster-wide binding instead of a namespaced one
pub const DEFAULT_NAMESPACE: &str = "default";

/// RBAC settings for the onboarded account
pub mod rbac {
    pub const API_GROUP: &str = "rbac.authorization.k8s.io";
    /// Built-in role granted to the service account
    pub const CLUSTER_ROLE: &str = "cluster-admin";
    /// Suffix appended to the service account name to name the binding
    pub const BINDING_SUFFIX: &str = "-cluster-admin";
}

/// Service account token secret handling
pub mod token {
    /// Annotation linking a token secret to its service account
    pub const SERVICE_ACCOUNT_ANNOTATION: &str = "kubernetes.io/service-account.name";
    pub const SECRET_TYPE: &str = "kubernetes.io/service-account-token";
    pub const SECRET_SUFFIX: &str = "-token";
    pub const CA_CERT_KEY: &str = "ca.crt";
    pub const TOKEN_KEY: &str = "token";
    /// Initial polling interval in seconds while the token controller fills the secret
    pub const POLL_INTERVAL_SECS: u64 = 2;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 10;
    pub const POLL_MAX_ATTEMPTS: u32 = 10;
}

/// Vault settings
pub mod vault {
    /// Path prefix under which credential bundles are written
    pub const DEFAULT_PATH_PREFIX: &str = "secret/dynamic_accounts/intake";
}

/// External binaries the run depends on, with install hints
pub const REQUIRED_TOOLS: &[(&str, &str)] = &[
    (
        "gcloud",
        "Install the Google Cloud SDK: https://cloud.google.com/sdk/docs/install",
    ),
    (
        "vault",
        "Install the Vault CLI: https://developer.hashicorp.com/vault/install",
    ),
];
