// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! cluster-admin binding for the onboarded service account

use crate::constants::{rbac, DEFAULT_NAMESPACE, FIELD_MANAGER};
use crate::error::{IntakeError, Result};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleBinding, RoleRef, Subject};
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client,
};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Scope of the binding granted to the service account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    ClusterRoleBinding,
    RoleBinding,
}

impl BindingKind {
    /// Cluster-wide for the default namespace, namespaced everywhere else
    pub fn for_namespace(namespace: &str) -> Self {
        if namespace == DEFAULT_NAMESPACE {
            BindingKind::ClusterRoleBinding
        } else {
            BindingKind::RoleBinding
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::ClusterRoleBinding => write!(f, "ClusterRoleBinding"),
            BindingKind::RoleBinding => write!(f, "RoleBinding"),
        }
    }
}

/// A binding of `cluster-admin` to a single service account
#[derive(Debug, Clone, PartialEq)]
pub enum RbacBinding {
    Cluster(ClusterRoleBinding),
    Namespaced(RoleBinding),
}

impl RbacBinding {
    pub fn for_service_account(namespace: &str, account: &str) -> Self {
        let name = format!("{}{}", account, rbac::BINDING_SUFFIX);
        let role_ref = RoleRef {
            api_group: rbac::API_GROUP.to_string(),
            kind: "ClusterRole".to_string(),
            name: rbac::CLUSTER_ROLE.to_string(),
        };
        let subjects = Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: account.to_string(),
            namespace: Some(namespace.to_string()),
            api_group: None,
        }]);

        match BindingKind::for_namespace(namespace) {
            BindingKind::ClusterRoleBinding => RbacBinding::Cluster(ClusterRoleBinding {
                metadata: ObjectMeta {
                    name: Some(name),
                    ..Default::default()
                },
                role_ref,
                subjects,
            }),
            BindingKind::RoleBinding => RbacBinding::Namespaced(RoleBinding {
                metadata: ObjectMeta {
                    name: Some(name),
                    namespace: Some(namespace.to_string()),
                    ..Default::default()
                },
                role_ref,
                subjects,
            }),
        }
    }

    pub fn kind(&self) -> BindingKind {
        match self {
            RbacBinding::Cluster(_) => BindingKind::ClusterRoleBinding,
            RbacBinding::Namespaced(_) => BindingKind::RoleBinding,
        }
    }

    pub fn name(&self) -> String {
        let metadata = match self {
            RbacBinding::Cluster(b) => &b.metadata,
            RbacBinding::Namespaced(b) => &b.metadata,
        };
        metadata.name.clone().unwrap_or_default()
    }

    /// Render the binding as a YAML manifest
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = match self {
            RbacBinding::Cluster(b) => serde_yaml::to_string(b)?,
            RbacBinding::Namespaced(b) => serde_yaml::to_string(b)?,
        };
        Ok(yaml)
    }

    /// Parse a manifest rendered by [`RbacBinding::to_yaml`] back into a binding of `kind`
    pub fn from_yaml(kind: BindingKind, manifest: &str) -> Result<Self> {
        let binding = match kind {
            BindingKind::ClusterRoleBinding => {
                RbacBinding::Cluster(serde_yaml::from_str(manifest)?)
            }
            BindingKind::RoleBinding => RbacBinding::Namespaced(serde_yaml::from_str(manifest)?),
        };
        Ok(binding)
    }

    async fn apply(&self, client: &Client) -> Result<()> {
        let pp = PatchParams::apply(FIELD_MANAGER).force();
        let name = self.name();

        match self {
            RbacBinding::Cluster(b) => {
                let api: Api<ClusterRoleBinding> = Api::all(client.clone());
                api.patch(&name, &pp, &Patch::Apply(b)).await?;
            }
            RbacBinding::Namespaced(b) => {
                let namespace = b.metadata.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
                let api: Api<RoleBinding> = Api::namespaced(client.clone(), namespace);
                api.patch(&name, &pp, &Patch::Apply(b)).await?;
            }
        }

        Ok(())
    }
}

/// Render the binding to a transient manifest file and apply the manifest.
///
/// The object sent to the API server is read back from the file. The file
/// is removed once the binding is applied and kept for inspection when the
/// apply fails.
pub async fn apply_binding(client: &Client, binding: &RbacBinding) -> Result<()> {
    apply_binding_in(client, binding, &std::env::temp_dir()).await
}

#[instrument(skip(client, binding), fields(kind = %binding.kind(), name = %binding.name()))]
async fn apply_binding_in(client: &Client, binding: &RbacBinding, dir: &Path) -> Result<()> {
    let mut manifest = tempfile::Builder::new()
        .prefix("spinnaker-intake-rbac-")
        .suffix(".yaml")
        .tempfile_in(dir)?;
    manifest.write_all(binding.to_yaml()?.as_bytes())?;
    manifest.flush()?;
    debug!("Rendered manifest to {}", manifest.path().display());

    let rendered = std::fs::read_to_string(manifest.path())?;
    let result = match RbacBinding::from_yaml(binding.kind(), &rendered) {
        Ok(applied) => applied.apply(client).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            manifest.close()?;
            info!("Applied {} {}", binding.kind(), binding.name());
            Ok(())
        }
        Err(e) => {
            let kept = match manifest.keep() {
                Ok((_, path)) => path.display().to_string(),
                Err(persist) => format!("<not kept: {}>", persist.error),
            };
            error!("Failed to apply {}, manifest kept at {}", binding.kind(), kept);
            Err(IntakeError::RbacApplyError(format!(
                "{} {}: {} (manifest kept at {})",
                binding.kind(),
                binding.name(),
                e,
                kept
            )))
        }
    }
}
