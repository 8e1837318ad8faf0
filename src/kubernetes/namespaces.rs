// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace checks

use crate::error::{IntakeError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{Api, Client};
use tracing::{debug, instrument};

/// Ensure a namespace exists in the cluster. It is never created.
#[instrument(skip(client))]
pub async fn require_namespace(client: &Client, namespace: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    match namespaces.get(namespace).await {
        Ok(_) => {
            debug!("Namespace {} exists", namespace);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            Err(IntakeError::NamespaceNotFound(namespace.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
