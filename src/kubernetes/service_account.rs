// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Service account provisioning

use crate::error::Result;
use k8s_openapi::api::core::v1::ServiceAccount;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{info, instrument, warn};

/// Create the service account `name` in `namespace`.
///
/// An existing account with the same name is returned as is; it is never updated.
#[instrument(skip(client))]
pub async fn create_service_account(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<ServiceAccount> {
    let accounts: Api<ServiceAccount> = Api::namespaced(client.clone(), namespace);

    let account = ServiceAccount {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    match accounts.create(&PostParams::default(), &account).await {
        Ok(created) => {
            info!("Created service account {}/{}", namespace, name);
            Ok(created)
        }
        Err(kube::Error::Api(err)) if err.code == 409 => {
            warn!(
                "Service account {}/{} already exists, reusing it",
                namespace, name
            );
            Ok(accounts.get(name).await?)
        }
        Err(e) => Err(e.into()),
    }
}
