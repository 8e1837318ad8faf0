// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Service account token extraction

use crate::constants::token::{
    CA_CERT_KEY, POLL_INTERVAL_SECS, POLL_MAX_ATTEMPTS, POLL_MAX_INTERVAL_SECS,
    SECRET_SUFFIX, SECRET_TYPE, SERVICE_ACCOUNT_ANNOTATION, TOKEN_KEY,
};
use crate::error::{IntakeError, Result};
use crate::types::AccountToken;
use k8s_openapi::api::core::v1::{Secret, ServiceAccount};
use k8s_openapi::ByteString;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Read the CA certificate and bearer token of service account `account`.
///
/// Uses the first secret bound to the account. Clusters that no longer bind
/// token secrets automatically get an explicit `kubernetes.io/service-account-token`
/// secret, which is polled until the token controller has filled it.
#[instrument(skip(client))]
pub async fn read_account_token(
    client: &Client,
    namespace: &str,
    account: &str,
) -> Result<AccountToken> {
    let accounts: Api<ServiceAccount> = Api::namespaced(client.clone(), namespace);
    let service_account = accounts.get(account).await?;

    let secret_name = match bound_secret_name(&service_account) {
        Some(name) => {
            debug!("Service account {}/{} is bound to secret {}", namespace, account, name);
            name
        }
        None => create_token_secret(client, namespace, account).await?,
    };

    wait_for_token(client, namespace, &secret_name).await
}

fn bound_secret_name(service_account: &ServiceAccount) -> Option<String> {
    service_account
        .secrets
        .as_ref()?
        .iter()
        .find_map(|r| r.name.clone())
}

async fn create_token_secret(client: &Client, namespace: &str, account: &str) -> Result<String> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let name = format!("{}{}", account, SECRET_SUFFIX);

    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(name.clone()),
            namespace: Some(namespace.to_string()),
            annotations: Some(BTreeMap::from([(
                SERVICE_ACCOUNT_ANNOTATION.to_string(),
                account.to_string(),
            )])),
            ..Default::default()
        },
        type_: Some(SECRET_TYPE.to_string()),
        ..Default::default()
    };

    match secrets.create(&PostParams::default(), &secret).await {
        Ok(_) => info!("Created token secret {}/{}", namespace, name),
        Err(kube::Error::Api(err)) if err.code == 409 => {
            debug!("Token secret {}/{} already exists", namespace, name)
        }
        Err(e) => return Err(e.into()),
    }

    Ok(name)
}

/// Poll the token secret with exponential backoff until it carries a token and CA certificate
async fn wait_for_token(client: &Client, namespace: &str, name: &str) -> Result<AccountToken> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let mut interval = POLL_INTERVAL_SECS;

    for attempt in 1..=POLL_MAX_ATTEMPTS {
        let secret = secrets.get(name).await?;
        if let Some(token) = extract_token(&secret)? {
            return Ok(token);
        }

        if attempt < POLL_MAX_ATTEMPTS {
            info!(
                "Token secret {}/{} not populated yet, waiting {} seconds...",
                namespace, name, interval
            );
            sleep(Duration::from_secs(interval)).await;
            interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
        }
    }

    Err(IntakeError::TokenSecretError(format!(
        "Secret {}/{} was not populated after {} attempts",
        namespace, name, POLL_MAX_ATTEMPTS
    )))
}

/// Decode the CA certificate and token of a token secret, `None` while either is missing
pub fn extract_token(secret: &Secret) -> Result<Option<AccountToken>> {
    let Some(data) = secret.data.as_ref() else {
        return Ok(None);
    };

    let (Some(ca_cert), Some(token)) = (data.get(CA_CERT_KEY), data.get(TOKEN_KEY)) else {
        return Ok(None);
    };

    if ca_cert.0.is_empty() || token.0.is_empty() {
        return Ok(None);
    }

    Ok(Some(AccountToken {
        ca_cert: decode_utf8(ca_cert, CA_CERT_KEY)?,
        token: decode_utf8(token, TOKEN_KEY)?,
    }))
}

fn decode_utf8(value: &ByteString, key: &str) -> Result<String> {
    String::from_utf8(value.0.clone()).map_err(|e| {
        IntakeError::TokenSecretError(format!("Key '{}' is not valid UTF-8: {}", key, e))
    })
}
