// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::fmt;

/// CA certificate and bearer token read from a service account token secret
#[derive(Clone, PartialEq, Eq)]
pub struct AccountToken {
    pub ca_cert: String,
    pub token: String,
}

impl fmt::Debug for AccountToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountToken")
            .field("ca_cert", &format_args!("<{} bytes>", self.ca_cert.len()))
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The document Spinnaker reads from Vault to build a dynamic account
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    /// PEM encoded cluster CA certificate
    pub ca_cert: String,
    /// API server URL
    pub k8s_host: String,
    /// Cluster identifier, see [`crate::types::ClusterIdentity::cluster_id`]
    pub k8s_name: String,
    pub k8s_username: String,
    pub user_token: String,
}

impl CredentialBundle {
    pub fn new(token: AccountToken, k8s_host: &str, k8s_name: &str, k8s_username: &str) -> Self {
        CredentialBundle {
            ca_cert: token.ca_cert,
            k8s_host: k8s_host.to_string(),
            k8s_name: k8s_name.to_string(),
            k8s_username: k8s_username.to_string(),
            user_token: token.token,
        }
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("ca_cert", &format_args!("<{} bytes>", self.ca_cert.len()))
            .field("k8s_host", &self.k8s_host)
            .field("k8s_name", &self.k8s_name)
            .field("k8s_username", &self.k8s_username)
            .field("user_token", &"<redacted>")
            .finish()
    }
}
