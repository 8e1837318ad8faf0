// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential upload through the Vault CLI

use crate::error::{IntakeError, Result};
use crate::tools::CommandRunner;
use crate::types::CredentialBundle;
use tracing::{info, instrument};

/// Write `bundle` to `path`, overwriting any existing entry.
///
/// The JSON document is piped to `vault write <path> -` so the token never
/// appears on a command line.
#[instrument(skip(runner, bundle))]
pub async fn write_credentials<R: CommandRunner>(
    runner: &R,
    path: &str,
    bundle: &CredentialBundle,
) -> Result<()> {
    let payload = serde_json::to_vec(bundle)?;

    let output = runner
        .run("vault", &["write", path, "-"], Some(&payload))
        .await?;

    if !output.success {
        return Err(IntakeError::VaultWriteError(format!(
            "{}: {}",
            path,
            output.stderr_str()
        )));
    }

    info!("Credentials for {} written to {}", bundle.k8s_name, path);
    Ok(())
}
