// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::REQUIRED_TOOLS;
use crate::error::{IntakeError, Result};
use crate::tools::CommandRunner;
use tracing::{debug, instrument};

/// Fail with [`IntakeError::MissingTool`] on the first required binary that is not installed
#[instrument(skip(runner))]
pub async fn check_required_tools<R: CommandRunner>(runner: &R) -> Result<()> {
    for (tool, hint) in REQUIRED_TOOLS {
        if !runner.is_installed(tool).await {
            return Err(IntakeError::MissingTool {
                tool: tool.to_string(),
                hint: hint.to_string(),
            });
        }
        debug!("Found required tool {}", tool);
    }

    Ok(())
}
