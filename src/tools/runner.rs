// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{IntakeError, Result};
use std::future::Future;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Captured result of an external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Runs external programs on behalf of the onboarding steps
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, optionally feeding `stdin`, and capture its output.
    /// A non-zero exit is reported through [`CommandOutput::success`], not as an error.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
    ) -> impl Future<Output = Result<CommandOutput>> + Send;

    /// Whether `program` can be found on the PATH
    fn is_installed(&self, program: &str) -> impl Future<Output = bool> + Send;
}

/// [`CommandRunner`] backed by real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&[u8]>,
    ) -> Result<CommandOutput> {
        debug!("Running {} {}", program, args.join(" "));

        let command_error = |e: std::io::Error| IntakeError::CommandError {
            program: program.to_string(),
            message: e.to_string(),
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(command_error)?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input).await.map_err(command_error)?;
            // Closing stdin signals end of input
            drop(pipe);
        }

        let output = child.wait_with_output().await.map_err(command_error)?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    async fn is_installed(&self, program: &str) -> bool {
        match Command::new("which").arg(program).output().await {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("Failed to run which for {}: {}", program, e);
                false
            }
        }
    }
}
