// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External CLI invocation (gcloud, vault) and tool preflight checks.

pub mod preflight;
pub mod runner;

pub use preflight::check_required_tools;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
