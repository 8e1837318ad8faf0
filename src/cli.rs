// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line parsing.
//!
//! Unrecognized flags and stray positional arguments are dropped before
//! clap sees them, so only the known flags influence the run.

use clap::{Command, CommandFactory, Parser};
use std::ffi::OsString;
use tracing::debug;

use crate::constants::DEFAULT_NAMESPACE;

/// Onboard the current GKE cluster as a Spinnaker dynamic account
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "spinnaker-intake", version)]
pub struct Cli {
    /// Namespace to create the spinnaker-user service account in
    #[arg(short = 'n', long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Path to a kubeconfig file (defaults to KUBECONFIG or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubeconfig context to use instead of the current context
    #[arg(long)]
    pub context: Option<String>,

    /// GCP project owning the cluster (defaults to the active gcloud project)
    #[arg(long)]
    pub project: Option<String>,

    /// Vault path prefix the credentials are written under
    #[arg(long)]
    pub vault_path: Option<String>,
}

impl Cli {
    /// Parse arguments, ignoring anything that is not a known flag.
    pub fn try_parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(retain_known_args(args))
    }
}

/// Drop arguments that do not match a flag of [`Cli`].
///
/// The first element is the binary name and is always kept. A known flag
/// that takes a value keeps the following argument as its value unless the
/// value was given inline (`--namespace=foo`, `-nfoo`).
pub fn retain_known_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            debug!("Ignoring non UTF-8 argument {:?}", arg);
            continue;
        };

        match lookup_flag(&cmd, text) {
            Some(flag) => {
                kept.push(arg.clone());
                if flag.takes_value && !flag.inline_value {
                    if let Some(value) = args.next() {
                        kept.push(value);
                    }
                }
            }
            None => debug!("Ignoring unrecognized argument '{}'", text),
        }
    }

    kept
}

struct FlagMatch {
    takes_value: bool,
    inline_value: bool,
}

fn lookup_flag(cmd: &Command, text: &str) -> Option<FlagMatch> {
    if let Some(long) = text.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        cmd.get_arguments()
            .find(|a| a.get_long() == Some(name))
            .map(|a| FlagMatch {
                takes_value: a.get_action().takes_values(),
                inline_value,
            })
    } else if let Some(short) = text.strip_prefix('-') {
        let mut chars = short.chars();
        let flag = chars.next()?;
        let inline_value = !chars.as_str().is_empty();
        cmd.get_arguments()
            .find(|a| a.get_short() == Some(flag))
            .map(|a| FlagMatch {
                takes_value: a.get_action().takes_values(),
                inline_value,
            })
    } else {
        None
    }
}
