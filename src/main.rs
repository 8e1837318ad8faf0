// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spinnaker_intake::cli::Cli;
use spinnaker_intake::config::Config;
use spinnaker_intake::kubernetes::KubeContext;
use spinnaker_intake::onboard::Onboarder;
use spinnaker_intake::tools::SystemRunner;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, stdout is left to --help output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse_lenient(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Load configuration
    let config = Config::from_env().with_cli(&cli);
    info!(
        "Onboarding namespace {} into {}",
        config.namespace, config.vault_path
    );

    let context = KubeContext::load(cli.kubeconfig.as_deref(), cli.context.as_deref())?;
    let client = context.client().await?;

    let bundle = Onboarder::new(client, SystemRunner, config).run(&context).await?;

    info!(
        "Account {} for {} is ready for Spinnaker",
        bundle.k8s_username, bundle.k8s_name
    );
    Ok(())
}
