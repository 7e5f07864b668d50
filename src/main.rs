// ABOUTME: Entry point for the asc-deploy CLI application.
// ABOUTME: Resolves parameters, builds the management client, and runs one action.

mod cli;

use asc_deploy::config::{DeployConfig, Params};
use asc_deploy::credential::DefaultCredential;
use asc_deploy::deploy;
use asc_deploy::diagnostics::Diagnostics;
use asc_deploy::error::Result;
use asc_deploy::management::ManagementClient;
use asc_deploy::output::Output;
use clap::Parser;
use cli::Cli;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());
    output.start_timer();

    if let Err(e) = run(&cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, output: &Output) -> Result<()> {
    let file = match &cli.config {
        Some(path) => Some(DeployConfig::load(path)?),
        None => DeployConfig::discover(&env::current_dir()?)?,
    };
    let params = Params::resolve(&cli.inputs, file.as_ref())?;

    let client = ManagementClient::builder(
        params.target.subscription.clone(),
        Arc::new(DefaultCredential::from_env()),
    )
    .endpoint(params.client.endpoint.as_str())
    .poll_interval(params.client.poll_interval)
    .wait_for_completion(params.client.wait_for_completion)
    .build()?;

    let mut diag = Diagnostics::default();
    let result = deploy::run(&client, params.target, params.request, output, &mut diag).await;
    diag.report(output);
    let outcome = result?;

    output.success(&outcome.to_string());
    Ok(())
}
